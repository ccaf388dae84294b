pub mod insert_once;
pub mod prelude;

pub use dashmap;

pub use super::insert_once::InsertOnceMap;
pub use dashmap;

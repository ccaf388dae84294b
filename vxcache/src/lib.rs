//! Memoized attribute indexes for vertex formats
//!
//! [`FormatIndexCache::lookup`] scans a [`VertexFormat`] once and hands back a shared
//! [`FormatSummary`] saying which element index holds the position, normal, color, UV, overlay and
//! light map attributes.

mod cache;
mod error;
mod format;
mod summary;

pub use cache::{FormatCacheConfig, FormatIndexCache};
pub use error::FormatError;
pub use format::{ElementType, FormatId, Usage, VertexFormat, VertexFormatElement};
pub use summary::{Attribute, FormatSummary};

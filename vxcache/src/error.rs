use thiserror::Error;

use crate::format::FormatId;
use crate::summary::Attribute;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Error)]
pub enum FormatError {
    /// The vertex format is malformed, two elements claim the same attribute
    #[error("Found 2 {attribute} elements in {format:?}, at {first} and {second}")]
    DuplicateAttribute {
        format: FormatId,
        attribute: Attribute,
        first: usize,
        second: usize,
    },
}

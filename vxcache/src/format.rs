use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use crate::summary::Attribute;

/// Semantic role of a [`VertexFormatElement`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Usage {
    Position,
    Normal,
    Color,
    /// Texture coordinates, disambiguated by [`VertexFormatElement::index`]
    Uv,
    Padding,
    Generic,
}

/// Scalar type of a single component of an element
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float,
    UByte,
    Byte,
    UShort,
    Short,
    UInt,
    Int,
}

impl ElementType {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            ElementType::UByte | ElementType::Byte => 1,
            ElementType::UShort | ElementType::Short => 2,
            ElementType::Float | ElementType::UInt | ElementType::Int => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexFormatElement {
    pub usage: Usage,
    /// Sub-index, only meaningful for [`Usage::Uv`] (0 = uv, 1 = overlay, 2 = light map)
    pub index: u8,
    pub ty: ElementType,
    /// # of components
    pub count: u8,
}

impl VertexFormatElement {
    pub const POSITION_3F: Self = Self::new(Usage::Position, 0, ElementType::Float, 3);
    pub const COLOR_4UB: Self = Self::new(Usage::Color, 0, ElementType::UByte, 4);
    pub const TEX_2F: Self = Self::new(Usage::Uv, 0, ElementType::Float, 2);
    pub const TEX_2S: Self = Self::new(Usage::Uv, 1, ElementType::Short, 2);
    pub const TEX_2SB: Self = Self::new(Usage::Uv, 2, ElementType::Short, 2);
    pub const NORMAL_3B: Self = Self::new(Usage::Normal, 0, ElementType::Byte, 3);
    pub const PADDING_1B: Self = Self::new(Usage::Padding, 0, ElementType::Byte, 1);

    pub const fn new(usage: Usage, index: u8, ty: ElementType, count: u8) -> Self {
        Self {
            usage,
            index,
            ty,
            count,
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        self.ty.size_in_bytes() * self.count as usize
    }

    /// The semantic attribute this element provides, if any
    pub fn attribute(&self) -> Option<Attribute> {
        match self.usage {
            Usage::Position => Some(Attribute::Position),
            Usage::Normal => Some(Attribute::Normal),
            Usage::Color => Some(Attribute::Color),
            Usage::Uv => match self.index {
                0 => Some(Attribute::Uv),
                1 => Some(Attribute::Overlay),
                2 => Some(Attribute::LightMap),
                _ => None,
            },
            Usage::Padding | Usage::Generic => None,
        }
    }
}

/// Identity of a [`VertexFormat`] instance
///
/// Every constructed format receives a fresh id, so two structurally identical formats never share
/// one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatId(u64);

impl FormatId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

static BLOCK: LazyLock<Arc<VertexFormat>> = LazyLock::new(|| {
    Arc::new(VertexFormat::new([
        VertexFormatElement::POSITION_3F,
        VertexFormatElement::COLOR_4UB,
        VertexFormatElement::TEX_2F,
        VertexFormatElement::TEX_2SB,
        VertexFormatElement::NORMAL_3B,
        VertexFormatElement::PADDING_1B,
    ]))
});

/// An immutable, ordered description of the elements packed into a single vertex
#[derive(Debug)]
pub struct VertexFormat {
    id: FormatId,
    elements: Vec<VertexFormatElement>,
}

impl VertexFormat {
    pub fn new(elements: impl IntoIterator<Item = VertexFormatElement>) -> Self {
        Self {
            id: FormatId::next(),
            elements: elements.into_iter().collect(),
        }
    }

    /// The default block format shared by the whole process
    pub fn block() -> &'static Arc<VertexFormat> {
        &BLOCK
    }

    pub fn id(&self) -> FormatId {
        self.id
    }

    pub fn elements(&self) -> &[VertexFormatElement] {
        &self.elements
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Size of a single vertex, in bytes
    pub fn size_in_bytes(&self) -> usize {
        self.elements.iter().map(|element| element.size_in_bytes()).sum()
    }

    /// Byte offset of the element at `index` within a vertex
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        if index >= self.elements.len() {
            return None;
        }
        Some(
            self.elements[..index]
                .iter()
                .map(|element| element.size_in_bytes())
                .sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_layout() {
        let block = VertexFormat::block();
        assert_eq!(block.element_count(), 6);
        assert_eq!(block.size_in_bytes(), 32);
        assert_eq!(block.offset_of(0), Some(0));
        assert_eq!(block.offset_of(1), Some(12));
        assert_eq!(block.offset_of(4), Some(28));
        assert_eq!(block.offset_of(6), None);
        assert!(Arc::ptr_eq(block, VertexFormat::block()));
    }

    #[test]
    fn test_distinct_instances_have_distinct_ids() {
        let a = VertexFormat::new([VertexFormatElement::POSITION_3F]);
        let b = VertexFormat::new([VertexFormatElement::POSITION_3F]);
        assert_eq!(a.elements(), b.elements());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_element_attribute() {
        assert_eq!(
            VertexFormatElement::POSITION_3F.attribute(),
            Some(Attribute::Position)
        );
        assert_eq!(VertexFormatElement::TEX_2F.attribute(), Some(Attribute::Uv));
        assert_eq!(VertexFormatElement::TEX_2S.attribute(), Some(Attribute::Overlay));
        assert_eq!(VertexFormatElement::TEX_2SB.attribute(), Some(Attribute::LightMap));
        assert_eq!(VertexFormatElement::PADDING_1B.attribute(), None);
        assert_eq!(
            VertexFormatElement::new(Usage::Uv, 3, ElementType::Float, 2).attribute(),
            None
        );
        // Sub-index only applies to uv
        assert_eq!(
            VertexFormatElement::new(Usage::Normal, 2, ElementType::Byte, 3).attribute(),
            Some(Attribute::Normal)
        );
    }
}

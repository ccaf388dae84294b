use derivative::Derivative;
use std::fmt;
use std::sync::Arc;

use crate::error::FormatError;
use crate::format::VertexFormat;

/// The semantic attributes a [`FormatSummary`] tracks
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    Normal,
    Color,
    Uv,
    Overlay,
    LightMap,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Position,
        Attribute::Normal,
        Attribute::Color,
        Attribute::Uv,
        Attribute::Overlay,
        Attribute::LightMap,
    ];
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::Normal => "normal",
            Attribute::Color => "color",
            Attribute::Uv => "UV",
            Attribute::Overlay => "overlay",
            Attribute::LightMap => "light map",
        })
    }
}

/// Where each [`Attribute`] lives inside a [`VertexFormat`]
///
/// # Equality
/// Equality and hashing look at the element count and every index except the overlay index. Two
/// summaries that only differ in where (or whether) they carry an overlay compare equal.
#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq, Eq, Hash)]
pub struct FormatSummary {
    #[derivative(Debug = "ignore", PartialEq = "ignore", Hash = "ignore")]
    format: Arc<VertexFormat>,
    position: Option<usize>,
    normal: Option<usize>,
    color: Option<usize>,
    uv: Option<usize>,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    overlay: Option<usize>,
    light_map: Option<usize>,
    element_count: usize,
}

impl FormatSummary {
    /// Scan `format` once and record the index of every attribute it carries
    pub fn build(format: &Arc<VertexFormat>) -> Result<Self, FormatError> {
        let mut indices: [Option<usize>; Attribute::ALL.len()] = [None; Attribute::ALL.len()];
        for (index, element) in format.elements().iter().enumerate() {
            let Some(attribute) = element.attribute() else {
                continue;
            };
            let slot = &mut indices[attribute as usize];
            if let Some(first) = *slot {
                tracing::warn!(
                    "Rejecting {:?}, found {} at both {} and {}",
                    format.id(),
                    attribute,
                    first,
                    index
                );
                return Err(FormatError::DuplicateAttribute {
                    format: format.id(),
                    attribute,
                    first,
                    second: index,
                });
            }
            *slot = Some(index);
        }

        let [position, normal, color, uv, overlay, light_map] = indices;
        Ok(Self {
            format: format.clone(),
            position,
            normal,
            color,
            uv,
            overlay,
            light_map,
            element_count: format.element_count(),
        })
    }

    /// The format this summary was built from
    pub fn format(&self) -> &Arc<VertexFormat> {
        &self.format
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn index_of(&self, attribute: Attribute) -> Option<usize> {
        match attribute {
            Attribute::Position => self.position,
            Attribute::Normal => self.normal,
            Attribute::Color => self.color,
            Attribute::Uv => self.uv,
            Attribute::Overlay => self.overlay,
            Attribute::LightMap => self.light_map,
        }
    }

    pub fn has(&self, attribute: Attribute) -> bool {
        self.index_of(attribute).is_some()
    }

    pub fn position_index(&self) -> Option<usize> {
        self.position
    }

    pub fn normal_index(&self) -> Option<usize> {
        self.normal
    }

    pub fn color_index(&self) -> Option<usize> {
        self.color
    }

    pub fn uv_index(&self) -> Option<usize> {
        self.uv
    }

    pub fn overlay_index(&self) -> Option<usize> {
        self.overlay
    }

    pub fn light_map_index(&self) -> Option<usize> {
        self.light_map
    }

    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    pub fn has_normal(&self) -> bool {
        self.normal.is_some()
    }

    pub fn has_color(&self) -> bool {
        self.color.is_some()
    }

    pub fn has_uv(&self) -> bool {
        self.uv.is_some()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn has_light_map(&self) -> bool {
        self.light_map.is_some()
    }
}

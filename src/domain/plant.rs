use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Physical installation a feature row describes.
///
/// The integer code is the categorical encoding the regressor was trained
/// with. Ordering follows the code, so sorted collections of plants always
/// put `PlantA` first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlantId {
    #[strum(to_string = "Plant A")]
    PlantA,
    #[strum(to_string = "Plant B")]
    PlantB,
}

impl PlantId {
    /// Training-time integer code for this plant
    pub const fn code(self) -> u8 {
        match self {
            PlantId::PlantA => 0,
            PlantId::PlantB => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::iter().find(|p| p.code() == code)
    }

    /// Manifest key used in model artifacts
    pub const fn key(self) -> &'static str {
        match self {
            PlantId::PlantA => "PLANT_A",
            PlantId::PlantB => "PLANT_B",
        }
    }

    /// Every plant in code order
    pub fn all() -> Vec<PlantId> {
        Self::iter().collect()
    }
}

/// Role a site plays in the two-site comparison view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteLabel {
    Conservative,
    Optimized,
}

impl SiteLabel {
    pub fn for_plant(plant: PlantId) -> Self {
        match plant {
            PlantId::PlantA => SiteLabel::Conservative,
            PlantId::PlantB => SiteLabel::Optimized,
        }
    }
}

use std::collections::BTreeMap;

use core_types::{FlavorDimension, TraitDimension};
use serde::{Deserialize, Serialize};

/// The four bipolar axes, in the order their letters appear in a code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Brightness,
    Texture,
    Sweetness,
    Aroma,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Brightness, Axis::Texture, Axis::Sweetness, Axis::Aroma];

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Brightness => "brightness",
            Axis::Texture => "texture",
            Axis::Sweetness => "sweetness",
            Axis::Aroma => "aroma",
        }
    }

    pub fn flavor_dimension(self) -> FlavorDimension {
        match self {
            Axis::Brightness => FlavorDimension::Brightness,
            Axis::Texture => FlavorDimension::Texture,
            Axis::Sweetness => FlavorDimension::Sweetness,
            Axis::Aroma => FlavorDimension::Aroma,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pole {
    pub letter: char,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPoles {
    pub left: Pole,
    pub right: Pole,
}

impl AxisPoles {
    pub fn new(left: char, left_label: &str, right: char, right_label: &str) -> Self {
        Self {
            left: Pole {
                letter: left,
                label: left_label.to_string(),
            },
            right: Pole {
                letter: right,
                label: right_label.to_string(),
            },
        }
    }
}

/// Pole letters for every axis. One field per axis so a catalog can never
/// leave an axis without letters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSet {
    pub brightness: AxisPoles,
    pub texture: AxisPoles,
    pub sweetness: AxisPoles,
    pub aroma: AxisPoles,
}

impl AxisSet {
    pub fn poles(&self, axis: Axis) -> &AxisPoles {
        match axis {
            Axis::Brightness => &self.brightness,
            Axis::Texture => &self.texture,
            Axis::Sweetness => &self.sweetness,
            Axis::Aroma => &self.aroma,
        }
    }

    /// Left then right letter of each axis, in code order.
    pub fn alphabet(&self) -> Vec<char> {
        Axis::ALL
            .iter()
            .flat_map(|axis| {
                let poles = self.poles(*axis);
                [poles.left.letter, poles.right.letter]
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub axis: Axis,
    pub text: String,
    /// The statement favours the left pole, so its answer is mirrored
    /// before aggregation.
    #[serde(default)]
    pub reversed: bool,
}

impl Question {
    pub fn new(id: u32, axis: Axis, text: &str) -> Self {
        Self {
            id,
            axis,
            text: text.to_string(),
            reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

pub type TraitWeights = BTreeMap<TraitDimension, i32>;

/// Signed trait weights per question id.
pub type ContributionTable = BTreeMap<u32, TraitWeights>;

/// A named reference point. `reference` is stored on the unit scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry<V> {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub reference: V,
}

impl<V> ProfileEntry<V> {
    pub fn new(key: &str, name: &str, reference: V) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            tagline: String::new(),
            description: String::new(),
            tags: Vec::new(),
            reference,
        }
    }
}

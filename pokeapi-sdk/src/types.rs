// ABOUTME: Serde models for the PokeAPI pokemon detail and list endpoints
// ABOUTME: Also defines the hydrated Creature (record plus decoded sprite)

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    pub sprites: Sprites,
}

/// Sprite URLs; PokeAPI returns `null` for variants a creature lacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpriteVariant {
    #[default]
    Front,
    Back,
    Shiny,
}

impl Sprites {
    pub fn url(&self, variant: SpriteVariant) -> Option<&str> {
        let url = match variant {
            SpriteVariant::Front => &self.front_default,
            SpriteVariant::Back => &self.back_default,
            SpriteVariant::Shiny => &self.front_shiny,
        };
        url.as_deref().filter(|u| !u.is_empty())
    }
}

impl FromStr for SpriteVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "front" | "front_default" => Ok(SpriteVariant::Front),
            "back" | "back_default" => Ok(SpriteVariant::Back),
            "shiny" | "front_shiny" => Ok(SpriteVariant::Shiny),
            other => Err(format!(
                "Invalid sprite variant '{}'. Must be one of: front, back, shiny",
                other
            )),
        }
    }
}

impl fmt::Display for SpriteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteVariant::Front => write!(f, "front"),
            SpriteVariant::Back => write!(f, "back"),
            SpriteVariant::Shiny => write!(f, "shiny"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatureList {
    #[serde(default)]
    pub count: u32,
    pub results: Vec<ListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub url: String,
}

impl CreatureList {
    pub fn names(&self) -> Vec<String> {
        self.results.iter().map(|entry| entry.name.clone()).collect()
    }
}

/// A creature with its front sprite already downloaded and decoded.
#[derive(Debug, Clone)]
pub struct Creature {
    pub record: CreatureRecord,
    pub sprite: DynamicImage,
}

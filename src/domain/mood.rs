//! Mood tags attached to journal entries

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional tag attached to every entry
///
/// Ordered from brightest to darkest; this is also the display order used
/// by the mood selector and the analytics chart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Radiant,
    Happy,
    #[default]
    Neutral,
    Down,
    /// Older payloads call this mood `ominous`
    Gloomy,
}

impl Mood {
    pub const COUNT: usize = 5;

    /// Every mood, in canonical order
    pub const ALL: [Mood; Mood::COUNT] = [
        Mood::Radiant,
        Mood::Happy,
        Mood::Neutral,
        Mood::Down,
        Mood::Gloomy,
    ];

    /// Identifier used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Radiant => "radiant",
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Down => "down",
            Mood::Gloomy => "gloomy",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Radiant => "Radiant",
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Down => "Down",
            Mood::Gloomy => "Gloomy",
        }
    }

    /// Position within [`Mood::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Mood::Radiant => 0,
            Mood::Happy => 1,
            Mood::Neutral => 2,
            Mood::Down => 3,
            Mood::Gloomy => 4,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "radiant" => Ok(Mood::Radiant),
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "down" => Ok(Mood::Down),
            "gloomy" | "ominous" => Ok(Mood::Gloomy),
            _ => Err(format!(
                "Invalid mood: '{}'. Valid moods are: radiant, happy, neutral, down, gloomy",
                s
            )),
        }
    }
}

/// Stored moods are read leniently: `ominous` maps to `Gloomy` and an
/// unrecognised name falls back to `Neutral` instead of failing the entry.
impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Mood::from_str(&raw).unwrap_or_else(|_| {
            tracing::warn!(mood = %raw, "unknown stored mood, reading it as neutral");
            Mood::Neutral
        }))
    }
}

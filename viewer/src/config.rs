//! Named bundles of pipeline settings.
//!
//! | Profile | depth | centering | pan / azimuth | distance | zoom speed |
//! |---------|-------|-----------|---------------|----------|------------|
//! | `showcase` | 70 | lift | limited ±π/3 | 50–400 | 1.0 |
//! | `turntable` | 20 | origin | disabled, free | 50–1000 | 0.5 |

use serde::{Deserialize, Serialize};
use vectorize::ExtractConfig;

use crate::consts::TURNTABLE_DEPTH;
use crate::controls::ControlsConfig;
use crate::extrude::ExtrudeOptions;
use crate::frame::{Centering, FramingPolicy};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Which preset a [`ViewerConfig`] started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    #[default]
    Showcase,
    Turntable,
}

impl Profile {
    /// Parse a profile name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "showcase" => Some(Self::Showcase),
            "turntable" => Some(Self::Turntable),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Showcase => "showcase",
            Self::Turntable => "turntable",
        }
    }
}

/// Every tunable of the extraction, extrusion, framing and control stages.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub profile: Profile,
    pub extract: ExtractConfig,
    pub extrude: ExtrudeOptions,
    pub framing: FramingPolicy,
    pub controls: ControlsConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl ViewerConfig {
    /// The preset settings for `profile`.
    #[must_use]
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Showcase => Self {
                profile,
                extract: ExtractConfig::default(),
                extrude: ExtrudeOptions::default(),
                framing: FramingPolicy::default(),
                controls: ControlsConfig::showcase(),
            },
            Profile::Turntable => Self {
                profile,
                extract: ExtractConfig::default(),
                extrude: ExtrudeOptions { depth: TURNTABLE_DEPTH, ..ExtrudeOptions::default() },
                framing: FramingPolicy { centering: Centering::Origin, ..FramingPolicy::default() },
                controls: ControlsConfig::turntable(),
            },
        }
    }
}

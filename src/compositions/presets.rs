use std::{fmt, str::FromStr};

use crate::foundation::error::{FramewrightError, FramewrightResult};

/// Named camera moves over a still image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Zoom to 1.25x while drifting up and to the left.
    #[default]
    KenBurns,
    /// Centered zoom from 1.0x to 1.3x.
    ZoomIn,
    /// Centered zoom from 1.3x to 1.0x.
    ZoomOut,
    /// Pan right to left at 1.15x.
    PanLeft,
    /// Pan left to right at 1.15x.
    PanRight,
    /// Pan bottom to top at 1.15x.
    PanUp,
    /// Pan top to bottom at 1.15x.
    PanDown,
}

/// Start/end values of one preset. Offsets are percentages of the canvas size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PresetMotion {
    /// Start and end zoom factor.
    pub scale: (f64, f64),
    /// Start and end horizontal offset.
    pub offset_x: (f64, f64),
    /// Start and end vertical offset.
    pub offset_y: (f64, f64),
}

impl Preset {
    /// Every preset, in listing order.
    pub const ALL: [Self; 7] = [
        Self::KenBurns,
        Self::ZoomIn,
        Self::ZoomOut,
        Self::PanLeft,
        Self::PanRight,
        Self::PanUp,
        Self::PanDown,
    ];

    /// Kebab-case name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Self::KenBurns => "ken-burns",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::PanLeft => "pan-left",
            Self::PanRight => "pan-right",
            Self::PanUp => "pan-up",
            Self::PanDown => "pan-down",
        }
    }

    /// Start/end table of this preset.
    pub fn motion(self) -> PresetMotion {
        const PAN_SCALE: (f64, f64) = (1.15, 1.15);
        const STILL: (f64, f64) = (0.0, 0.0);
        match self {
            Self::KenBurns => PresetMotion {
                scale: (1.0, 1.25),
                offset_x: (0.0, -5.0),
                offset_y: (0.0, -3.0),
            },
            Self::ZoomIn => PresetMotion {
                scale: (1.0, 1.3),
                offset_x: STILL,
                offset_y: STILL,
            },
            Self::ZoomOut => PresetMotion {
                scale: (1.3, 1.0),
                offset_x: STILL,
                offset_y: STILL,
            },
            Self::PanLeft => PresetMotion {
                scale: PAN_SCALE,
                offset_x: (5.0, -5.0),
                offset_y: STILL,
            },
            Self::PanRight => PresetMotion {
                scale: PAN_SCALE,
                offset_x: (-5.0, 5.0),
                offset_y: STILL,
            },
            Self::PanUp => PresetMotion {
                scale: PAN_SCALE,
                offset_x: STILL,
                offset_y: (5.0, -5.0),
            },
            Self::PanDown => PresetMotion {
                scale: PAN_SCALE,
                offset_x: STILL,
                offset_y: (-5.0, 5.0),
            },
        }
    }

    /// One-line description for `framewright presets`.
    pub fn describe(self) -> &'static str {
        match self {
            Self::KenBurns => "slow zoom with a drift up and to the left",
            Self::ZoomIn => "zoom from 100% to 130%",
            Self::ZoomOut => "zoom from 130% to 100%",
            Self::PanLeft => "pan right-to-left at 115%",
            Self::PanRight => "pan left-to-right at 115%",
            Self::PanUp => "pan bottom-to-top at 115%",
            Self::PanDown => "pan top-to-bottom at 115%",
        }
    }
}

fn preset_names() -> String {
    Preset::ALL
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for Preset {
    type Err = FramewrightError;

    fn from_str(s: &str) -> FramewrightResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                FramewrightError::config(format!(
                    "unknown preset '{s}' (expected one of: {})",
                    preset_names()
                ))
            })
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/presets.rs"]
mod tests;

//! Search configuration.
//!
//! The document is a flat YAML mapping. Every key is required; unknown keys
//! are ignored. `axis` and `goal_direction` are kept as strings at the
//! document level so a bad value is reported by name instead of as a generic
//! deserialization failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::inputs::InputSymbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
}

impl Axis {
    /// The three inputs a run can hold on this axis, in generation order.
    pub fn alphabet(self) -> [InputSymbol; 3] {
        match self {
            Self::X => [InputSymbol::Left, InputSymbol::Neutral, InputSymbol::Right],
            Self::Y => [InputSymbol::Jump, InputSymbol::Neutral, InputSymbol::Duck],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl std::str::FromStr for Axis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            other => Err(ConfigError::InvalidAxis {
                found: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalDirection {
    /// Final position must end up below the goal.
    #[serde(rename = "-")]
    Decreasing,
    /// Final position must end up above the goal.
    #[serde(rename = "+")]
    Increasing,
}

impl GoalDirection {
    /// Goal predicate. Both bounds are strict.
    #[inline]
    pub fn admits(self, position: f64, goal_position: f64) -> bool {
        match self {
            Self::Decreasing => position < goal_position,
            Self::Increasing => position > goal_position,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decreasing => "-",
            Self::Increasing => "+",
        }
    }
}

impl std::str::FromStr for GoalDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" => Ok(Self::Decreasing),
            "+" => Ok(Self::Increasing),
            other => Err(ConfigError::InvalidGoalDirection {
                found: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimConfig {
    pub frames: u32,
    pub permutations: u32,
    pub axis: Axis,
    pub pos_init: f64,
    pub speed_init: f64,
    pub jump_timer: i32,
    pub jump_speed: f64,
    pub goal_position: f64,
    pub goal_direction: GoalDirection,
    pub goal_speed: f64,
    pub prioritize_speed: bool,
    pub ducking: bool,
    pub on_ground: bool,
    pub cold_core: bool,
    pub holdable_slow: bool,
    pub in_space: bool,
    pub auto_jump: bool,
}

/// On-disk shape of [`SimConfig`].
#[derive(Debug, Deserialize)]
struct ConfigDocument {
    frames: u32,
    permutations: u32,
    axis: String,
    pos_init: f64,
    speed_init: f64,
    jump_timer: i32,
    jump_speed: f64,
    goal_position: f64,
    goal_direction: String,
    goal_speed: f64,
    prioritize_speed: bool,
    ducking: bool,
    on_ground: bool,
    cold_core: bool,
    holdable_slow: bool,
    in_space: bool,
    auto_jump: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        source: serde_yaml::Error,
        /// Set when the document has a recognizable mistake worth naming.
        hint: Option<&'static str>,
    },
    InvalidAxis {
        found: String,
    },
    InvalidGoalDirection {
        found: String,
    },
    ZeroFrames,
    ZeroPermutations,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed reading config {}: {source}", path.display())
            }
            Self::Parse { source, hint } => {
                write!(f, "invalid config document: {source}")?;
                if let Some(hint) = hint {
                    write!(f, " ({hint})")?;
                }
                Ok(())
            }
            Self::InvalidAxis { found } => write!(f, "axis must be x or y, got '{found}'"),
            Self::InvalidGoalDirection { found } => {
                write!(f, "goal_direction must be - or +, got '{found}'")
            }
            Self::ZeroFrames => write!(f, "frames must be > 0"),
            Self::ZeroPermutations => write!(f, "permutations must be > 0"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl TryFrom<ConfigDocument> for SimConfig {
    type Error = ConfigError;

    fn try_from(doc: ConfigDocument) -> Result<Self, Self::Error> {
        let config = Self {
            frames: doc.frames,
            permutations: doc.permutations,
            axis: doc.axis.parse()?,
            pos_init: doc.pos_init,
            speed_init: doc.speed_init,
            jump_timer: doc.jump_timer,
            jump_speed: doc.jump_speed,
            goal_position: doc.goal_position,
            goal_direction: doc.goal_direction.parse()?,
            goal_speed: doc.goal_speed,
            prioritize_speed: doc.prioritize_speed,
            ducking: doc.ducking,
            on_ground: doc.on_ground,
            cold_core: doc.cold_core,
            holdable_slow: doc.holdable_slow,
            in_space: doc.in_space,
            auto_jump: doc.auto_jump,
        };
        config.validate()?;
        Ok(config)
    }
}

const UNQUOTED_DIRECTION_HINT: &str =
    "a bare '-' starts a YAML list; quote it: goal_direction: '-'";

/// A bare `-` value reads as a list entry to YAML, so the scanner error says
/// nothing about `goal_direction`.
fn parse_hint(raw: &str) -> Option<&'static str> {
    raw.lines()
        .filter_map(|line| line.split('#').next())
        .filter_map(|line| line.trim().strip_prefix("goal_direction:"))
        .any(|value| value.trim() == "-")
        .then_some(UNQUOTED_DIRECTION_HINT)
}

impl SimConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let doc: ConfigDocument =
            serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
                source,
                hint: parse_hint(raw),
            })?;
        Self::try_from(doc)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames == 0 {
            return Err(ConfigError::ZeroFrames);
        }
        if self.permutations == 0 {
            return Err(ConfigError::ZeroPermutations);
        }
        Ok(())
    }

    /// A grounded, unencumbered starting point for `axis`.
    pub fn example(axis: Axis) -> Self {
        let (goal_position, goal_direction, goal_speed) = match axis {
            Axis::X => (10.0, GoalDirection::Increasing, 90.0),
            Axis::Y => (-20.0, GoalDirection::Decreasing, 0.0),
        };
        Self {
            frames: 20,
            permutations: 100_000,
            axis,
            pos_init: 0.0,
            speed_init: 0.0,
            jump_timer: 11,
            jump_speed: -105.0,
            goal_position,
            goal_direction,
            goal_speed,
            prioritize_speed: false,
            ducking: false,
            on_ground: axis == Axis::X,
            cold_core: false,
            holdable_slow: false,
            in_space: false,
            auto_jump: false,
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

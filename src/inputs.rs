//! Input alphabet and run-length encoded input sequences.
//!
//! Compact text form: runs separated by commas, each `<frames><key>`, where
//! the key is `l`, `r`, `j`, `d`, or empty / `n` for neutral. `12r,3,5l` is
//! twelve frames right, three neutral, five left.

use serde::Serialize;
use std::fmt;

use crate::config::Axis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InputSymbol {
    #[serde(rename = "l")]
    Left,
    #[serde(rename = "")]
    Neutral,
    #[serde(rename = "r")]
    Right,
    #[serde(rename = "j")]
    Jump,
    #[serde(rename = "d")]
    Duck,
}

impl InputSymbol {
    pub fn key(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Neutral => "",
            Self::Right => "r",
            Self::Jump => "j",
            Self::Duck => "d",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "l" => Some(Self::Left),
            "" | "n" => Some(Self::Neutral),
            "r" => Some(Self::Right),
            "j" => Some(Self::Jump),
            "d" => Some(Self::Duck),
            _ => None,
        }
    }

    /// Horizontal move direction: -1, 0 or 1.
    #[inline]
    pub fn move_x(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Run {
    pub frames: u32,
    pub symbol: InputSymbol,
}

impl Run {
    pub fn new(frames: u32, symbol: InputSymbol) -> Self {
        Self { frames, symbol }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputSequence {
    runs: Vec<Run>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequenceParseError {
    Empty,
    MalformedRun { run: String },
    ZeroFrames { run: String },
    SymbolNotOnAxis { symbol: InputSymbol, axis: Axis },
    FrameCountMismatch { expected: u32, actual: u64 },
}

impl fmt::Display for SequenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "input sequence is empty"),
            Self::MalformedRun { run } => write!(f, "malformed run '{run}'"),
            Self::ZeroFrames { run } => write!(f, "run '{run}' has zero frames"),
            Self::SymbolNotOnAxis { symbol, axis } => write!(
                f,
                "input '{}' is not valid on the {} axis",
                symbol.key(),
                axis.as_str()
            ),
            Self::FrameCountMismatch { expected, actual } => write!(
                f,
                "runs cover {actual} frames, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for SequenceParseError {}

impl InputSequence {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of runs, i.e. discrete input changes plus one.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn total_frames(&self) -> u64 {
        self.runs.iter().map(|run| run.frames as u64).sum()
    }

    /// One symbol per simulated frame.
    pub fn frames(&self) -> impl Iterator<Item = InputSymbol> + '_ {
        self.runs
            .iter()
            .flat_map(|run| std::iter::repeat(run.symbol).take(run.frames as usize))
    }

    pub fn compact(&self) -> String {
        self.runs
            .iter()
            .map(|run| format!("{}{}", run.frames, run.symbol.key()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse the compact text form, checking the alphabet and that the runs
    /// cover exactly `frames` frames.
    pub fn parse(text: &str, axis: Axis, frames: u32) -> Result<Self, SequenceParseError> {
        let alphabet = axis.alphabet();
        let mut runs = Vec::new();
        for token in text.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let split = token
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(token.len());
            let (count, key) = token.split_at(split);
            let count: u32 = count.parse().map_err(|_| SequenceParseError::MalformedRun {
                run: token.to_string(),
            })?;
            let symbol = InputSymbol::from_key(key.trim()).ok_or_else(|| {
                SequenceParseError::MalformedRun {
                    run: token.to_string(),
                }
            })?;
            if count == 0 {
                return Err(SequenceParseError::ZeroFrames {
                    run: token.to_string(),
                });
            }
            if !alphabet.contains(&symbol) {
                return Err(SequenceParseError::SymbolNotOnAxis { symbol, axis });
            }
            runs.push(Run::new(count, symbol));
        }
        if runs.is_empty() {
            return Err(SequenceParseError::Empty);
        }

        let sequence = Self::new(runs);
        let actual = sequence.total_frames();
        if actual != frames as u64 {
            return Err(SequenceParseError::FrameCountMismatch {
                expected: frames,
                actual,
            });
        }
        Ok(sequence)
    }
}

/// Tuple form used in reports: `((10, 'r'), (3, ''))`.
impl fmt::Display for InputSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, run) in self.runs.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, '{}')", run.frames, run.symbol.key())?;
        }
        if self.runs.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

//! Signal output types shared across the scorer, builder, and pipeline.

use serde::{Deserialize, Serialize};

/// Trade direction emitted by the deterministic signal builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
    Neutral,
}

impl Direction {
    /// +1 long, -1 short, 0 neutral.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
            Direction::Neutral => 0.0,
        }
    }
}

/// How to time the entry once a direction is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryHint {
    Breakout,
    Pullback,
    Either,
}

/// Heuristic scorer output: a bounded score plus the reasons that fired.
///
/// Score range is [-100, 100]; -100 strong short, 0 neutral, +100 strong
/// long. Reasons are append-only and their order is significant — it is the
/// order the scoring rules fired in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaRecommendation {
    pub score: i32,
    pub reasons: Vec<String>,
}

impl TaRecommendation {
    pub fn neutral() -> Self {
        Self {
            score: 0,
            reasons: Vec::new(),
        }
    }
}

/// Final deterministic signal: direction, confidence, entry style, and
/// ATR-multiple risk parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterministicSignal {
    pub direction: Direction,
    /// Confidence in [0, 100].
    pub strength: i32,
    pub rationale: Vec<String>,
    pub entry_hint: EntryHint,
    /// Stop distance as a multiple of ATR(14).
    pub stop_multiple: f64,
    /// Target distance as a multiple of ATR(14).
    pub target_multiple: f64,
    /// Suggested position size as a fraction of capital, capped at 0.5.
    pub position_size_pct: f64,
}

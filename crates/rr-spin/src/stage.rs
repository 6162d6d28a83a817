//! Stage events — the machine-readable spin lifecycle
//!
//! Every observable milestone of a spin is emitted as a typed,
//! timestamped event. Timestamps come from the ideal schedule, not from
//! frame arrival, so a trace is reproducible regardless of tick cadence.

use serde::{Deserialize, Serialize};

use rr_core::SymbolKind;

/// One lifecycle milestone of a spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpinStage {
    /// Spin request accepted
    SpinStart,

    /// Grid clear began (previous round's display torn down)
    ClearStart,

    /// A reel's stagger delay elapsed, its first drop begins
    ReelFillStart {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// A symbol reached its target row
    SymbolLanded {
        /// Which reel (0-indexed)
        reel_index: u8,
        /// Target row (0 = top)
        row_index: u8,
        /// Symbol that landed
        symbol: SymbolKind,
    },

    /// A reel's last row landed; its column is final for the round
    ReelSettled {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// All reels settled, wins being evaluated
    EvaluateWins,

    /// Result presentation (highlight/dim/label) issued
    WinPresent {
        /// Sum of all run payouts
        total_payout: u32,
        /// Number of winning runs
        run_count: u8,
    },

    /// Spin complete, sequencer back to idle
    SpinEnd,
}

impl SpinStage {
    /// Snake-case name matching the serialized `type` tag
    pub fn type_name(&self) -> &'static str {
        match self {
            SpinStage::SpinStart => "spin_start",
            SpinStage::ClearStart => "clear_start",
            SpinStage::ReelFillStart { .. } => "reel_fill_start",
            SpinStage::SymbolLanded { .. } => "symbol_landed",
            SpinStage::ReelSettled { .. } => "reel_settled",
            SpinStage::EvaluateWins => "evaluate_wins",
            SpinStage::WinPresent { .. } => "win_present",
            SpinStage::SpinEnd => "spin_end",
        }
    }
}

/// A stage with its ideal-schedule timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The milestone
    pub stage: SpinStage,
    /// Milliseconds on the caller's clock, per the ideal schedule
    pub timestamp_ms: f64,
}

impl StageEvent {
    /// Create an event
    pub fn new(stage: SpinStage, timestamp_ms: f64) -> Self {
        Self { stage, timestamp_ms }
    }

    /// Stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}

/// Sort events chronologically, ties kept in emission order
pub fn sort_chronological(events: &mut [StageEvent]) {
    events.sort_by(|a, b| a.timestamp_ms.total_cmp(&b.timestamp_ms));
}

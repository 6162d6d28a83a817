//! Spin timing profiles and drop easing

use serde::{Deserialize, Serialize};

/// Overshoot constant for the back-out curve
const BACK_OVERSHOOT: f64 = 1.70158;

/// Easing applied to the cosmetic drop progress
///
/// The curve shapes only the progress value forwarded to the rendering
/// collaborator; landing timestamps and grid semantics are unaffected by
/// the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum DropCurve {
    /// Overshoot past the target, settle back (the classic drop feel)
    #[default]
    BackOut,
    /// Straight interpolation
    Linear,
    /// Quadratic ease-out
    EaseOutQuad,
}

impl DropCurve {
    /// Apply the curve to a linear progress value (0.0-1.0)
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            DropCurve::BackOut => {
                let c1 = BACK_OVERSHOOT;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            DropCurve::Linear => t,
            DropCurve::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Spin cadence configuration (all durations in milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinTiming {
    /// Minimum visible duration of the clear step
    pub clear_hold_ms: f64,
    /// Per-reel fill start offset; reel `r` starts at `r × step`
    pub stagger_step_ms: f64,
    /// Duration of one row's drop animation
    pub drop_ms: f64,
    /// Easing for the cosmetic drop progress
    pub curve: DropCurve,
}

impl SpinTiming {
    /// The original cadence: 500 ms clear, 100 ms stagger, 100 ms drop
    pub fn normal() -> Self {
        Self {
            clear_hold_ms: 500.0,
            stagger_step_ms: 100.0,
            drop_ms: 100.0,
            curve: DropCurve::BackOut,
        }
    }

    /// Every duration halved
    pub fn turbo() -> Self {
        Self::normal().scaled(0.5)
    }

    /// All durations zero; a single tick settles the whole grid
    pub fn instant() -> Self {
        Self {
            clear_hold_ms: 0.0,
            stagger_step_ms: 0.0,
            drop_ms: 0.0,
            curve: DropCurve::Linear,
        }
    }

    /// Scale every duration by a factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            clear_hold_ms: self.clear_hold_ms * factor,
            stagger_step_ms: self.stagger_step_ms * factor,
            drop_ms: self.drop_ms * factor,
            curve: self.curve,
        }
    }

    /// Fill start delay for a reel, relative to clear completion
    ///
    /// Left-to-right start order falls out of the multiplication; no
    /// stored delay table to keep consistent.
    pub fn start_delay(&self, reel: usize) -> f64 {
        reel as f64 * self.stagger_step_ms
    }

    /// Ideal duration of a full spin from request to last settlement
    pub fn spin_duration(&self, reels: u8, rows: u8) -> f64 {
        if reels == 0 {
            return self.clear_hold_ms;
        }
        self.clear_hold_ms
            + self.start_delay(reels as usize - 1)
            + rows as f64 * self.drop_ms
    }
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self::normal()
    }
}

//! # rr-spin — ReelRush spin orchestration
//!
//! Timing, choreography and presentation around the `rr-core` model:
//! the spin sequencer state machine, cadence profiles, the stage-event
//! stream, and the collaborator seams toward rendering and label
//! display.
//!
//! ## Flow
//!
//! ```text
//! spin() ──> Clearing ──> Filling (reels staggered, rows bottom-up)
//!                              │ all reels settled
//!                              v
//!                  evaluate ──> ResultPresenter ──> Idle
//! ```
//!
//! The caller drives everything through `tick(now_ms, ...)` on its own
//! clock; nothing here sleeps or spawns threads.

pub mod present;
pub mod sequencer;
pub mod stage;
pub mod timing;
pub mod view;

pub use present::*;
pub use sequencer::*;
pub use stage::*;
pub use timing::*;
pub use view::*;

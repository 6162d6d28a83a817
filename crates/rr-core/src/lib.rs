//! # rr-core — ReelRush deterministic model layer
//!
//! The data side of the slot engine: symbol identities, payout
//! configuration, the reel grid lifecycle, and win evaluation. No timing
//! and no rendering — those live in `rr-spin`.
//!
//! ## Architecture
//!
//! ```text
//! SymbolGenerator ──> ReelGrid (Empty → Filling → Settled)
//!                         │
//!                         v
//!                    GridSnapshot ──evaluate()──> WinResult
//!                         ^
//!                     PayTable (data-driven, JSON/YAML)
//! ```

pub mod evaluate;
pub mod grid;
pub mod paytable;
pub mod symbols;

pub use evaluate::*;
pub use grid::*;
pub use paytable::*;
pub use symbols::*;

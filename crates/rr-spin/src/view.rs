//! Rendering and label collaborator seams
//!
//! The sequencer never touches a scene graph directly; everything
//! cosmetic goes through these traits. Implementations live outside the
//! engine (a real renderer, the console surface in the demo player,
//! recording doubles in tests).

use rr_core::SymbolKind;

/// Visual surface holding the symbol sprites
///
/// Calls arrive in the order the original choreography made them:
/// `clear_all` once per spin before any fill, then per reel a
/// `spawn_symbol`/`set_drop_progress`*/`land_symbol` sequence per row,
/// then `connect_symbol`/`dim_symbol` after evaluation.
pub trait ReelSurface {
    /// Destroy every symbol sprite; the spin's hard first step
    fn clear_all(&mut self);

    /// Create a symbol above its target and start its drop
    fn spawn_symbol(&mut self, reel: usize, row: usize, symbol: SymbolKind);

    /// Eased progress (0.0-1.0, may overshoot 1.0) of an in-flight drop
    fn set_drop_progress(&mut self, reel: usize, row: usize, progress: f64);

    /// A drop finished; the sprite rests on its target row
    fn land_symbol(&mut self, reel: usize, row: usize);

    /// Swap a winning cell's sprite to its connected variant texture
    fn connect_symbol(&mut self, reel: usize, row: usize, symbol: SymbolKind);

    /// Tint a non-winning cell down
    fn dim_symbol(&mut self, reel: usize, row: usize);
}

/// Numeric payout display
pub trait WinLabel {
    /// Show the round's total payout (zero included)
    fn show_total(&mut self, total: u32);

    /// Blank the label at spin start
    fn clear(&mut self);
}

/// Surface that ignores every call, for headless batch runs
#[derive(Debug, Default)]
pub struct NullSurface;

impl ReelSurface for NullSurface {
    fn clear_all(&mut self) {}
    fn spawn_symbol(&mut self, _reel: usize, _row: usize, _symbol: SymbolKind) {}
    fn set_drop_progress(&mut self, _reel: usize, _row: usize, _progress: f64) {}
    fn land_symbol(&mut self, _reel: usize, _row: usize) {}
    fn connect_symbol(&mut self, _reel: usize, _row: usize, _symbol: SymbolKind) {}
    fn dim_symbol(&mut self, _reel: usize, _row: usize) {}
}

/// Label that ignores every call
#[derive(Debug, Default)]
pub struct NullLabel;

impl WinLabel for NullLabel {
    fn show_total(&mut self, _total: u32) {}
    fn clear(&mut self) {}
}

//! Result presentation boundary

use rr_core::{ReelGrid, WinResult};

use crate::view::{ReelSurface, WinLabel};

/// Relays an evaluation result to the rendering and label collaborators
///
/// Order matches the original presentation: winning cells are swapped to
/// their connected variants first, then the remaining cells are dimmed
/// (skipped entirely on a zero total), then the label gets the sum.
#[derive(Debug, Default)]
pub struct ResultPresenter;

impl ResultPresenter {
    /// Apply highlight/dim effects and forward the total
    ///
    /// The grid must be settled; highlight tags are written back so the
    /// model and the display agree on which cells won.
    pub fn present(
        &self,
        grid: &mut ReelGrid,
        result: &WinResult,
        surface: &mut dyn ReelSurface,
        label: &mut dyn WinLabel,
    ) {
        for run in &result.runs {
            for &(reel, row) in &run.cells {
                if let Err(e) = grid.mark_highlighted(reel, row) {
                    log::warn!("skipping highlight for ({reel}, {row}): {e}");
                    continue;
                }
                surface.connect_symbol(reel, row, run.symbol);
            }
        }

        if result.is_win() {
            let spec = grid.spec();
            for reel in 0..spec.reels as usize {
                for row in 0..spec.rows as usize {
                    let highlighted = grid.cell(reel, row).is_some_and(|c| c.highlighted);
                    if !highlighted {
                        surface.dim_symbol(reel, row);
                    }
                }
            }
            log::info!(
                "win presented: {} run(s), total {}",
                result.runs.len(),
                result.total_payout
            );
        }

        label.show_total(result.total_payout);
    }
}

//! Reel grid model with an explicit fill/settle lifecycle

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::symbols::SymbolKind;

/// Grid dimensions (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: u8,
    /// Number of visible rows per reel
    pub rows: u8,
}

impl GridSpec {
    /// The classic 5×3 layout
    pub fn standard_5x3() -> Self {
        Self { reels: 5, rows: 3 }
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels as usize * self.rows as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_5x3()
    }
}

/// Grid lifecycle phase
///
/// The grid is only externally meaningful when `Empty` or `Settled`;
/// `Filling` exists so mid-animation mutation is an explicit, checked
/// state instead of a timing assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPhase {
    /// All cells empty, between spins
    Empty,
    /// Cells being placed by the sequencer
    Filling,
    /// Fully populated, readable for evaluation
    Settled,
}

/// One grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Symbol face at this position
    pub symbol: SymbolKind,
    /// Marked as part of a winning run
    pub highlighted: bool,
}

impl Cell {
    fn new(symbol: SymbolKind) -> Self {
        Self {
            symbol,
            highlighted: false,
        }
    }
}

/// Grid lifecycle and bounds errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Cell coordinates outside the configured grid
    #[error("cell ({reel}, {row}) is outside the {reels}x{rows} grid")]
    OutOfBounds {
        reel: usize,
        row: usize,
        reels: u8,
        rows: u8,
    },
    /// Operation not valid in the current phase
    #[error("operation requires phase {required:?}, grid is {actual:?}")]
    WrongPhase {
        required: GridPhase,
        actual: GridPhase,
    },
    /// Placing a symbol where one already sits
    #[error("cell ({0}, {1}) is already occupied")]
    CellOccupied(usize, usize),
    /// Settling with cells still empty
    #[error("cannot settle: {0} of {1} cells still empty")]
    IncompleteFill(usize, usize),
}

/// The visible symbol matrix
///
/// Exclusively mutated by the spin sequencer during a spin, read-only
/// afterward. Row 0 is the top row; the fill animation places row
/// `rows - 1` first (bottom target), but that ordering is the
/// sequencer's concern, not the grid's.
#[derive(Debug, Clone)]
pub struct ReelGrid {
    spec: GridSpec,
    cells: Vec<Vec<Option<Cell>>>,
    phase: GridPhase,
}

impl ReelGrid {
    /// Create an empty grid
    pub fn new(spec: GridSpec) -> Self {
        Self {
            spec,
            cells: vec![vec![None; spec.rows as usize]; spec.reels as usize],
            phase: GridPhase::Empty,
        }
    }

    /// Grid dimensions
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    /// Empty every cell and return to `Empty`
    ///
    /// Callers that own display resources must release them before
    /// treating the clear as complete; the sequencer depends on this
    /// ordering.
    pub fn clear(&mut self) {
        for reel in &mut self.cells {
            reel.fill(None);
        }
        self.phase = GridPhase::Empty;
    }

    /// True when no cell holds a symbol
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|reel| reel.iter().all(Option::is_none))
    }

    /// Read a single cell, `None` while unfilled
    pub fn cell(&self, reel: usize, row: usize) -> Option<&Cell> {
        self.cells.get(reel)?.get(row)?.as_ref()
    }

    /// Begin a fill pass; only valid from `Empty`
    pub fn begin_fill(&mut self) -> Result<(), GridError> {
        if self.phase != GridPhase::Empty {
            return Err(GridError::WrongPhase {
                required: GridPhase::Empty,
                actual: self.phase,
            });
        }
        self.phase = GridPhase::Filling;
        Ok(())
    }

    /// Place a symbol at a position; only valid mid-fill
    pub fn set_cell(&mut self, reel: usize, row: usize, symbol: SymbolKind) -> Result<(), GridError> {
        if self.phase != GridPhase::Filling {
            return Err(GridError::WrongPhase {
                required: GridPhase::Filling,
                actual: self.phase,
            });
        }
        self.check_bounds(reel, row)?;
        let slot = &mut self.cells[reel][row];
        if slot.is_some() {
            return Err(GridError::CellOccupied(reel, row));
        }
        *slot = Some(Cell::new(symbol));
        Ok(())
    }

    /// True when every cell of a reel holds a symbol
    pub fn reel_filled(&self, reel: usize) -> bool {
        self.cells
            .get(reel)
            .is_some_and(|r| r.iter().all(Option::is_some))
    }

    /// Finish the fill pass; rejects an incompletely populated grid
    pub fn settle(&mut self) -> Result<(), GridError> {
        if self.phase != GridPhase::Filling {
            return Err(GridError::WrongPhase {
                required: GridPhase::Filling,
                actual: self.phase,
            });
        }
        let empty = self
            .cells
            .iter()
            .flatten()
            .filter(|c| c.is_none())
            .count();
        if empty > 0 {
            return Err(GridError::IncompleteFill(empty, self.spec.total_positions()));
        }
        self.phase = GridPhase::Settled;
        Ok(())
    }

    /// Read-only view for evaluation; only valid once settled
    pub fn snapshot(&self) -> Result<GridSnapshot, GridError> {
        if self.phase != GridPhase::Settled {
            return Err(GridError::WrongPhase {
                required: GridPhase::Settled,
                actual: self.phase,
            });
        }
        let mut cells = Vec::with_capacity(self.cells.len());
        for reel in &self.cells {
            let mut column = Vec::with_capacity(reel.len());
            for cell in reel {
                match cell {
                    Some(c) => column.push(*c),
                    // Settled implies fully populated; keep the check
                    None => {
                        return Err(GridError::IncompleteFill(1, self.spec.total_positions()));
                    }
                }
            }
            cells.push(column);
        }
        Ok(GridSnapshot {
            spec: self.spec,
            cells,
        })
    }

    /// Tag a settled cell as part of a winning run
    pub fn mark_highlighted(&mut self, reel: usize, row: usize) -> Result<(), GridError> {
        if self.phase != GridPhase::Settled {
            return Err(GridError::WrongPhase {
                required: GridPhase::Settled,
                actual: self.phase,
            });
        }
        self.check_bounds(reel, row)?;
        if let Some(cell) = &mut self.cells[reel][row] {
            cell.highlighted = true;
        }
        Ok(())
    }

    fn check_bounds(&self, reel: usize, row: usize) -> Result<(), GridError> {
        if reel >= self.spec.reels as usize || row >= self.spec.rows as usize {
            return Err(GridError::OutOfBounds {
                reel,
                row,
                reels: self.spec.reels,
                rows: self.spec.rows,
            });
        }
        Ok(())
    }
}

/// Fully populated read-only copy of a settled grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Dimensions of the source grid
    pub spec: GridSpec,
    /// Cells indexed `[reel][row]`
    pub cells: Vec<Vec<Cell>>,
}

impl GridSnapshot {
    /// Symbol at a position
    pub fn symbol_at(&self, reel: usize, row: usize) -> SymbolKind {
        self.cells[reel][row].symbol
    }

    /// Build a snapshot directly from symbols, for evaluation tests
    /// and offline tooling (`symbols[reel][row]`)
    pub fn from_symbols(spec: GridSpec, symbols: &[Vec<SymbolKind>]) -> Self {
        let cells = symbols
            .iter()
            .map(|reel| reel.iter().map(|&s| Cell::new(s)).collect())
            .collect();
        Self { spec, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_grid() -> ReelGrid {
        let mut grid = ReelGrid::new(GridSpec::standard_5x3());
        grid.begin_fill().unwrap();
        for reel in 0..5 {
            for row in 0..3 {
                grid.set_cell(reel, row, SymbolKind::Lp1).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = ReelGrid::new(GridSpec::standard_5x3());
        assert_eq!(grid.phase(), GridPhase::Empty);
        assert!(grid.is_empty());
        assert!(grid.cell(0, 0).is_none());
    }

    #[test]
    fn test_clear_before_fill_yields_empty_grid() {
        let mut grid = filled_grid();
        grid.settle().unwrap();
        grid.clear();
        assert_eq!(grid.phase(), GridPhase::Empty);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_cell_requires_filling_phase() {
        let mut grid = ReelGrid::new(GridSpec::standard_5x3());
        let err = grid.set_cell(0, 0, SymbolKind::Hp1).unwrap_err();
        assert!(matches!(
            err,
            GridError::WrongPhase {
                required: GridPhase::Filling,
                actual: GridPhase::Empty,
            }
        ));
    }

    #[test]
    fn test_set_cell_rejects_occupied_and_out_of_bounds() {
        let mut grid = ReelGrid::new(GridSpec::standard_5x3());
        grid.begin_fill().unwrap();
        grid.set_cell(1, 2, SymbolKind::Hp3).unwrap();
        assert_eq!(
            grid.set_cell(1, 2, SymbolKind::Hp4).unwrap_err(),
            GridError::CellOccupied(1, 2)
        );
        assert!(matches!(
            grid.set_cell(5, 0, SymbolKind::Hp4).unwrap_err(),
            GridError::OutOfBounds { reel: 5, row: 0, .. }
        ));
    }

    #[test]
    fn test_settle_rejects_incomplete_fill() {
        let mut grid = ReelGrid::new(GridSpec::standard_5x3());
        grid.begin_fill().unwrap();
        grid.set_cell(0, 0, SymbolKind::Lp2).unwrap();
        let err = grid.settle().unwrap_err();
        assert_eq!(err, GridError::IncompleteFill(14, 15));
        assert_eq!(grid.phase(), GridPhase::Filling);
    }

    #[test]
    fn test_snapshot_only_after_settle() {
        let mut grid = filled_grid();
        assert!(grid.snapshot().is_err());
        grid.settle().unwrap();
        let snapshot = grid.snapshot().unwrap();
        assert_eq!(snapshot.symbol_at(4, 2), SymbolKind::Lp1);
        assert!(!snapshot.cells[0][0].highlighted);
    }

    #[test]
    fn test_reel_filled_tracks_per_reel_progress() {
        let mut grid = ReelGrid::new(GridSpec::standard_5x3());
        grid.begin_fill().unwrap();
        for row in [2, 1, 0] {
            assert!(!grid.reel_filled(0));
            grid.set_cell(0, row, SymbolKind::Hp5).unwrap();
        }
        assert!(grid.reel_filled(0));
        assert!(!grid.reel_filled(1));
    }

    #[test]
    fn test_mark_highlighted_requires_settled() {
        let mut grid = filled_grid();
        assert!(grid.mark_highlighted(0, 0).is_err());
        grid.settle().unwrap();
        grid.mark_highlighted(0, 0).unwrap();
        assert!(grid.cell(0, 0).unwrap().highlighted);
        assert!(!grid.cell(0, 1).unwrap().highlighted);
    }
}

//! Win evaluation over a settled grid

use serde::{Deserialize, Serialize};

use crate::grid::GridSnapshot;
use crate::paytable::{PayTable, PaytableError};
use crate::symbols::SymbolKind;

/// Minimum run length that can pay
pub const MIN_RUN: u8 = 3;

/// One winning run on a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRun {
    /// Row the run sits on
    pub row: usize,
    /// Symbol shared by the run
    pub symbol: SymbolKind,
    /// Number of consecutive matching reels, starting at reel 0
    pub length: u8,
    /// Configured payout for this symbol at this length
    pub payout: u32,
    /// Participating cells as `(reel, row)`
    pub cells: Vec<(usize, usize)>,
}

/// Result of one evaluation pass
///
/// Created fresh per call; runs on different rows are independent and
/// never combined or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    /// Winning runs, in row order
    pub runs: Vec<WinRun>,
    /// Sum of all run payouts
    pub total_payout: u32,
}

impl WinResult {
    /// Whether anything paid
    pub fn is_win(&self) -> bool {
        self.total_payout > 0
    }

    /// Every cell participating in any winning run
    pub fn winning_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.runs.iter().flat_map(|run| run.cells.iter().copied())
    }
}

/// Scan the fixed rows of a settled grid for prefix runs
///
/// A win is a run of at least [`MIN_RUN`] consecutive reels sharing one
/// symbol in a row, starting at reel 0. Runs whose configured payout is
/// zero are not wins and mark no cells, so a zero total always means an
/// empty winning-cell set.
pub fn evaluate(snapshot: &GridSnapshot, paytable: &PayTable) -> Result<WinResult, PaytableError> {
    let reels = snapshot.spec.reels as usize;
    let rows = snapshot.spec.rows as usize;
    let mut runs = Vec::new();
    let mut total_payout = 0u32;

    for row in 0..rows {
        let symbol = snapshot.symbol_at(0, row);
        let mut length = 1u8;
        for reel in 1..reels {
            if snapshot.symbol_at(reel, row) != symbol {
                break;
            }
            length += 1;
        }
        if length < MIN_RUN {
            continue;
        }

        let payout = paytable.payout_for(symbol, length)?;
        if payout == 0 {
            continue;
        }

        total_payout += payout;
        runs.push(WinRun {
            row,
            symbol,
            length,
            payout,
            cells: (0..length as usize).map(|reel| (reel, row)).collect(),
        });
    }

    Ok(WinResult { runs, total_payout })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    /// Build a 5×3 snapshot from three row-major symbol rows
    fn snapshot(rows: [[SymbolKind; 5]; 3]) -> GridSnapshot {
        let spec = GridSpec::standard_5x3();
        let symbols: Vec<Vec<SymbolKind>> = (0..5)
            .map(|reel| (0..3).map(|row| rows[row][reel]).collect())
            .collect();
        GridSnapshot::from_symbols(spec, &symbols)
    }

    use SymbolKind::*;

    #[test]
    fn test_three_run_on_middle_row() {
        let grid = snapshot([
            [Lp1, Lp2, Lp3, Lp4, Lp5],
            [Hp3, Hp3, Hp3, Lp1, Lp2],
            [Lp2, Lp3, Lp4, Lp5, Lp6],
        ]);
        let result = evaluate(&grid, &PayTable::classic()).unwrap();
        assert_eq!(result.total_payout, 23);
        assert_eq!(result.runs.len(), 1);
        let run = &result.runs[0];
        assert_eq!(run.row, 1);
        assert_eq!(run.symbol, Hp3);
        assert_eq!(run.length, 3);
        assert_eq!(run.cells, vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_full_row_of_hp1_pays_five_of_a_kind() {
        let grid = snapshot([
            [Hp1, Hp1, Hp1, Hp1, Hp1],
            [Lp1, Lp2, Lp3, Lp4, Lp5],
            [Lp2, Lp3, Lp4, Lp5, Lp6],
        ]);
        let result = evaluate(&grid, &PayTable::classic()).unwrap();
        assert_eq!(result.total_payout, 23);
        let cells: Vec<_> = result.winning_cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_run_must_start_at_reel_zero() {
        // Three hp2 in a row, but offset by one reel
        let grid = snapshot([
            [Lp1, Hp2, Hp2, Hp2, Lp2],
            [Lp3, Lp4, Lp5, Lp6, Lp1],
            [Lp4, Lp5, Lp6, Lp1, Lp2],
        ]);
        let result = evaluate(&grid, &PayTable::classic()).unwrap();
        assert_eq!(result.total_payout, 0);
        assert_eq!(result.winning_cells().count(), 0);
    }

    #[test]
    fn test_two_matches_never_pay() {
        let grid = snapshot([
            [Hp6, Hp6, Lp1, Hp6, Hp6],
            [Lp1, Lp2, Lp3, Lp4, Lp5],
            [Lp2, Lp3, Lp4, Lp5, Lp6],
        ]);
        let result = evaluate(&grid, &PayTable::classic()).unwrap();
        assert!(!result.is_win());
        assert!(result.runs.is_empty());
    }

    #[test]
    fn test_independent_runs_on_multiple_rows_sum() {
        let grid = snapshot([
            [Lp6, Lp6, Lp6, Lp6, Lp1], // 4-run lp6 -> 11
            [Hp3, Hp3, Hp3, Lp1, Lp2], // 3-run hp3 -> 23
            [Hp1, Hp1, Hp1, Hp1, Hp1], // 5-run hp1 -> 23
        ]);
        let result = evaluate(&grid, &PayTable::classic()).unwrap();
        assert_eq!(result.total_payout, 11 + 23 + 23);
        assert_eq!(result.runs.len(), 3);
        assert_eq!(result.winning_cells().count(), 4 + 3 + 5);
    }

    #[test]
    fn test_run_lengths_pay_configured_values() {
        for (length, expected) in [(3u8, 23u32), (4, 24), (5, 25)] {
            let mut top = [Lp1, Lp2, Lp3, Lp4, Lp5];
            for reel in 0..length as usize {
                top[reel] = Hp3;
            }
            // Ensure symbol after the run breaks it
            if (length as usize) < 5 {
                top[length as usize] = Lp1;
            }
            let grid = snapshot([
                top,
                [Lp2, Lp3, Lp4, Lp5, Lp6],
                [Lp3, Lp4, Lp5, Lp6, Lp1],
            ]);
            let result = evaluate(&grid, &PayTable::classic()).unwrap();
            assert_eq!(result.total_payout, expected, "run length {length}");
            assert_eq!(result.runs[0].length, length);
            assert_eq!(result.winning_cells().count(), length as usize);
        }
    }

    #[test]
    fn test_zero_pay_run_marks_no_cells() {
        // lp1 configured with zeros even at 3+ matches
        let table = PayTable::from_entries(vec![crate::paytable::PaytableEntry::new(
            Lp1,
            [0, 0, 0, 0, 0],
        )])
        .unwrap();
        let grid = snapshot([
            [Lp1, Lp1, Lp1, Lp1, Lp1],
            [Lp2, Lp3, Lp4, Lp5, Lp6],
            [Lp3, Lp4, Lp5, Lp6, Lp2],
        ]);
        let result = evaluate(&grid, &table).unwrap();
        assert_eq!(result.total_payout, 0);
        assert_eq!(result.winning_cells().count(), 0);
    }

    #[test]
    fn test_unconfigured_symbol_run_pays_zero() {
        let table = PayTable::from_entries(vec![]).unwrap();
        let grid = snapshot([
            [Hp1, Hp1, Hp1, Hp1, Hp1],
            [Lp1, Lp2, Lp3, Lp4, Lp5],
            [Lp2, Lp3, Lp4, Lp5, Lp6],
        ]);
        let result = evaluate(&grid, &table).unwrap();
        assert!(!result.is_win());
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let grid = snapshot([
            [Hp3, Hp3, Hp3, Lp1, Lp2],
            [Lp1, Lp2, Lp3, Lp4, Lp5],
            [Lp2, Lp3, Lp4, Lp5, Lp6],
        ]);
        let table = PayTable::classic();
        let first = evaluate(&grid, &table).unwrap();
        let second = evaluate(&grid, &table).unwrap();
        assert_eq!(first, second);
    }
}

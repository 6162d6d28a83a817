//! Spin sequencer — clear, stagger, drop, settle, evaluate
//!
//! Single-threaded and tick-driven: the caller owns the clock and feeds
//! `tick` with the current time in milliseconds. The whole spin is laid
//! out as an ideal schedule at request time; ticks advance through it,
//! so milestone timestamps never depend on frame cadence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rr_core::{
    GridSpec, PayTable, ReelGrid, SymbolGenerator, SymbolKind, WinResult, evaluate,
};

use crate::present::ResultPresenter;
use crate::stage::{SpinStage, StageEvent};
use crate::timing::SpinTiming;
use crate::view::{ReelSurface, WinLabel};

/// Spin request errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpinError {
    /// A spin arrived while the previous one is still in flight
    #[error("spin requested while the sequencer is not idle")]
    ReentrantSpin,
}

/// Sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinPhase {
    /// Ready for a spin request
    Idle,
    /// Grid torn down, holding for the visible clear duration
    Clearing,
    /// Reels dropping symbols toward their targets
    Filling,
}

/// Per-reel fill state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReelPhase {
    /// Stagger delay not yet elapsed
    Pending,
    /// Rows dropping, bottom target first
    Dropping,
    /// Column final for the round
    Settled,
}

/// A scheduled point in the spin choreography
#[derive(Debug, Clone, Copy)]
enum Milestone {
    /// Clear hold elapsed, filling may begin
    ClearDone,
    /// A reel's stagger delay elapsed
    ReelStart { reel: usize },
    /// A reel's `step`-th drop reached its target (step 0 = bottom row)
    SymbolLand { reel: usize, step: usize },
}

/// A drop currently animating on one reel
#[derive(Debug, Clone, Copy)]
struct ActiveDrop {
    row: usize,
    symbol: SymbolKind,
    start_ms: f64,
}

/// Transient per-spin state, destroyed on full settlement
struct SpinSession {
    /// Ideal schedule, chronological; ties keep build order
    schedule: Vec<(f64, Milestone)>,
    /// Next unprocessed schedule index
    cursor: usize,
    reel_phase: Vec<ReelPhase>,
    active_drop: Vec<Option<ActiveDrop>>,
    settled_reels: usize,
}

/// Aggregate counters over a session of spins
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpinStats {
    pub spins: u64,
    pub wins: u64,
    pub total_payout: u64,
    pub max_payout: u32,
}

impl SpinStats {
    /// Fraction of spins that paid anything
    pub fn hit_rate(&self) -> f64 {
        if self.spins > 0 {
            self.wins as f64 / self.spins as f64
        } else {
            0.0
        }
    }

    fn record(&mut self, total_payout: u32) {
        self.spins += 1;
        if total_payout > 0 {
            self.wins += 1;
        }
        self.total_payout += u64::from(total_payout);
        self.max_payout = self.max_payout.max(total_payout);
    }
}

/// The spin state machine
///
/// Owns the grid, the symbol source, the payout configuration and the
/// timing profile. Rendering stays behind the [`ReelSurface`] and
/// [`WinLabel`] seams passed into `spin` and `tick`.
pub struct SpinSequencer {
    spec: GridSpec,
    grid: ReelGrid,
    generator: SymbolGenerator,
    paytable: PayTable,
    timing: SpinTiming,
    presenter: ResultPresenter,
    phase: SpinPhase,
    session: Option<SpinSession>,
    stats: SpinStats,
    last_result: Option<WinResult>,
}

impl SpinSequencer {
    /// Create a sequencer with an OS-seeded symbol source
    pub fn new(spec: GridSpec, paytable: PayTable, timing: SpinTiming) -> Self {
        Self {
            spec,
            grid: ReelGrid::new(spec),
            generator: SymbolGenerator::new(),
            paytable,
            timing,
            presenter: ResultPresenter,
            phase: SpinPhase::Idle,
            session: None,
            stats: SpinStats::default(),
            last_result: None,
        }
    }

    /// The classic 5×3 game with default data and cadence
    pub fn classic() -> Self {
        Self::new(GridSpec::standard_5x3(), PayTable::classic(), SpinTiming::normal())
    }

    /// Seed the symbol source for reproducible outcomes
    pub fn seed(&mut self, seed: u64) {
        self.generator.seed(seed);
    }

    /// Current state
    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Ready for the next spin request
    pub fn is_idle(&self) -> bool {
        self.phase == SpinPhase::Idle
    }

    /// The grid (settled between spins, empty before the first)
    pub fn grid(&self) -> &ReelGrid {
        &self.grid
    }

    /// Active timing profile
    pub fn timing(&self) -> &SpinTiming {
        &self.timing
    }

    /// Session counters
    pub fn stats(&self) -> &SpinStats {
        &self.stats
    }

    /// Result of the last completed spin
    pub fn last_result(&self) -> Option<&WinResult> {
        self.last_result.as_ref()
    }

    /// Request a spin at `now_ms` on the caller's clock
    ///
    /// Rejects with [`SpinError::ReentrantSpin`] when a spin is in
    /// flight; the in-flight sequence is unaffected by the rejection.
    /// Otherwise blanks the label, tears the previous round's display
    /// down and lays out the full schedule.
    pub fn spin(
        &mut self,
        now_ms: f64,
        surface: &mut dyn ReelSurface,
        label: &mut dyn WinLabel,
    ) -> Result<Vec<StageEvent>, SpinError> {
        if self.phase != SpinPhase::Idle {
            return Err(SpinError::ReentrantSpin);
        }

        log::info!("spin requested at {now_ms} ms");
        label.clear();
        surface.clear_all();
        self.grid.clear();
        self.last_result = None;

        self.session = Some(self.build_session(now_ms));
        self.phase = SpinPhase::Clearing;

        Ok(vec![
            StageEvent::new(SpinStage::SpinStart, now_ms),
            StageEvent::new(SpinStage::ClearStart, now_ms),
        ])
    }

    /// Advance the in-flight spin to `now_ms`
    ///
    /// Processes every milestone due by `now_ms` in schedule order and
    /// forwards eased progress for drops still in the air. Returns the
    /// milestones' events, chronological, stamped with their ideal
    /// times. A no-op while idle.
    pub fn tick(
        &mut self,
        now_ms: f64,
        surface: &mut dyn ReelSurface,
        label: &mut dyn WinLabel,
    ) -> Vec<StageEvent> {
        if self.phase == SpinPhase::Idle {
            return Vec::new();
        }
        let mut events = Vec::new();

        loop {
            let Some(session) = self.session.as_mut() else {
                break;
            };
            let Some(&(ts, milestone)) = session.schedule.get(session.cursor) else {
                break;
            };
            if ts > now_ms {
                break;
            }
            session.cursor += 1;
            self.process(ts, milestone, surface, label, &mut events);
        }

        self.forward_drop_progress(now_ms, surface);
        events
    }

    fn build_session(&self, now_ms: f64) -> SpinSession {
        let reels = self.spec.reels as usize;
        let rows = self.spec.rows as usize;
        let clear_done = now_ms + self.timing.clear_hold_ms;

        let mut schedule = Vec::with_capacity(1 + reels * (1 + rows));
        schedule.push((clear_done, Milestone::ClearDone));
        for reel in 0..reels {
            let start = clear_done + self.timing.start_delay(reel);
            schedule.push((start, Milestone::ReelStart { reel }));
            for step in 0..rows {
                let land = start + (step as f64 + 1.0) * self.timing.drop_ms;
                schedule.push((land, Milestone::SymbolLand { reel, step }));
            }
        }
        // Stable by timestamp: with zeroed durations the build order
        // (clear, then reels left to right, rows bottom to top) is the
        // processing order.
        schedule.sort_by(|a, b| a.0.total_cmp(&b.0));

        SpinSession {
            schedule,
            cursor: 0,
            reel_phase: vec![ReelPhase::Pending; reels],
            active_drop: vec![None; reels],
            settled_reels: 0,
        }
    }

    fn process(
        &mut self,
        ts: f64,
        milestone: Milestone,
        surface: &mut dyn ReelSurface,
        label: &mut dyn WinLabel,
        events: &mut Vec<StageEvent>,
    ) {
        match milestone {
            Milestone::ClearDone => {
                if let Err(e) = self.grid.begin_fill() {
                    log::warn!("begin_fill out of order: {e}");
                }
                self.phase = SpinPhase::Filling;
            }
            Milestone::ReelStart { reel } => {
                if let Some(session) = self.session.as_mut() {
                    session.reel_phase[reel] = ReelPhase::Dropping;
                }
                events.push(StageEvent::new(
                    SpinStage::ReelFillStart {
                        reel_index: reel as u8,
                    },
                    ts,
                ));
                log::debug!("reel {reel} fill start at {ts} ms");
                self.begin_drop(reel, 0, ts, surface);
            }
            Milestone::SymbolLand { reel, step } => {
                let rows = self.spec.rows as usize;
                let drop = self
                    .session
                    .as_mut()
                    .and_then(|s| s.active_drop[reel].take());
                match drop {
                    Some(drop) => {
                        surface.set_drop_progress(reel, drop.row, 1.0);
                        surface.land_symbol(reel, drop.row);
                        events.push(StageEvent::new(
                            SpinStage::SymbolLanded {
                                reel_index: reel as u8,
                                row_index: drop.row as u8,
                                symbol: drop.symbol,
                            },
                            ts,
                        ));
                    }
                    // Lost track of the drop; settle the row as a no-op
                    // so the reel keeps progressing.
                    None => log::warn!("no active drop on reel {reel} at step {step}"),
                }

                if step + 1 < rows {
                    self.begin_drop(reel, step + 1, ts, surface);
                } else {
                    self.settle_reel(reel, ts, surface, label, events);
                }
            }
        }
    }

    fn begin_drop(&mut self, reel: usize, step: usize, ts: f64, surface: &mut dyn ReelSurface) {
        // Bottom target row first, matching the drop choreography
        let row = self.spec.rows as usize - 1 - step;
        let symbol = self.generator.next_symbol();
        if let Err(e) = self.grid.set_cell(reel, row, symbol) {
            log::warn!("cell ({reel}, {row}) not placed: {e}");
        }
        surface.spawn_symbol(reel, row, symbol);
        if let Some(session) = self.session.as_mut() {
            session.active_drop[reel] = Some(ActiveDrop {
                row,
                symbol,
                start_ms: ts,
            });
        }
    }

    fn settle_reel(
        &mut self,
        reel: usize,
        ts: f64,
        surface: &mut dyn ReelSurface,
        label: &mut dyn WinLabel,
        events: &mut Vec<StageEvent>,
    ) {
        let all_settled = match self.session.as_mut() {
            Some(session) => {
                session.reel_phase[reel] = ReelPhase::Settled;
                session.settled_reels += 1;
                session.settled_reels == self.spec.reels as usize
            }
            None => false,
        };
        events.push(StageEvent::new(
            SpinStage::ReelSettled {
                reel_index: reel as u8,
            },
            ts,
        ));
        log::debug!("reel {reel} settled at {ts} ms");

        if all_settled {
            self.finish_spin(ts, surface, label, events);
        }
    }

    /// All reels settled: evaluate, present, return to idle
    fn finish_spin(
        &mut self,
        ts: f64,
        surface: &mut dyn ReelSurface,
        label: &mut dyn WinLabel,
        events: &mut Vec<StageEvent>,
    ) {
        self.session = None;
        self.phase = SpinPhase::Idle;

        if let Err(e) = self.grid.settle() {
            // Cells were lost to a placement failure. Do not evaluate a
            // partial grid; close the round and keep accepting spins.
            log::error!("round abandoned, grid did not settle: {e}");
            self.stats.record(0);
            events.push(StageEvent::new(SpinStage::SpinEnd, ts));
            return;
        }

        events.push(StageEvent::new(SpinStage::EvaluateWins, ts));
        let snapshot = match self.grid.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("settled grid refused a snapshot: {e}");
                self.stats.record(0);
                events.push(StageEvent::new(SpinStage::SpinEnd, ts));
                return;
            }
        };
        let result = match evaluate(&snapshot, &self.paytable) {
            Ok(result) => result,
            Err(e) => {
                log::error!("evaluation failed: {e}");
                self.stats.record(0);
                events.push(StageEvent::new(SpinStage::SpinEnd, ts));
                return;
            }
        };

        self.presenter
            .present(&mut self.grid, &result, surface, label);
        events.push(StageEvent::new(
            SpinStage::WinPresent {
                total_payout: result.total_payout,
                run_count: result.runs.len() as u8,
            },
            ts,
        ));

        self.stats.record(result.total_payout);
        log::info!(
            "spin settled at {ts} ms, payout {}",
            result.total_payout
        );
        self.last_result = Some(result);
        events.push(StageEvent::new(SpinStage::SpinEnd, ts));
    }

    fn forward_drop_progress(&mut self, now_ms: f64, surface: &mut dyn ReelSurface) {
        if self.timing.drop_ms <= 0.0 {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        for (reel, drop) in session.active_drop.iter().enumerate() {
            if let Some(drop) = drop {
                let t = (now_ms - drop.start_ms) / self.timing.drop_ms;
                if (0.0..1.0).contains(&t) {
                    surface.set_drop_progress(reel, drop.row, self.timing.curve.apply(t));
                }
            }
        }
    }
}

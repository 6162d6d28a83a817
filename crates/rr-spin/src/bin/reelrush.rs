//! ReelRush demo player
//!
//! Runs the spin engine headlessly on a virtual clock and prints the
//! settled grids, winning runs and session statistics. Optionally dumps
//! the stage-event stream as JSON for inspection.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use rr_core::{GridSpec, PayTable};
use rr_spin::{NullLabel, NullSurface, SpinSequencer, SpinTiming, StageEvent};

/// Virtual frame step driving the tick loop
const FRAME_MS: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Profile {
    Normal,
    Turbo,
    Instant,
}

impl Profile {
    fn timing(self) -> SpinTiming {
        match self {
            Profile::Normal => SpinTiming::normal(),
            Profile::Turbo => SpinTiming::turbo(),
            Profile::Instant => SpinTiming::instant(),
        }
    }
}

#[derive(Parser)]
#[command(name = "reelrush", about = "ReelRush headless spin player")]
struct Cli {
    /// Seed for reproducible outcomes (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of spins to run
    #[arg(short = 'n', long, default_value_t = 1)]
    spins: u32,

    /// Timing profile
    #[arg(short, long, value_enum, default_value = "normal")]
    profile: Profile,

    /// Paytable config file (.json or .yaml), classic data when omitted
    #[arg(long)]
    paytable: Option<PathBuf>,

    /// Write the stage-event stream to this JSON file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Print only the session summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let paytable = match &cli.paytable {
        Some(path) => load_paytable(path)?,
        None => PayTable::classic(),
    };

    let mut sequencer =
        SpinSequencer::new(GridSpec::standard_5x3(), paytable, cli.profile.timing());
    if let Some(seed) = cli.seed {
        sequencer.seed(seed);
        log::info!("seeded with {seed}");
    }

    let mut surface = NullSurface;
    let mut label = NullLabel;
    let mut trace: Vec<StageEvent> = Vec::new();
    let mut clock = 0.0f64;

    for spin in 0..cli.spins {
        trace.extend(sequencer.spin(clock, &mut surface, &mut label)?);
        while !sequencer.is_idle() {
            clock += FRAME_MS;
            trace.extend(sequencer.tick(clock, &mut surface, &mut label));
        }

        if !cli.quiet {
            println!("── spin {} ──", spin + 1);
            print_grid(&sequencer);
            print_result(&sequencer);
            println!();
        }
    }

    let stats = sequencer.stats();
    println!(
        "{} spin(s): {} win(s), hit rate {:.1}%, total payout {}, best {}",
        stats.spins,
        stats.wins,
        stats.hit_rate() * 100.0,
        stats.total_payout,
        stats.max_payout
    );

    if let Some(path) = &cli.trace {
        fs::write(path, serde_json::to_string_pretty(&trace)?)?;
        println!("trace with {} event(s) written to {}", trace.len(), path.display());
    }

    Ok(())
}

fn load_paytable(path: &PathBuf) -> Result<PayTable, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let table = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => PayTable::from_yaml(&text)?,
        _ => PayTable::from_json(&text)?,
    };
    Ok(table)
}

fn print_grid(sequencer: &SpinSequencer) {
    let spec = sequencer.grid().spec();
    for row in 0..spec.rows as usize {
        let mut line = String::new();
        for reel in 0..spec.reels as usize {
            match sequencer.grid().cell(reel, row) {
                Some(cell) if cell.highlighted => {
                    line.push_str(&format!("[{:>3}]", cell.symbol.name()));
                }
                Some(cell) => line.push_str(&format!(" {:>3} ", cell.symbol.name())),
                None => line.push_str("  .  "),
            }
        }
        println!("{line}");
    }
}

fn print_result(sequencer: &SpinSequencer) {
    let Some(result) = sequencer.last_result() else {
        return;
    };
    for run in &result.runs {
        println!(
            "  row {}: {} x{} pays {}",
            run.row,
            run.symbol.name(),
            run.length,
            run.payout
        );
    }
    println!("  total: {}", result.total_payout);
}

//! Symbol identities and randomized symbol generation

use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Symbol tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolTier {
    /// Card-rank style symbols, small pays
    LowPay,
    /// Premium symbols, large pays
    HighPay,
}

/// A symbol face on the reels
///
/// The set is fixed at twelve kinds in two tiers, matching the classic
/// game data. Config files address symbols by their lowercase names
/// (`lp1`..`lp6`, `hp1`..`hp6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SymbolKind {
    Lp1 = 0,
    Lp2 = 1,
    Lp3 = 2,
    Lp4 = 3,
    Lp5 = 4,
    Lp6 = 5,
    Hp1 = 6,
    Hp2 = 7,
    Hp3 = 8,
    Hp4 = 9,
    Hp5 = 10,
    Hp6 = 11,
}

impl SymbolKind {
    /// Every symbol kind, low tier first
    pub const ALL: [SymbolKind; 12] = [
        SymbolKind::Lp1,
        SymbolKind::Lp2,
        SymbolKind::Lp3,
        SymbolKind::Lp4,
        SymbolKind::Lp5,
        SymbolKind::Lp6,
        SymbolKind::Hp1,
        SymbolKind::Hp2,
        SymbolKind::Hp3,
        SymbolKind::Hp4,
        SymbolKind::Hp5,
        SymbolKind::Hp6,
    ];

    /// Number of distinct symbol kinds
    pub const COUNT: usize = Self::ALL.len();

    /// Config/asset name (e.g. "lp3", "hp1")
    pub fn name(&self) -> &'static str {
        match self {
            SymbolKind::Lp1 => "lp1",
            SymbolKind::Lp2 => "lp2",
            SymbolKind::Lp3 => "lp3",
            SymbolKind::Lp4 => "lp4",
            SymbolKind::Lp5 => "lp5",
            SymbolKind::Lp6 => "lp6",
            SymbolKind::Hp1 => "hp1",
            SymbolKind::Hp2 => "hp2",
            SymbolKind::Hp3 => "hp3",
            SymbolKind::Hp4 => "hp4",
            SymbolKind::Hp5 => "hp5",
            SymbolKind::Hp6 => "hp6",
        }
    }

    /// Tier this symbol belongs to
    pub fn tier(&self) -> SymbolTier {
        match self {
            SymbolKind::Lp1
            | SymbolKind::Lp2
            | SymbolKind::Lp3
            | SymbolKind::Lp4
            | SymbolKind::Lp5
            | SymbolKind::Lp6 => SymbolTier::LowPay,
            _ => SymbolTier::HighPay,
        }
    }

    /// Position in [`SymbolKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a kind by its position in [`SymbolKind::ALL`]
    pub fn from_index(index: usize) -> Option<SymbolKind> {
        Self::ALL.get(index).copied()
    }

    /// Look up a kind by its config name
    pub fn from_name(name: &str) -> Option<SymbolKind> {
        Self::ALL.iter().find(|k| k.name() == name).copied()
    }
}

/// Uniform random symbol source
///
/// Every draw is independent and uniform over all twelve kinds; there is
/// no correlation between reels or rows, so adjacent repeats and even a
/// fully uniform grid are legal outcomes. The RNG is owned, never global,
/// and seedable for reproducible sequences.
#[derive(Debug, Clone)]
pub struct SymbolGenerator {
    rng: StdRng,
}

impl SymbolGenerator {
    /// Create a generator seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a generator with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Re-seed in place for reproducible runs
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draw the next symbol, uniformly over all kinds
    pub fn next_symbol(&mut self) -> SymbolKind {
        SymbolKind::ALL[self.rng.random_range(0..SymbolKind::COUNT)]
    }
}

impl Default for SymbolGenerator {
    fn default() -> Self {
        Self::new()
    }
}

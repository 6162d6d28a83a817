//! Payout configuration and lookup

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::symbols::SymbolKind;

/// Pay slots per entry, covering match counts one through five
pub const PAY_STEPS: usize = 5;

/// Paytable configuration and lookup errors
#[derive(Error, Debug)]
pub enum PaytableError {
    /// Lookup with a match count no pay slot exists for
    #[error("match count {0} is outside the supported range 0..=5")]
    InvalidMatchCount(u8),
    /// Two entries configured for the same symbol
    #[error("duplicate paytable entry for symbol {0:?}")]
    DuplicateSymbol(SymbolKind),
    /// Config file could not be parsed
    #[error("failed to parse paytable: {0}")]
    Parse(String),
}

/// One configured symbol payout record
///
/// `pays[i]` is the payout for `i + 1` matching reels; the first two slots
/// are zero in the classic data (no payout below 3 matches) but nothing in
/// the model relies on that, the configured values are used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaytableEntry {
    /// Symbol this entry pays for
    pub symbol: SymbolKind,
    /// Payout per match count, index 0 = one of a kind
    pub pays: [u32; PAY_STEPS],
    /// Optional display name ("Seven", "Ruby", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PaytableEntry {
    /// Create an entry with no display label
    pub fn new(symbol: SymbolKind, pays: [u32; PAY_STEPS]) -> Self {
        Self {
            symbol,
            pays,
            label: None,
        }
    }

    /// Attach a display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Payout for a consecutive-match count
    ///
    /// Zero matches pay zero; counts beyond the table width are a contract
    /// violation, not a zero-pay case.
    pub fn pay_for(&self, match_count: u8) -> Result<u32, PaytableError> {
        match match_count as usize {
            0 => Ok(0),
            count if count <= PAY_STEPS => Ok(self.pays[count - 1]),
            _ => Err(PaytableError::InvalidMatchCount(match_count)),
        }
    }
}

/// Immutable payout table, loaded once at startup
///
/// The table is the only swappable configuration of the engine: a sequence
/// of `{ symbol, pays, label }` records. Symbols without an entry pay zero
/// for every count rather than failing the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PayTable {
    entries: Vec<PaytableEntry>,
}

impl PayTable {
    /// The classic 12-symbol game data
    pub fn classic() -> Self {
        let entries = vec![
            PaytableEntry::new(SymbolKind::Lp1, [0, 0, 5, 6, 7]).with_label("9"),
            PaytableEntry::new(SymbolKind::Lp2, [0, 0, 6, 7, 8]).with_label("10"),
            PaytableEntry::new(SymbolKind::Lp3, [0, 0, 7, 8, 9]).with_label("J"),
            PaytableEntry::new(SymbolKind::Lp4, [0, 0, 8, 9, 10]).with_label("Q"),
            PaytableEntry::new(SymbolKind::Lp5, [0, 0, 9, 10, 11]).with_label("K"),
            PaytableEntry::new(SymbolKind::Lp6, [0, 0, 10, 11, 12]).with_label("A"),
            PaytableEntry::new(SymbolKind::Hp1, [0, 0, 21, 22, 23]).with_label("Ruby"),
            PaytableEntry::new(SymbolKind::Hp2, [0, 0, 22, 23, 24]).with_label("Crown"),
            PaytableEntry::new(SymbolKind::Hp3, [0, 0, 23, 24, 25]).with_label("Seven"),
            PaytableEntry::new(SymbolKind::Hp4, [0, 0, 24, 25, 26]).with_label("Diamond"),
            PaytableEntry::new(SymbolKind::Hp5, [0, 0, 25, 26, 27]).with_label("Clover"),
            PaytableEntry::new(SymbolKind::Hp6, [0, 0, 26, 27, 28]),
        ];
        // Classic data is statically well-formed
        Self::from_entries(entries).expect("classic paytable is valid")
    }

    /// Build a table from configured entries, rejecting duplicate symbols
    pub fn from_entries(entries: Vec<PaytableEntry>) -> Result<Self, PaytableError> {
        let mut seen = [false; SymbolKind::COUNT];
        for entry in &entries {
            let idx = entry.symbol.index();
            if seen[idx] {
                return Err(PaytableError::DuplicateSymbol(entry.symbol));
            }
            seen[idx] = true;
        }
        Ok(Self { entries })
    }

    /// Load a table from a JSON entry sequence
    pub fn from_json(json: &str) -> Result<Self, PaytableError> {
        let entries: Vec<PaytableEntry> =
            serde_json::from_str(json).map_err(|e| PaytableError::Parse(e.to_string()))?;
        let table = Self::from_entries(entries)?;
        log::debug!("loaded paytable with {} entries from JSON", table.entries.len());
        Ok(table)
    }

    /// Load a table from a YAML entry sequence
    pub fn from_yaml(yaml: &str) -> Result<Self, PaytableError> {
        let entries: Vec<PaytableEntry> =
            serde_yml::from_str(yaml).map_err(|e| PaytableError::Parse(e.to_string()))?;
        let table = Self::from_entries(entries)?;
        log::debug!("loaded paytable with {} entries from YAML", table.entries.len());
        Ok(table)
    }

    /// Serialize the entry sequence as pretty JSON
    pub fn to_json(&self) -> Result<String, PaytableError> {
        serde_json::to_string_pretty(&self.entries).map_err(|e| PaytableError::Parse(e.to_string()))
    }

    /// Get the entry for a symbol, if configured
    pub fn entry(&self, symbol: SymbolKind) -> Option<&PaytableEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    /// Payout for a symbol at a consecutive-match count
    ///
    /// A 3-run of `hp3` pays 23 with the classic data; unconfigured symbols
    /// pay zero for every valid count.
    pub fn payout_for(&self, symbol: SymbolKind, match_count: u8) -> Result<u32, PaytableError> {
        if match_count as usize > PAY_STEPS {
            return Err(PaytableError::InvalidMatchCount(match_count));
        }
        match self.entry(symbol) {
            Some(entry) => entry.pay_for(match_count),
            None => Ok(0),
        }
    }

    /// All configured entries, in configuration order
    pub fn entries(&self) -> &[PaytableEntry] {
        &self.entries
    }

    /// Number of configured entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_table_is_complete() {
        let table = PayTable::classic();
        assert_eq!(table.len(), SymbolKind::COUNT);
        for kind in SymbolKind::ALL {
            let entry = table.entry(kind).expect("entry configured");
            assert_eq!(entry.pays[0], 0);
            assert_eq!(entry.pays[1], 0);
        }
    }

    #[test]
    fn test_classic_payouts() {
        let table = PayTable::classic();
        assert_eq!(table.payout_for(SymbolKind::Hp3, 3).unwrap(), 23);
        assert_eq!(table.payout_for(SymbolKind::Hp1, 5).unwrap(), 23);
        assert_eq!(table.payout_for(SymbolKind::Lp1, 3).unwrap(), 5);
        assert_eq!(table.payout_for(SymbolKind::Lp6, 4).unwrap(), 11);
        assert_eq!(table.payout_for(SymbolKind::Hp6, 5).unwrap(), 28);
    }

    #[test]
    fn test_short_runs_pay_nothing() {
        let table = PayTable::classic();
        for kind in SymbolKind::ALL {
            assert_eq!(table.payout_for(kind, 0).unwrap(), 0);
            assert_eq!(table.payout_for(kind, 1).unwrap(), 0);
            assert_eq!(table.payout_for(kind, 2).unwrap(), 0);
        }
    }

    #[test]
    fn test_invalid_match_count() {
        let table = PayTable::classic();
        let err = table.payout_for(SymbolKind::Hp1, 6).unwrap_err();
        assert!(matches!(err, PaytableError::InvalidMatchCount(6)));
        // The range check applies even to unconfigured symbols
        let partial = PayTable::from_entries(vec![]).unwrap();
        assert!(partial.payout_for(SymbolKind::Hp1, 9).is_err());
    }

    #[test]
    fn test_unconfigured_symbol_pays_zero() {
        let entries = vec![PaytableEntry::new(SymbolKind::Lp1, [0, 0, 5, 6, 7])];
        let table = PayTable::from_entries(entries).unwrap();
        assert_eq!(table.payout_for(SymbolKind::Hp1, 3).unwrap(), 0);
        assert_eq!(table.payout_for(SymbolKind::Hp1, 5).unwrap(), 0);
        assert_eq!(table.payout_for(SymbolKind::Lp1, 3).unwrap(), 5);
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let entries = vec![
            PaytableEntry::new(SymbolKind::Lp1, [0, 0, 5, 6, 7]),
            PaytableEntry::new(SymbolKind::Lp1, [0, 0, 9, 9, 9]),
        ];
        let err = PayTable::from_entries(entries).unwrap_err();
        assert!(matches!(err, PaytableError::DuplicateSymbol(SymbolKind::Lp1)));
    }

    #[test]
    fn test_json_round_trip() {
        let table = PayTable::classic();
        let json = table.to_json().unwrap();
        let reloaded = PayTable::from_json(&json).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_json_config_shape() {
        let json = r#"[
            { "symbol": "hp3", "pays": [0, 0, 23, 24, 25], "label": "Seven" },
            { "symbol": "lp1", "pays": [0, 0, 5, 6, 7] }
        ]"#;
        let table = PayTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.payout_for(SymbolKind::Hp3, 4).unwrap(), 24);
        assert_eq!(table.entry(SymbolKind::Lp1).unwrap().label, None);
    }

    #[test]
    fn test_yaml_config_shape() {
        let yaml = "
- symbol: hp1
  pays: [0, 0, 21, 22, 23]
  label: Ruby
- symbol: lp2
  pays: [0, 0, 6, 7, 8]
";
        let table = PayTable::from_yaml(yaml).unwrap();
        assert_eq!(table.payout_for(SymbolKind::Hp1, 5).unwrap(), 23);
        assert_eq!(table.payout_for(SymbolKind::Lp2, 3).unwrap(), 6);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = PayTable::from_json("not json").unwrap_err();
        assert!(matches!(err, PaytableError::Parse(_)));
    }
}

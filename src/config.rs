//! Engine configuration read from TOML.
//!
//! Every field has a default matching the built-in tables, so an empty file
//! (or `EngineConfig::default()`) is a valid configuration.

use crate::bingo::{BingoError, BingoUniverse, PatternKind};
use crate::evaluator::HandCategory;
use crate::paytable::{
    BetError, BetLimits, BonusModifier, Outcome, PayTable, PayTableError, PayTableSet,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{game} bet limits: {source}")]
    BetLimits {
        game: &'static str,
        #[source]
        source: BetError,
    },
    #[error("{game} pay tables: {source}")]
    PayTable {
        game: &'static str,
        #[source]
        source: PayTableError,
    },
    #[error("bingo universe: {0}")]
    Universe(#[from] BingoError),
    #[error("{game} bet limits: minimum {min} must be below maximum {max}")]
    BetRange { game: &'static str, min: u64, max: u64 },
    #[error("golden number factor must be at least 1, got {0}")]
    GoldenFactor(u32),
}

/// Serialized form of one pay table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayTableConfig {
    pub name: String,
    #[serde(default = "yes")]
    pub active: bool,
    #[serde(default)]
    pub default: bool,
    pub entries: BTreeMap<String, u32>,
}

fn yes() -> bool {
    true
}

impl PayTableConfig {
    fn from_table<K: Outcome>(table: &PayTable<K>) -> Self {
        Self {
            name: table.name().to_string(),
            active: table.is_active(),
            default: table.is_default(),
            entries: table.entries().map(|(k, m)| (k.key().to_string(), m)).collect(),
        }
    }

    fn to_table<K: Outcome>(&self) -> Result<PayTable<K>, PayTableError> {
        let entries = self.entries.iter().map(|(k, &m)| (k.as_str(), m));
        Ok(PayTable::from_keys(self.name.clone(), entries)?
            .with_active(self.active)
            .with_default(self.default))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PokerConfig {
    pub min_bet: u64,
    pub max_bet: u64,
    pub pay_tables: Vec<PayTableConfig>,
}

impl Default for PokerConfig {
    fn default() -> Self {
        Self {
            min_bet: 1,
            max_bet: 100,
            pay_tables: vec![
                PayTableConfig::from_table(&PayTable::standard().with_default(true)),
                PayTableConfig::from_table(&PayTable::premium()),
                PayTableConfig::from_table(&PayTable::conservative().with_active(false)),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BingoConfig {
    pub universe: u16,
    pub golden_factor: u32,
    /// Pacing hint for callers; the engine itself never sleeps.
    pub draw_interval_ms: u64,
    pub min_bet: u64,
    pub max_bet: u64,
    pub pay_tables: Vec<PayTableConfig>,
}

impl Default for BingoConfig {
    fn default() -> Self {
        Self {
            universe: u16::from(BingoUniverse::STANDARD_SIZE),
            golden_factor: BonusModifier::DEFAULT_FACTOR,
            draw_interval_ms: 3000,
            min_bet: 1,
            max_bet: 100,
            pay_tables: vec![PayTableConfig::from_table(
                &PayTable::standard_lines().with_default(true),
            )],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub poker: PokerConfig,
    pub bingo: BingoConfig,
}

/// Typed, validated configuration ready to hand to rounds.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub poker_tables: PayTableSet<HandCategory>,
    pub poker_limits: BetLimits,
    pub bingo_tables: PayTableSet<PatternKind>,
    pub bingo_limits: BetLimits,
    pub universe: BingoUniverse,
    pub golden_factor: u32,
    pub draw_interval: Duration,
}

/// Saved limits must leave a range to choose from, unlike library-built ones.
fn load_limits(game: &'static str, min: u64, max: u64) -> Result<BetLimits, ConfigError> {
    let limits =
        BetLimits::new(min, max).map_err(|source| ConfigError::BetLimits { game, source })?;
    if min == max {
        return Err(ConfigError::BetRange { game, min, max });
    }
    Ok(limits)
}

fn load_tables<K: Outcome>(
    game: &'static str,
    specs: &[PayTableConfig],
) -> Result<PayTableSet<K>, ConfigError> {
    let wrap = |source| ConfigError::PayTable { game, source };
    let tables = specs.iter().map(PayTableConfig::to_table::<K>).collect::<Result<Vec<_>, _>>();
    PayTableSet::load(tables.map_err(wrap)?).map_err(wrap)
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let cfg = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let result = self.validate_inner();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "rejected engine config");
        }
        result
    }

    fn validate_inner(&self) -> Result<ValidatedConfig, ConfigError> {
        let poker_limits = load_limits("poker", self.poker.min_bet, self.poker.max_bet)?;
        let bingo_limits = load_limits("bingo", self.bingo.min_bet, self.bingo.max_bet)?;
        let universe = BingoUniverse::new(self.bingo.universe)?;
        if self.bingo.golden_factor == 0 {
            return Err(ConfigError::GoldenFactor(0));
        }
        Ok(ValidatedConfig {
            poker_tables: load_tables("poker", &self.poker.pay_tables)?,
            poker_limits,
            bingo_tables: load_tables("bingo", &self.bingo.pay_tables)?,
            bingo_limits,
            universe,
            golden_factor: self.bingo.golden_factor,
            draw_interval: Duration::from_millis(self.bingo.draw_interval_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let v = EngineConfig::default().validate().unwrap();
        assert_eq!(v.poker_tables.len(), 3);
        assert_eq!(v.poker_tables.default_snapshot().name(), "Standard - Jacks or Better");
        assert_eq!(v.universe.size(), 75);
        assert_eq!(v.golden_factor, 2);
        assert_eq!(v.draw_interval, Duration::from_secs(3));
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn serialized_default_round_trips() {
        let text = EngineConfig::default().to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [bingo]
            universe = 90
            draw_interval_ms = 1000
            "#,
        )
        .unwrap();
        let v = cfg.validate().unwrap();
        assert_eq!(v.universe.size(), 90);
        assert_eq!(v.bingo_limits, BetLimits::default());
    }

    #[test]
    fn missing_category_names_game_and_outcome() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [[poker.pay_tables]]
            name = "Short"
            default = true
            [poker.pay_tables.entries]
            royal_flush = 800
            "#,
        )
        .unwrap();
        let err = cfg.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "poker pay tables: pay table 'Short' has no multiplier for Straight Flush"
        );
    }

    #[test]
    fn bad_limits_and_universe() {
        let mut cfg = EngineConfig::default();
        cfg.poker.min_bet = 101;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::BetLimits { game: "poker", source: BetError::InvalidLimits { .. } })
        ));
        let mut cfg = EngineConfig::default();
        cfg.bingo.min_bet = 100;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::BetRange { game: "bingo", min: 100, max: 100 })
        ));
        let mut cfg = EngineConfig::default();
        cfg.bingo.universe = 76;
        assert!(matches!(cfg.validate(), Err(ConfigError::Universe(_))));
        let mut cfg = EngineConfig::default();
        cfg.bingo.golden_factor = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::GoldenFactor(0))));
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(matches!(
            EngineConfig::from_toml_str("[poker]\nmax_bets = 3\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}

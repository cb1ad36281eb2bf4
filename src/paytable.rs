//! Pay tables, the operator-facing registry that guards their invariants,
//! bet validation and payout resolution.

use crate::bingo::{BingoCard, PatternKind};
use crate::evaluator::HandCategory;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A classified result that a pay table can price.
pub trait Outcome: Copy + Ord + fmt::Debug + fmt::Display + 'static {
    /// Outcomes every table must carry a multiplier for.
    const PAYING: &'static [Self];

    /// Stable configuration key, e.g. `royal_flush`.
    fn key(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::PAYING.iter().copied().find(|o| o.key() == key)
    }

    fn is_paying(self) -> bool {
        Self::PAYING.contains(&self)
    }
}

impl Outcome for HandCategory {
    const PAYING: &'static [Self] = &[
        HandCategory::RoyalFlush,
        HandCategory::StraightFlush,
        HandCategory::FourOfAKind,
        HandCategory::FullHouse,
        HandCategory::Flush,
        HandCategory::Straight,
        HandCategory::ThreeOfAKind,
        HandCategory::TwoPair,
        HandCategory::JacksOrBetter,
    ];

    fn key(self) -> &'static str {
        match self {
            HandCategory::RoyalFlush => "royal_flush",
            HandCategory::StraightFlush => "straight_flush",
            HandCategory::FourOfAKind => "four_of_a_kind",
            HandCategory::FullHouse => "full_house",
            HandCategory::Flush => "flush",
            HandCategory::Straight => "straight",
            HandCategory::ThreeOfAKind => "three_of_a_kind",
            HandCategory::TwoPair => "two_pair",
            HandCategory::JacksOrBetter => "jacks_or_better",
            HandCategory::NoWin => "no_win",
        }
    }
}

impl Outcome for PatternKind {
    const PAYING: &'static [Self] = &PatternKind::ALL;

    fn key(self) -> &'static str {
        match self {
            PatternKind::Row => "row",
            PatternKind::Column => "column",
            PatternKind::Diagonal => "diagonal",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PayTableError {
    #[error("pay table name must not be empty")]
    EmptyName,
    #[error("pay table '{table}' has no multiplier for {outcome}")]
    MissingOutcome { table: String, outcome: String },
    #[error("pay table '{table}' prices {outcome}, which never pays")]
    NonPayingOutcome { table: String, outcome: String },
    #[error("pay table '{table}' has unknown outcome key '{key}'")]
    UnknownOutcome { table: String, key: String },
    #[error("a pay table named '{0}' already exists")]
    DuplicateName(String),
    #[error("no pay table is marked default")]
    NoDefault,
    #[error("only one pay table may be default, found: {}", .0.join(", "))]
    MultipleDefaults(Vec<String>),
    #[error("default pay table '{0}' must be active")]
    DefaultInactive(String),
    #[error("default pay table '{0}' cannot be deleted; make another table default first")]
    DefaultNotDeletable(String),
    #[error("default pay table '{0}' cannot be deactivated; make another table default first")]
    DefaultNotDeactivatable(String),
    #[error("pay table '{0}' is inactive")]
    Inactive(String),
    #[error("no pay table named '{0}'")]
    UnknownTable(String),
    #[error("golden number factor must be at least 1, got {0}")]
    InvalidBonusFactor(u32),
}

/// Named, versioned mapping from outcome to multiplier.
///
/// Construction validates full coverage of [`Outcome::PAYING`], so any
/// `PayTable` value can be looked up without further checks.
///
/// ```
/// use bingo_poker::evaluator::HandCategory;
/// use bingo_poker::paytable::PayTable;
///
/// let table = PayTable::<HandCategory>::standard();
/// assert_eq!(table.multiplier(HandCategory::RoyalFlush), 800);
/// assert_eq!(table.multiplier(HandCategory::NoWin), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayTable<K> {
    name: String,
    version: u32,
    active: bool,
    default: bool,
    entries: BTreeMap<K, u32>,
}

impl<K: Outcome> PayTable<K> {
    /// New active, non-default table at version 1.
    pub fn new<I>(name: impl Into<String>, entries: I) -> Result<Self, PayTableError>
    where
        I: IntoIterator<Item = (K, u32)>,
    {
        let name = name.into();
        let entries = Self::checked_entries(&name, entries)?;
        Ok(Self { name, version: 1, active: true, default: false, entries })
    }

    /// Like [`PayTable::new`] but keyed by config strings.
    pub fn from_keys<'a, I>(name: impl Into<String>, entries: I) -> Result<Self, PayTableError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let name = name.into();
        let mut typed = Vec::new();
        for (key, mult) in entries {
            let outcome = K::from_key(key).ok_or_else(|| PayTableError::UnknownOutcome {
                table: name.clone(),
                key: key.to_string(),
            })?;
            typed.push((outcome, mult));
        }
        Self::new(name, typed)
    }

    fn checked_entries<I>(name: &str, entries: I) -> Result<BTreeMap<K, u32>, PayTableError>
    where
        I: IntoIterator<Item = (K, u32)>,
    {
        if name.trim().is_empty() {
            return Err(PayTableError::EmptyName);
        }
        let entries: BTreeMap<K, u32> = entries.into_iter().collect();
        if let Some(k) = entries.keys().find(|k| !k.is_paying()) {
            return Err(PayTableError::NonPayingOutcome {
                table: name.to_string(),
                outcome: k.to_string(),
            });
        }
        if let Some(k) = K::PAYING.iter().find(|k| !entries.contains_key(k)) {
            return Err(PayTableError::MissingOutcome {
                table: name.to_string(),
                outcome: k.to_string(),
            });
        }
        Ok(entries)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_default(&self) -> bool {
        self.default
    }

    /// Multiplier for `outcome`; 0 for outcomes that never pay.
    pub fn multiplier(&self, outcome: K) -> u32 {
        self.entries.get(&outcome).copied().unwrap_or(0)
    }

    /// `(outcome, multiplier)` pairs, best-paying outcome order as declared
    /// by [`Outcome::PAYING`].
    pub fn entries(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        K::PAYING.iter().map(|&k| (k, self.multiplier(k)))
    }
}

impl PayTable<HandCategory> {
    fn builtin(name: &str, mults: [u32; 9]) -> Self {
        let entries = HandCategory::PAYING.iter().copied().zip(mults);
        Self {
            name: name.to_string(),
            version: 1,
            active: true,
            default: false,
            entries: entries.collect(),
        }
    }

    /// Classic 9/6 Jacks or Better: 800/50/25/9/6/4/3/2/1.
    pub fn standard() -> Self {
        Self::builtin("Standard - Jacks or Better", [800, 50, 25, 9, 6, 4, 3, 2, 1])
    }

    pub fn premium() -> Self {
        Self::builtin("Premium - High Risk", [1200, 80, 40, 12, 8, 5, 3, 2, 1])
    }

    pub fn conservative() -> Self {
        Self::builtin("Conservative - Low Risk", [500, 40, 20, 8, 5, 4, 3, 2, 1])
    }
}

impl PayTable<PatternKind> {
    /// Every line pays 10×.
    pub fn standard_lines() -> Self {
        Self {
            name: "Standard Bingo".to_string(),
            version: 1,
            active: true,
            default: false,
            entries: PatternKind::ALL.iter().map(|&k| (k, 10)).collect(),
        }
    }
}

/// All pay tables of one game, with exactly one active default.
///
/// Edits are copy-on-write: a snapshot handed to a round keeps the contents
/// it had when taken.
#[derive(Debug, Clone)]
pub struct PayTableSet<K> {
    tables: Vec<Arc<PayTable<K>>>,
    default: usize,
}

impl<K: Outcome> PayTableSet<K> {
    /// Validate a loaded configuration: unique non-empty names, exactly one
    /// default, default active.
    pub fn load(tables: Vec<PayTable<K>>) -> Result<Self, PayTableError> {
        for (i, t) in tables.iter().enumerate() {
            if tables[..i].iter().any(|o| o.name == t.name) {
                return Err(PayTableError::DuplicateName(t.name.clone()));
            }
        }
        let defaults: Vec<usize> =
            tables.iter().enumerate().filter(|(_, t)| t.default).map(|(i, _)| i).collect();
        let default = match defaults.as_slice() {
            [] => return Err(PayTableError::NoDefault),
            [one] => *one,
            many => {
                return Err(PayTableError::MultipleDefaults(
                    many.iter().map(|&i| tables[i].name.clone()).collect(),
                ))
            }
        };
        if !tables[default].active {
            return Err(PayTableError::DefaultInactive(tables[default].name.clone()));
        }
        Ok(Self { tables: tables.into_iter().map(Arc::new).collect(), default })
    }

    /// Registry holding a single table, which becomes the default.
    pub fn single(table: PayTable<K>) -> Self {
        Self { tables: vec![Arc::new(table.with_active(true).with_default(true))], default: 0 }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PayTable<K>> + '_ {
        self.tables.iter().map(|t| t.as_ref())
    }

    fn index_of(&self, name: &str) -> Result<usize, PayTableError> {
        self.tables
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| PayTableError::UnknownTable(name.to_string()))
    }

    fn ensure_unique(&self, name: &str) -> Result<(), PayTableError> {
        if self.tables.iter().any(|t| t.name == name) {
            return Err(PayTableError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PayTable<K>> {
        self.tables.iter().find(|t| t.name == name).map(|t| t.as_ref())
    }

    /// Immutable snapshot of the default table for a round to hold.
    pub fn default_snapshot(&self) -> Arc<PayTable<K>> {
        Arc::clone(&self.tables[self.default])
    }

    /// Snapshot of a named table; it must be active.
    pub fn snapshot(&self, name: &str) -> Result<Arc<PayTable<K>>, PayTableError> {
        let t = &self.tables[self.index_of(name)?];
        if !t.active {
            return Err(PayTableError::Inactive(name.to_string()));
        }
        Ok(Arc::clone(t))
    }

    /// Add a new active, non-default table.
    pub fn create<I>(&mut self, name: &str, entries: I) -> Result<(), PayTableError>
    where
        I: IntoIterator<Item = (K, u32)>,
    {
        self.ensure_unique(name)?;
        let table = PayTable::<K>::new(name, entries)?;
        tracing::debug!(table = name, "pay table created");
        self.tables.push(Arc::new(table));
        Ok(())
    }

    /// Replace a table's multipliers; bumps its version.
    pub fn update_entries<I>(&mut self, name: &str, entries: I) -> Result<u32, PayTableError>
    where
        I: IntoIterator<Item = (K, u32)>,
    {
        let idx = self.index_of(name)?;
        let entries = PayTable::<K>::checked_entries(name, entries)?;
        let t = Arc::make_mut(&mut self.tables[idx]);
        t.entries = entries;
        t.version += 1;
        tracing::debug!(table = name, version = t.version, "pay table updated");
        Ok(t.version)
    }

    pub fn rename(&mut self, name: &str, new_name: &str) -> Result<(), PayTableError> {
        if new_name.trim().is_empty() {
            return Err(PayTableError::EmptyName);
        }
        let idx = self.index_of(name)?;
        if name != new_name {
            self.ensure_unique(new_name)?;
        }
        let t = Arc::make_mut(&mut self.tables[idx]);
        t.name = new_name.to_string();
        t.version += 1;
        Ok(())
    }

    /// Copy a table as `"<name> (copy)"`, inactive and not default.
    /// Returns the new name.
    pub fn duplicate(&mut self, name: &str) -> Result<String, PayTableError> {
        let src = &self.tables[self.index_of(name)?];
        let mut new_name = format!("{name} (copy)");
        let mut n = 2;
        while self.tables.iter().any(|t| t.name == new_name) {
            new_name = format!("{name} (copy {n})");
            n += 1;
        }
        let copy = PayTable {
            name: new_name.clone(),
            version: 1,
            active: false,
            default: false,
            entries: src.entries.clone(),
        };
        self.tables.push(Arc::new(copy));
        Ok(new_name)
    }

    pub fn set_active(&mut self, name: &str, active: bool) -> Result<(), PayTableError> {
        let idx = self.index_of(name)?;
        if idx == self.default && !active {
            tracing::warn!(table = name, "refusing to deactivate default pay table");
            return Err(PayTableError::DefaultNotDeactivatable(name.to_string()));
        }
        if self.tables[idx].active != active {
            Arc::make_mut(&mut self.tables[idx]).active = active;
        }
        Ok(())
    }

    /// Make `name` the only default; it is activated if needed.
    pub fn set_default(&mut self, name: &str) -> Result<(), PayTableError> {
        let idx = self.index_of(name)?;
        if idx == self.default {
            return Ok(());
        }
        Arc::make_mut(&mut self.tables[self.default]).default = false;
        let t = Arc::make_mut(&mut self.tables[idx]);
        t.default = true;
        t.active = true;
        self.default = idx;
        tracing::debug!(table = name, "default pay table changed");
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<(), PayTableError> {
        let idx = self.index_of(name)?;
        if idx == self.default {
            tracing::warn!(table = name, "refusing to delete default pay table");
            return Err(PayTableError::DefaultNotDeletable(name.to_string()));
        }
        self.tables.remove(idx);
        if idx < self.default {
            self.default -= 1;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BetError {
    #[error("bet must be greater than zero")]
    Zero,
    #[error("bet {got} is below the table minimum of {min}")]
    BelowMin { min: u64, got: u64 },
    #[error("bet {got} is above the table maximum of {max}")]
    AboveMax { max: u64, got: u64 },
    #[error("invalid bet limits: minimum {min} must be positive and not above maximum {max}")]
    InvalidLimits { min: u64, max: u64 },
}

/// Configured bet bounds for a game. `min == max` is a fixed stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetLimits {
    min: u64,
    max: u64,
}

impl BetLimits {
    pub fn new(min: u64, max: u64) -> Result<Self, BetError> {
        if min == 0 || min > max {
            return Err(BetError::InvalidLimits { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }
}

impl Default for BetLimits {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}

/// A stake that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bet(u64);

impl Bet {
    pub fn new(amount: u64, limits: &BetLimits) -> Result<Self, BetError> {
        if amount == 0 {
            return Err(BetError::Zero);
        }
        if amount < limits.min {
            return Err(BetError::BelowMin { min: limits.min, got: amount });
        }
        if amount > limits.max {
            return Err(BetError::AboveMax { max: limits.max, got: amount });
        }
        Ok(Self(amount))
    }

    /// Any positive stake, for callers that enforce limits themselves.
    pub fn unbounded(amount: u64) -> Result<Self, BetError> {
        if amount == 0 {
            return Err(BetError::Zero);
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> u64 {
        self.0
    }
}

/// `multiplier × bet`; 0 for outcomes that never pay.
///
/// ```
/// use bingo_poker::evaluator::HandCategory;
/// use bingo_poker::paytable::{payout, Bet, PayTable};
///
/// let table = PayTable::<HandCategory>::standard();
/// let bet = Bet::unbounded(10).unwrap();
/// assert_eq!(payout(HandCategory::RoyalFlush, &table, bet), 8000);
/// assert_eq!(payout(HandCategory::NoWin, &table, bet), 0);
/// ```
pub fn payout<K: Outcome>(outcome: K, table: &PayTable<K>, bet: Bet) -> u64 {
    u64::from(table.multiplier(outcome)).saturating_mul(bet.amount())
}

/// Highest payout among simultaneously achieved outcomes. Simultaneous
/// outcomes never add up.
pub fn best_payout<K, I>(outcomes: I, table: &PayTable<K>, bet: Bet) -> Option<(K, u64)>
where
    K: Outcome,
    I: IntoIterator<Item = K>,
{
    outcomes.into_iter().map(|k| (k, payout(k, table, bet))).max_by_key(|&(k, amount)| (amount, k))
}

/// Golden-number bonus for jackpot bingo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusModifier {
    golden: u8,
    factor: u32,
}

impl BonusModifier {
    pub const DEFAULT_FACTOR: u32 = 2;

    /// A factor of 0 would turn the bonus into a forfeit and is rejected.
    pub fn new(golden: u8, factor: u32) -> Result<Self, PayTableError> {
        Self::check_factor(factor)?;
        Ok(Self { golden, factor })
    }

    pub fn check_factor(factor: u32) -> Result<u32, PayTableError> {
        if factor == 0 {
            return Err(PayTableError::InvalidBonusFactor(factor));
        }
        Ok(factor)
    }

    pub fn golden(&self) -> u8 {
        self.golden
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// The golden number was called this round and sits on the winning card.
    pub fn applies(&self, history: &[u8], card: &BingoCard) -> bool {
        history.contains(&self.golden) && card.contains(self.golden)
    }

    /// Scale `base` once if the bonus applies. Returns the amount and
    /// whether the bonus fired.
    pub fn apply(&self, base: u64, history: &[u8], card: &BingoCard) -> (u64, bool) {
        if self.applies(history, card) {
            (base.saturating_mul(u64::from(self.factor)), true)
        } else {
            (base, false)
        }
    }
}

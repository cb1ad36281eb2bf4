//! One bingo round: cards, calls and settlement.

use super::{has_win, winning_patterns, BingoCard, BingoError, BingoUniverse, DrawSequence};
use super::{MarkedSet, PatternKind, WinPattern};
use crate::paytable::{best_payout, Bet, BonusModifier, PayTable, PayTableError};
use crate::rng::{RandomSource, RngError};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Drawing,
    Won,
    Exhausted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Drawing => "drawing",
            Phase::Won => "won",
            Phase::Exhausted => "exhausted",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("cannot {action} while the round is {phase}")]
    WrongPhase { action: &'static str, phase: Phase },
    #[error("a round needs at least one card")]
    NoCards,
    #[error(transparent)]
    Bingo(#[from] BingoError),
    #[error(transparent)]
    PayTable(#[from] PayTableError),
    #[error(transparent)]
    Rng(#[from] RngError),
}

/// A card in play with its marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    pub card: BingoCard,
    pub marked: MarkedSet,
    /// Patterns completed on the winning draw; `None` until the card wins.
    pub won: Option<Vec<WinPattern>>,
}

impl CardState {
    fn new(card: BingoCard) -> Self {
        Self { card, marked: MarkedSet::new(), won: None }
    }
}

/// What one call did to the cards in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawReport {
    pub number: u8,
    /// Indices of cards that held the number.
    pub marked_cards: Vec<usize>,
    /// Indices of cards that completed a line on this call.
    pub winners: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// No line yet; keep drawing.
    Drawn(DrawReport),
    /// At least one card completed a line.
    Won(DrawReport),
    /// The last number was called without a line.
    Exhausted(DrawReport),
}

impl DrawOutcome {
    pub fn report(&self) -> &DrawReport {
        match self {
            DrawOutcome::Drawn(r) | DrawOutcome::Won(r) | DrawOutcome::Exhausted(r) => r,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPayout {
    pub card_index: usize,
    pub patterns: Vec<WinPattern>,
    /// Best-paying pattern kind among `patterns`.
    pub kind: PatternKind,
    pub base: u64,
    pub bonus_applied: bool,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub payouts: Vec<CardPayout>,
    pub total: u64,
}

/// Round state machine `Idle → Drawing → Won | Exhausted`.
///
/// ```
/// use bingo_poker::bingo::round::{BingoRound, DrawOutcome};
/// use bingo_poker::bingo::BingoUniverse;
/// use bingo_poker::paytable::{Bet, PayTable};
/// use bingo_poker::rng::RngSource;
/// use std::sync::Arc;
///
/// let mut rng = RngSource::seeded(3);
/// let universe = BingoUniverse::standard();
/// let mut round = BingoRound::new(universe, Arc::new(PayTable::standard_lines()), 2).unwrap();
/// let cards = BingoRound::deal_cards(universe, 4, &mut rng).unwrap();
/// round.start(cards, &mut rng).unwrap();
/// loop {
///     match round.draw_next(&mut rng).unwrap() {
///         DrawOutcome::Drawn(_) => continue,
///         DrawOutcome::Won(_) => {
///             let settled = round.settle(Bet::unbounded(1).unwrap()).unwrap();
///             assert!(settled.total >= 10);
///             break;
///         }
///         DrawOutcome::Exhausted(_) => break,
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BingoRound {
    universe: BingoUniverse,
    table: Arc<PayTable<PatternKind>>,
    bonus_factor: u32,
    phase: Phase,
    cards: Vec<CardState>,
    draws: DrawSequence,
    golden: Option<u8>,
}

impl BingoRound {
    /// Fails when `bonus_factor` is 0.
    pub fn new(
        universe: BingoUniverse,
        table: Arc<PayTable<PatternKind>>,
        bonus_factor: u32,
    ) -> Result<Self, RoundError> {
        Ok(Self {
            universe,
            table,
            bonus_factor: BonusModifier::check_factor(bonus_factor)?,
            phase: Phase::Idle,
            cards: Vec::new(),
            draws: DrawSequence::new(universe),
            golden: None,
        })
    }

    /// Generate `count` fresh cards for `universe`.
    pub fn deal_cards<S>(
        universe: BingoUniverse,
        count: usize,
        rng: &mut S,
    ) -> Result<Vec<BingoCard>, BingoError>
    where
        S: RandomSource + ?Sized,
    {
        let ranges = universe.columns();
        (0..count).map(|_| BingoCard::generate(&ranges, rng)).collect()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn universe(&self) -> BingoUniverse {
        self.universe
    }

    pub fn cards(&self) -> &[CardState] {
        &self.cards
    }

    pub fn history(&self) -> &[u8] {
        self.draws.history()
    }

    pub fn last(&self) -> Option<u8> {
        self.draws.last()
    }

    pub fn golden_number(&self) -> Option<u8> {
        self.golden
    }

    pub fn pay_table(&self) -> &Arc<PayTable<PatternKind>> {
        &self.table
    }

    /// Swap the pay table snapshot between rounds.
    pub fn set_pay_table(&mut self, table: Arc<PayTable<PatternKind>>) -> Result<(), RoundError> {
        self.expect_phase(Phase::Idle, "change pay table")?;
        self.table = table;
        Ok(())
    }

    fn expect_phase(&self, want: Phase, action: &'static str) -> Result<(), RoundError> {
        if self.phase == want {
            Ok(())
        } else {
            Err(RoundError::WrongPhase { action, phase: self.phase })
        }
    }

    /// Put `cards` in play and pick the golden number.
    pub fn start<S>(&mut self, cards: Vec<BingoCard>, rng: &mut S) -> Result<(), RoundError>
    where
        S: RandomSource + ?Sized,
    {
        self.expect_phase(Phase::Idle, "start")?;
        if cards.is_empty() {
            return Err(RoundError::NoCards);
        }
        let size = usize::from(self.universe.size());
        let golden = 1 + rng.uniform_index(size - 1)? as u8;
        self.golden = Some(golden);
        self.cards = cards.into_iter().map(CardState::new).collect();
        self.draws = DrawSequence::new(self.universe);
        self.phase = Phase::Drawing;
        tracing::debug!(cards = self.cards.len(), golden, "bingo round started");
        Ok(())
    }

    /// Call the next number and mark every card holding it.
    pub fn draw_next<S>(&mut self, rng: &mut S) -> Result<DrawOutcome, RoundError>
    where
        S: RandomSource + ?Sized,
    {
        self.expect_phase(Phase::Drawing, "draw")?;
        let number = self.draws.draw_next(rng)?;
        let mut report = DrawReport { number, marked_cards: Vec::new(), winners: Vec::new() };
        for (i, state) in self.cards.iter_mut().enumerate() {
            if state.card.mark(number, &mut state.marked).is_none() {
                continue;
            }
            report.marked_cards.push(i);
            if state.won.is_none() && has_win(&state.marked) {
                state.won = Some(winning_patterns(&state.marked));
                report.winners.push(i);
            }
        }

        let outcome = if !report.winners.is_empty() {
            self.phase = Phase::Won;
            tracing::debug!(number, winners = ?report.winners, calls = self.draws.history().len(), "bingo");
            DrawOutcome::Won(report)
        } else if self.draws.is_exhausted() {
            self.phase = Phase::Exhausted;
            tracing::debug!(calls = self.draws.history().len(), "draw universe exhausted without a line");
            DrawOutcome::Exhausted(report)
        } else {
            DrawOutcome::Drawn(report)
        };
        Ok(outcome)
    }

    /// Per-card payouts for the winning cards.
    ///
    /// Each card pays its best pattern kind; the golden bonus scales that
    /// amount at most once.
    pub fn settle(&self, bet: Bet) -> Result<Settlement, RoundError> {
        self.expect_phase(Phase::Won, "settle")?;
        let bonus = self.golden.map(|g| BonusModifier::new(g, self.bonus_factor)).transpose()?;
        let history = self.draws.history();
        let mut payouts = Vec::new();
        for (card_index, state) in self.cards.iter().enumerate() {
            let Some(patterns) = &state.won else { continue };
            let best = best_payout(patterns.iter().map(|p| p.kind()), &*self.table, bet);
            let Some((kind, base)) = best else { continue };
            let (amount, bonus_applied) = match bonus {
                Some(b) => b.apply(base, history, &state.card),
                None => (base, false),
            };
            payouts.push(CardPayout {
                card_index,
                patterns: patterns.clone(),
                kind,
                base,
                bonus_applied,
                amount,
            });
        }
        let total = payouts.iter().fold(0u64, |acc, p| acc.saturating_add(p.amount));
        tracing::info!(
            table = self.table.name(),
            bet = bet.amount(),
            winners = payouts.len(),
            total,
            "bingo round settled"
        );
        Ok(Settlement { payouts, total })
    }

    /// Clear a finished round back to `Idle`.
    pub fn reset(&mut self) -> Result<(), RoundError> {
        if !matches!(self.phase, Phase::Won | Phase::Exhausted) {
            return Err(RoundError::WrongPhase { action: "reset", phase: self.phase });
        }
        self.cards.clear();
        self.draws = DrawSequence::new(self.universe);
        self.golden = None;
        self.phase = Phase::Idle;
        tracing::debug!("bingo round reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::tests::Scripted;
    use crate::rng::RngSource;

    fn round() -> BingoRound {
        BingoRound::new(BingoUniverse::standard(), Arc::new(PayTable::standard_lines()), 2).unwrap()
    }

    fn card() -> BingoCard {
        BingoCard::from_columns(
            [
                [1, 2, 3, 4, 5],
                [16, 17, 18, 19, 20],
                [31, 32, 0, 34, 35],
                [46, 47, 48, 49, 50],
                [61, 62, 63, 64, 65],
            ],
            &BingoUniverse::standard().columns(),
        )
        .unwrap()
    }

    #[test]
    fn wrong_phase_calls_are_rejected() {
        let mut r = round();
        let mut rng = RngSource::seeded(1);
        assert_eq!(
            r.draw_next(&mut rng),
            Err(RoundError::WrongPhase { action: "draw", phase: Phase::Idle })
        );
        assert!(matches!(r.settle(Bet::unbounded(1).unwrap()), Err(RoundError::WrongPhase { .. })));
        assert!(matches!(r.reset(), Err(RoundError::WrongPhase { .. })));
        assert_eq!(r.start(Vec::new(), &mut rng), Err(RoundError::NoCards));
        r.start(vec![card()], &mut rng).unwrap();
        assert!(matches!(r.start(vec![card()], &mut rng), Err(RoundError::WrongPhase { .. })));
        assert!(matches!(
            r.set_pay_table(Arc::new(PayTable::standard_lines())),
            Err(RoundError::WrongPhase { .. })
        ));
    }

    #[test]
    fn zero_bonus_factor_is_rejected() {
        let table = Arc::new(PayTable::standard_lines());
        assert!(matches!(
            BingoRound::new(BingoUniverse::standard(), table, 0),
            Err(RoundError::PayTable(PayTableError::InvalidBonusFactor(0)))
        ));
    }

    #[test]
    fn golden_number_in_universe() {
        let mut r = round();
        r.start(vec![card()], &mut Scripted(vec![74])).unwrap();
        assert_eq!(r.golden_number(), Some(75));
        assert_eq!(r.phase(), Phase::Drawing);
        assert_eq!(r.cards()[0].marked.count(), 1);
    }

    #[test]
    fn card_never_wins_twice() {
        let mut r = round();
        let mut rng = RngSource::seeded(21);
        r.start(vec![card(), card()], &mut rng).unwrap();
        let outcome = loop {
            match r.draw_next(&mut rng).unwrap() {
                DrawOutcome::Drawn(_) => {}
                other => break other,
            }
        };
        // Identical cards complete the same line on the same call.
        let DrawOutcome::Won(report) = outcome else { panic!("expected a win") };
        assert_eq!(report.winners, vec![0, 1]);
        assert_eq!(r.phase(), Phase::Won);
        assert!(matches!(r.draw_next(&mut rng), Err(RoundError::WrongPhase { .. })));
    }

    #[test]
    fn reset_clears_round() {
        let mut r = round();
        let mut rng = RngSource::seeded(4);
        r.start(vec![card()], &mut rng).unwrap();
        while let DrawOutcome::Drawn(_) = r.draw_next(&mut rng).unwrap() {}
        r.reset().unwrap();
        assert_eq!(r.phase(), Phase::Idle);
        assert!(r.history().is_empty());
        assert!(r.cards().is_empty());
        assert_eq!(r.golden_number(), None);
        r.set_pay_table(Arc::new(PayTable::standard_lines())).unwrap();
    }
}

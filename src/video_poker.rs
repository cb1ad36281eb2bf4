//! Jacks-or-better video poker: deal five, hold any, draw once.

use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate, HandCategory};
use crate::hand::{Hand, HandError};
use crate::paytable::{payout, Bet, PayTable};
use crate::rng::{RandomSource, RngError};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Betting,
    Dealt,
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Betting => "betting",
            Phase::Dealt => "dealt",
            Phase::Resolved => "resolved",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("cannot {action} while the round is {phase}")]
    WrongPhase { action: &'static str, phase: Phase },
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Rng(#[from] RngError),
}

/// Final hand of a resolved round and what it paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub hand: Hand,
    pub category: HandCategory,
    pub bet: Bet,
    pub payout: u64,
}

impl RoundResult {
    pub fn is_win(&self) -> bool {
        self.payout > 0
    }
}

#[derive(Debug, Clone)]
enum State {
    Betting,
    Dealt { bet: Bet, deck: Deck, hand: Hand },
    Resolved(RoundResult),
}

/// One video poker round, `Betting → Dealt → Resolved`.
///
/// ```
/// use bingo_poker::cards::parse_cards;
/// use bingo_poker::deck::Deck;
/// use bingo_poker::evaluator::HandCategory;
/// use bingo_poker::paytable::{Bet, PayTable};
/// use bingo_poker::video_poker::VideoPokerRound;
/// use std::sync::Arc;
///
/// let mut round = VideoPokerRound::new(Arc::new(PayTable::standard()));
/// let deck = Deck::stacked(&parse_cards("As Ks Qs Js 10s").unwrap());
/// round.deal_from(Bet::unbounded(5).unwrap(), deck).unwrap();
/// for i in 0..5 {
///     round.set_held(i, true).unwrap();
/// }
/// let result = round.draw().unwrap();
/// assert_eq!(result.category, HandCategory::RoyalFlush);
/// assert_eq!(result.payout, 4000);
/// ```
#[derive(Debug, Clone)]
pub struct VideoPokerRound {
    table: Arc<PayTable<HandCategory>>,
    state: State,
}

impl VideoPokerRound {
    pub fn new(table: Arc<PayTable<HandCategory>>) -> Self {
        Self { table, state: State::Betting }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Betting => Phase::Betting,
            State::Dealt { .. } => Phase::Dealt,
            State::Resolved(_) => Phase::Resolved,
        }
    }

    pub fn pay_table(&self) -> &Arc<PayTable<HandCategory>> {
        &self.table
    }

    /// Swap the pay table snapshot; only between rounds.
    pub fn set_pay_table(&mut self, table: Arc<PayTable<HandCategory>>) -> Result<(), RoundError> {
        self.expect_phase(Phase::Betting, "change pay table")?;
        self.table = table;
        Ok(())
    }

    /// Current hand: the dealt hand while holding, the final hand once resolved.
    pub fn hand(&self) -> Option<&Hand> {
        match &self.state {
            State::Betting => None,
            State::Dealt { hand, .. } => Some(hand),
            State::Resolved(r) => Some(&r.hand),
        }
    }

    pub fn bet(&self) -> Option<Bet> {
        match &self.state {
            State::Betting => None,
            State::Dealt { bet, .. } => Some(*bet),
            State::Resolved(r) => Some(r.bet),
        }
    }

    pub fn result(&self) -> Option<&RoundResult> {
        match &self.state {
            State::Resolved(r) => Some(r),
            _ => None,
        }
    }

    /// Category of the hand as it stands, for hinting before the draw.
    pub fn current_category(&self) -> Option<HandCategory> {
        self.hand().map(evaluate)
    }

    fn expect_phase(&self, want: Phase, action: &'static str) -> Result<(), RoundError> {
        let phase = self.phase();
        if phase == want {
            Ok(())
        } else {
            Err(RoundError::WrongPhase { action, phase })
        }
    }

    /// Shuffle a fresh deck and deal five cards.
    pub fn deal<S>(&mut self, bet: Bet, rng: &mut S) -> Result<Hand, RoundError>
    where
        S: RandomSource + ?Sized,
    {
        self.expect_phase(Phase::Betting, "deal")?;
        let deck = Deck::shuffled(rng)?;
        self.deal_from(bet, deck)
    }

    /// Deal five cards from a caller-supplied deck.
    pub fn deal_from(&mut self, bet: Bet, mut deck: Deck) -> Result<Hand, RoundError> {
        self.expect_phase(Phase::Betting, "deal")?;
        let hand = deck.deal_hand()?;
        tracing::debug!(bet = bet.amount(), %hand, "poker hand dealt");
        self.state = State::Dealt { bet, deck, hand };
        Ok(hand)
    }

    fn dealt_hand(&mut self, action: &'static str) -> Result<&mut Hand, RoundError> {
        match &mut self.state {
            State::Dealt { hand, .. } => Ok(hand),
            State::Betting => Err(RoundError::WrongPhase { action, phase: Phase::Betting }),
            State::Resolved(_) => Err(RoundError::WrongPhase { action, phase: Phase::Resolved }),
        }
    }

    /// Flip the hold flag at `index`, returning the new flag.
    pub fn toggle_hold(&mut self, index: usize) -> Result<bool, RoundError> {
        Ok(self.dealt_hand("hold")?.toggle_hold(index)?)
    }

    pub fn set_held(&mut self, index: usize, held: bool) -> Result<(), RoundError> {
        Ok(self.dealt_hand("hold")?.set_held(index, held)?)
    }

    /// Replace every unheld card, evaluate and pay. Happens exactly once.
    pub fn draw(&mut self) -> Result<RoundResult, RoundError> {
        let phase = self.phase();
        let State::Dealt { bet, deck, hand } = &mut self.state else {
            return Err(RoundError::WrongPhase { action: "draw", phase });
        };
        let mut final_hand = *hand;
        let replaced = final_hand.redraw(deck)?;
        let category = evaluate(&final_hand);
        let result = RoundResult {
            hand: final_hand,
            category,
            bet: *bet,
            payout: payout(category, &*self.table, *bet),
        };
        tracing::debug!(replaced, hand = %final_hand, "poker hand redrawn");
        tracing::info!(
            table = self.table.name(),
            bet = result.bet.amount(),
            %category,
            payout = result.payout,
            "poker round settled"
        );
        self.state = State::Resolved(result);
        Ok(result)
    }

    /// Return a resolved round to `Betting`.
    pub fn reset(&mut self) -> Result<(), RoundError> {
        self.expect_phase(Phase::Resolved, "reset")?;
        self.state = State::Betting;
        tracing::debug!("poker round reset");
        Ok(())
    }
}

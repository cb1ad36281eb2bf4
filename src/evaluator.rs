//! Jacks-or-Better hand classification.
//!
//! Checks run strictly from the best-paying category down, so a hand is
//! always reported at the highest category it satisfies.

pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::Card;
use crate::hand::Hand;
use rank_groups::RankGroups;
use std::fmt;
use straight_info::StraightInfo;
use suit_info::SuitInfo;

/// Video-poker hand category, ordered by payout rank (`NoWin` lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HandCategory {
    NoWin = 0,
    JacksOrBetter = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    /// Every category, best first.
    pub const ALL: [HandCategory; 10] = [
        HandCategory::RoyalFlush,
        HandCategory::StraightFlush,
        HandCategory::FourOfAKind,
        HandCategory::FullHouse,
        HandCategory::Flush,
        HandCategory::Straight,
        HandCategory::ThreeOfAKind,
        HandCategory::TwoPair,
        HandCategory::JacksOrBetter,
        HandCategory::NoWin,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn is_win(self) -> bool {
        !matches!(self, HandCategory::NoWin)
    }

    pub const fn label(self) -> &'static str {
        match self {
            HandCategory::RoyalFlush => "Royal Flush",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Flush => "Flush",
            HandCategory::Straight => "Straight",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::JacksOrBetter => "Jacks or Better",
            HandCategory::NoWin => "No Win",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a dealt or redrawn hand. Hold flags are ignored.
///
/// ```
/// use bingo_poker::evaluator::{evaluate, HandCategory};
/// use bingo_poker::hand::Hand;
///
/// let hand: Hand = "As Ks Qs Js 10s".parse().unwrap();
/// assert_eq!(evaluate(&hand), HandCategory::RoyalFlush);
/// ```
pub fn evaluate(hand: &Hand) -> HandCategory {
    evaluate_cards(&hand.cards())
}

/// Classify exactly five cards.
pub fn evaluate_cards(cards: &[Card; 5]) -> HandCategory {
    let ranks = cards.map(|c| c.rank());
    let suit = SuitInfo::detect(cards);
    let straight = StraightInfo::detect(&ranks);
    let groups = RankGroups::from_ranks(&ranks);
    let shape = groups.multiplicities();

    if suit.is_flush() && straight.is_straight {
        if straight.is_broadway() {
            return HandCategory::RoyalFlush;
        }
        return HandCategory::StraightFlush;
    }
    if groups.max_multiplicity() == 4 {
        return HandCategory::FourOfAKind;
    }
    if shape == [3, 2] {
        return HandCategory::FullHouse;
    }
    if suit.is_flush() {
        return HandCategory::Flush;
    }
    if straight.is_straight {
        return HandCategory::Straight;
    }
    if groups.max_multiplicity() == 3 {
        return HandCategory::ThreeOfAKind;
    }
    if shape == [2, 2, 1] {
        return HandCategory::TwoPair;
    }
    if groups.pairs().any(|r| r.is_jack_or_better()) {
        return HandCategory::JacksOrBetter;
    }
    HandCategory::NoWin
}

use crate::cards::{parse_cards, Card};
use crate::deck::{Deck, DeckError};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("expected exactly five cards, got {0}")]
    CardCount(usize),
    #[error("duplicate cards in hand")]
    DuplicateCards,
    #[error("hold index {0} out of range (0..5)")]
    IndexOutOfRange(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// One position of a video-poker hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub card: Card,
    pub held: bool,
}

/// Five cards, each flagged held or not between the deal and the redraw.
///
/// ```
/// use bingo_poker::hand::Hand;
///
/// let mut hand: Hand = "As Ks Qs Js 10s".parse().unwrap();
/// hand.toggle_hold(0).unwrap();
/// assert_eq!(hand.held_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    slots: [Slot; Hand::SIZE],
}

impl Hand {
    pub const SIZE: usize = 5;

    /// Callers guarantee the cards are distinct, as a deck deal does.
    pub(crate) fn new(cards: [Card; Hand::SIZE]) -> Self {
        Self { slots: cards.map(|card| Slot { card, held: false }) }
    }

    pub fn try_from_slice(cards: &[Card]) -> Result<Self, HandError> {
        let arr: [Card; Hand::SIZE] =
            cards.try_into().map_err(|_| HandError::CardCount(cards.len()))?;
        let set: HashSet<Card> = arr.iter().copied().collect();
        if set.len() != Hand::SIZE {
            return Err(HandError::DuplicateCards);
        }
        Ok(Self::new(arr))
    }

    pub fn cards(&self) -> [Card; Hand::SIZE] {
        self.slots.map(|s| s.card)
    }

    pub fn slots(&self) -> &[Slot; Hand::SIZE] {
        &self.slots
    }

    pub fn is_held(&self, index: usize) -> Result<bool, HandError> {
        self.slots.get(index).map(|s| s.held).ok_or(HandError::IndexOutOfRange(index))
    }

    pub fn toggle_hold(&mut self, index: usize) -> Result<bool, HandError> {
        let slot = self.slots.get_mut(index).ok_or(HandError::IndexOutOfRange(index))?;
        slot.held = !slot.held;
        Ok(slot.held)
    }

    pub fn set_held(&mut self, index: usize, held: bool) -> Result<(), HandError> {
        let slot = self.slots.get_mut(index).ok_or(HandError::IndexOutOfRange(index))?;
        slot.held = held;
        Ok(())
    }

    pub fn held_count(&self) -> usize {
        self.slots.iter().filter(|s| s.held).count()
    }

    /// Replace every non-held card in place from `deck`, keeping slot order
    /// and hold flags. Consumes exactly one deck position per replaced card
    /// and returns how many were replaced. The hand is untouched on error.
    pub fn redraw(&mut self, deck: &mut Deck) -> Result<usize, DeckError> {
        let replace = Hand::SIZE - self.held_count();
        let mut fresh = deck.deal(replace)?.into_iter();
        for slot in self.slots.iter_mut().filter(|s| !s.held) {
            if let Some(card) = fresh.next() {
                slot.card = card;
            }
        }
        Ok(replace)
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Hand::try_from_slice(&cards)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", slot.card)?;
            if slot.held {
                f.write_str("*")?;
            }
        }
        Ok(())
    }
}

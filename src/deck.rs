use crate::cards::{Card, Rank, Suit};
use crate::hand::Hand;
use crate::rng::{shuffle, RandomSource, RngError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: requested {requested} cards, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
}

/// A standard 52-card deck with a deal cursor.
///
/// Cards before the cursor have been dealt; the cursor never passes 52.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    pub const SIZE: usize = 52;

    /// Unshuffled deck in suit-major order.
    ///
    /// ```
    /// use bingo_poker::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards, cursor: 0 }
    }

    /// Fresh deck, uniformly shuffled.
    pub fn shuffled<S: RandomSource + ?Sized>(rng: &mut S) -> Result<Self, RngError> {
        let mut deck = Self::standard();
        shuffle(&mut deck.cards, rng)?;
        Ok(deck)
    }

    /// Deck whose first cards are `top`, in order, followed by the rest of a
    /// standard deck. Duplicates in `top` are dropped.
    ///
    /// ```
    /// use bingo_poker::cards::parse_cards;
    /// use bingo_poker::deck::Deck;
    ///
    /// let top = parse_cards("As Ks").unwrap();
    /// let mut deck = Deck::stacked(&top);
    /// assert_eq!(deck.deal(2).unwrap(), top);
    /// assert_eq!(deck.remaining(), 50);
    /// ```
    pub fn stacked(top: &[Card]) -> Self {
        let mut cards: Vec<Card> = Vec::with_capacity(Self::SIZE);
        for &c in top {
            if !cards.contains(&c) {
                cards.push(c);
            }
        }
        let rest: Vec<Card> =
            Self::standard().cards.into_iter().filter(|c| !cards.contains(c)).collect();
        cards.extend(rest);
        Self { cards, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    pub fn dealt(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Cards not yet dealt, in deal order.
    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.cursor..]
    }

    /// Take the next `n` cards and advance the cursor. On failure the cursor
    /// does not move.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DeckError::Exhausted { requested: n, remaining });
        }
        let out = self.cards[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Ok(out)
    }

    pub fn deal_one(&mut self) -> Result<Card, DeckError> {
        let card = *self
            .cards
            .get(self.cursor)
            .ok_or(DeckError::Exhausted { requested: 1, remaining: 0 })?;
        self.cursor += 1;
        Ok(card)
    }

    /// Deal a five-card hand with nothing held.
    pub fn deal_hand(&mut self) -> Result<Hand, DeckError> {
        let remaining = self.remaining();
        if remaining < Hand::SIZE {
            return Err(DeckError::Exhausted { requested: Hand::SIZE, remaining });
        }
        let mut cards = [self.cards[self.cursor]; Hand::SIZE];
        cards.copy_from_slice(&self.cards[self.cursor..self.cursor + Hand::SIZE]);
        self.cursor += Hand::SIZE;
        Ok(Hand::new(cards))
    }
}

use super::{BingoError, BingoUniverse};
use crate::rng::RandomSource;

/// Non-repeating ball draw over a universe.
///
/// Each draw is one lazy Fisher–Yates step over the numbers not yet called,
/// so every remaining number is equally likely. The sequence cannot be
/// rewound; start a new one for a new round.
#[derive(Debug, Clone)]
pub struct DrawSequence {
    pool: Vec<u8>,
    cursor: usize,
}

impl DrawSequence {
    pub fn new(universe: BingoUniverse) -> Self {
        Self { pool: (1..=universe.size()).collect(), cursor: 0 }
    }

    pub fn size(&self) -> usize {
        self.pool.len()
    }

    pub fn remaining(&self) -> usize {
        self.pool.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Numbers called so far, in call order.
    pub fn history(&self) -> &[u8] {
        &self.pool[..self.cursor]
    }

    pub fn last(&self) -> Option<u8> {
        self.history().last().copied()
    }

    pub fn was_drawn(&self, n: u8) -> bool {
        self.history().contains(&n)
    }

    /// Reveal the next number.
    pub fn draw_next<S>(&mut self, rng: &mut S) -> Result<u8, BingoError>
    where
        S: RandomSource + ?Sized,
    {
        if self.is_exhausted() {
            return Err(BingoError::DrawUniverseExhausted { size: self.pool.len() as u8 });
        }
        let j = self.cursor + rng.uniform_index(self.remaining() - 1)?;
        self.pool.swap(self.cursor, j);
        let n = self.pool[self.cursor];
        self.cursor += 1;
        Ok(n)
    }

    /// Iterator view that draws until the universe is exhausted.
    pub fn draws<'a, S>(&'a mut self, rng: &'a mut S) -> Draws<'a, S>
    where
        S: RandomSource + ?Sized,
    {
        Draws { seq: self, rng }
    }
}

pub struct Draws<'a, S: ?Sized> {
    seq: &'a mut DrawSequence,
    rng: &'a mut S,
}

impl<S: RandomSource + ?Sized> Iterator for Draws<'_, S> {
    type Item = Result<u8, BingoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.seq.is_exhausted() {
            return None;
        }
        Some(self.seq.draw_next(&mut *self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.seq.remaining();
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngSource;

    #[test]
    fn full_sequence_is_a_permutation() {
        let mut seq = DrawSequence::new(BingoUniverse::standard());
        let mut rng = RngSource::seeded(1);
        let all: Vec<u8> = seq.draws(&mut rng).collect::<Result<_, _>>().unwrap();
        assert_eq!(all.len(), 75);
        let mut sorted = all.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=75).collect::<Vec<u8>>());
        assert_eq!(seq.history(), &all[..]);
    }

    #[test]
    fn exhaustion_is_reported() {
        let mut seq = DrawSequence::new(BingoUniverse::new(25).unwrap());
        let mut rng = RngSource::seeded(2);
        for _ in 0..25 {
            seq.draw_next(&mut rng).unwrap();
        }
        assert!(seq.is_exhausted());
        assert_eq!(seq.draw_next(&mut rng), Err(BingoError::DrawUniverseExhausted { size: 25 }));
        assert_eq!(seq.draws(&mut rng).next(), None);
    }

    #[test]
    fn same_seed_same_calls() {
        let mut a = DrawSequence::new(BingoUniverse::standard());
        let mut b = DrawSequence::new(BingoUniverse::standard());
        let mut ra = RngSource::seeded(8);
        let mut rb = RngSource::seeded(8);
        for _ in 0..10 {
            assert_eq!(a.draw_next(&mut ra), b.draw_next(&mut rb));
        }
        assert_eq!(a.last(), b.last());
        assert!(a.was_drawn(a.history()[0]));
    }
}

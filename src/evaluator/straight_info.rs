use crate::cards::Rank;

/// Whether five ranks form a straight, and which rank tops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Accepts ranks in any order. The wheel (A-2-3-4-5) counts, topped by
    /// the Five.
    pub fn detect(ranks: &[Rank; 5]) -> Self {
        let mut sorted = *ranks;
        sorted.sort_by(|a, b| b.cmp(a));

        if (0..4).all(|i| sorted[i].value() == sorted[i + 1].value() + 1) {
            return StraightInfo { is_straight: true, top_rank: Some(sorted[0]) };
        }

        if sorted == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two] {
            return StraightInfo { is_straight: true, top_rank: Some(Rank::Five) };
        }

        StraightInfo { is_straight: false, top_rank: None }
    }

    /// T-J-Q-K-A, the only straight eligible for a royal flush.
    pub fn is_broadway(&self) -> bool {
        self.top_rank == Some(Rank::Ace)
    }
}

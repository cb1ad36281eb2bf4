use crate::cards::Rank;

/// Ranks of a five-card hand grouped by multiplicity, sorted by
/// (count desc, rank desc).
///
/// Example: QQQ88 groups as [(Queen, 3), (Eight, 2)].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    pub fn from_ranks(ranks: &[Rank; 5]) -> Self {
        let mut counts = [0u8; 15];
        for r in ranks {
            counts[r.value() as usize] += 1;
        }
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .filter_map(|&r| {
                let n = counts[r.value() as usize];
                (n > 0).then_some((r, n))
            })
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    /// Multiplicities alone, descending: `[3, 2]` for a full house.
    pub fn multiplicities(&self) -> Vec<u8> {
        self.groups.iter().map(|&(_, n)| n).collect()
    }

    pub fn max_multiplicity(&self) -> u8 {
        self.groups.first().map_or(0, |&(_, n)| n)
    }

    /// Ranks that appear exactly twice, highest first.
    pub fn pairs(&self) -> impl Iterator<Item = Rank> + '_ {
        self.groups.iter().filter(|&&(_, n)| n == 2).map(|&(r, _)| r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_house_multiplicities() {
        let g = RankGroups::from_ranks(&[
            Rank::Eight,
            Rank::Queen,
            Rank::Eight,
            Rank::Queen,
            Rank::Queen,
        ]);
        assert_eq!(g.multiplicities(), vec![3, 2]);
        assert_eq!(g.max_multiplicity(), 3);
        assert_eq!(g.pairs().collect::<Vec<_>>(), vec![Rank::Eight]);
    }

    #[test]
    fn two_pair_sorted_high_first() {
        let g =
            RankGroups::from_ranks(&[Rank::Two, Rank::King, Rank::Two, Rank::King, Rank::Nine]);
        assert_eq!(g.multiplicities(), vec![2, 2, 1]);
        assert_eq!(g.pairs().collect::<Vec<_>>(), vec![Rank::King, Rank::Two]);
    }

    #[test]
    fn singletons() {
        let g =
            RankGroups::from_ranks(&[Rank::Ace, Rank::Ten, Rank::Seven, Rank::Five, Rank::Two]);
        assert_eq!(g.multiplicities(), vec![1, 1, 1, 1, 1]);
        assert_eq!(g.pairs().count(), 0);
    }
}

use bingo_poker::cards::{Card, Rank, Suit};
use bingo_poker::deck::Deck;
use bingo_poker::evaluator::{evaluate_cards, HandCategory};
use bingo_poker::rng::{shuffled, RngSource};
use proptest::prelude::*;
use std::collections::HashSet;

fn any_rank() -> impl Strategy<Value = Rank> {
    (2u8..=14u8).prop_map(|v| Rank::from_value(v).unwrap_or(Rank::Ace))
}

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Clubs), Just(Suit::Diamonds), Just(Suit::Hearts), Just(Suit::Spades),]
}

/// Five distinct cards taken from a seeded shuffle.
fn any_hand() -> impl Strategy<Value = [Card; 5]> {
    any::<u64>().prop_map(|seed| {
        let mut deck = Deck::shuffled(&mut RngSource::seeded(seed)).unwrap();
        deck.deal_hand().unwrap().cards()
    })
}

fn rank_counts(cards: &[Card; 5]) -> Vec<usize> {
    let mut counts = [0usize; 15];
    for c in cards {
        counts[usize::from(c.rank().value())] += 1;
    }
    let mut out: Vec<usize> = counts.into_iter().filter(|&n| n > 0).collect();
    out.sort_unstable_by(|a, b| b.cmp(a));
    out
}

proptest! {
    #[test]
    fn full_house_is_never_trips(trip in any_rank(), pair in any_rank(), offs in prop::array::uniform2(any_suit())) {
        prop_assume!(trip != pair);
        let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts];
        let mut xs = [Card::new(trip, suits[0]); 5];
        for (i, s) in suits.iter().enumerate() {
            xs[i] = Card::new(trip, *s);
        }
        xs[3] = Card::new(pair, offs[0]);
        xs[4] = Card::new(pair, if offs[1] == offs[0] { Suit::Spades } else { offs[1] });
        prop_assume!(xs[3] != xs[4]);
        prop_assert_eq!(evaluate_cards(&xs), HandCategory::FullHouse);
    }

    #[test]
    fn category_agrees_with_rank_shape(hand in any_hand()) {
        let cat = evaluate_cards(&hand);
        let counts = rank_counts(&hand);
        match counts.as_slice() {
            [4, 1] => prop_assert_eq!(cat, HandCategory::FourOfAKind),
            [3, 2] => prop_assert_eq!(cat, HandCategory::FullHouse),
            [3, 1, 1] => prop_assert_eq!(cat, HandCategory::ThreeOfAKind),
            [2, 2, 1] => prop_assert_eq!(cat, HandCategory::TwoPair),
            [2, 1, 1, 1] => prop_assert!(matches!(cat, HandCategory::JacksOrBetter | HandCategory::NoWin)),
            _ => prop_assert!(matches!(
                cat,
                HandCategory::RoyalFlush
                    | HandCategory::StraightFlush
                    | HandCategory::Flush
                    | HandCategory::Straight
                    | HandCategory::NoWin
            )),
        }
    }

    #[test]
    fn flush_detection_is_never_downgraded(hand in any_hand()) {
        let suited = hand.iter().all(|c| c.suit() == hand[0].suit());
        let cat = evaluate_cards(&hand);
        if suited {
            prop_assert!(cat >= HandCategory::Flush);
            prop_assert!(cat != HandCategory::FullHouse && cat != HandCategory::FourOfAKind);
        }
    }

    #[test]
    fn evaluation_ignores_card_order(hand in any_hand(), seed in any::<u64>()) {
        let mixed = shuffled(hand.to_vec(), &mut RngSource::seeded(seed)).unwrap();
        let mixed: [Card; 5] = [mixed[0], mixed[1], mixed[2], mixed[3], mixed[4]];
        prop_assert_eq!(evaluate_cards(&hand), evaluate_cards(&mixed));
    }

    #[test]
    fn shuffle_is_a_permutation(len in 0usize..80, seed in any::<u64>()) {
        let input: Vec<usize> = (0..len).collect();
        let mut out = shuffled(input.clone(), &mut RngSource::seeded(seed)).unwrap();
        out.sort_unstable();
        prop_assert_eq!(out, input);
    }

    #[test]
    fn shuffled_deck_deals_unique_cards(seed in any::<u64>()) {
        let mut deck = Deck::shuffled(&mut RngSource::seeded(seed)).unwrap();
        let all = deck.deal(Deck::SIZE).unwrap();
        let set: HashSet<Card> = all.iter().copied().collect();
        prop_assert_eq!(set.len(), Deck::SIZE);
        prop_assert!(deck.is_empty());
    }
}

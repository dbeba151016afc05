use caravan_rs::caravan::{Caravan, Direction, MAX_SLOTS};
use caravan_rs::cards::{Card, Rank, Suit};
use caravan_rs::table::CaravanName;
use proptest::prelude::*;

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Clubs), Just(Suit::Diamonds), Just(Suit::Hearts), Just(Suit::Spades),]
}

fn any_numeral_rank() -> impl Strategy<Value = Rank> {
    (0usize..10).prop_map(|i| Rank::NUMERALS[i])
}

fn any_numeral() -> impl Strategy<Value = Card> {
    (any_numeral_rank(), any_suit()).prop_map(|(r, s)| Card::new(r, s))
}

fn card(s: &str) -> Card {
    s.parse().unwrap()
}

proptest! {
    #[test]
    fn accepted_numerals_never_repeat_adjacent_ranks(cards in prop::collection::vec(any_numeral(), 0..40)) {
        let mut c = Caravan::new(CaravanName::B);
        for card in cards {
            let _ = c.put_numeral(card);
            prop_assert!(c.size() <= MAX_SLOTS);
        }
        for pair in c.slots().windows(2) {
            prop_assert_ne!(pair[0].numeral().rank(), pair[1].numeral().rank());
        }
    }

    #[test]
    fn kings_double_geometrically(rank in any_numeral_rank(), suit in any_suit(), kings in 0usize..=3) {
        let mut c = Caravan::new(CaravanName::A);
        c.put_numeral(Card::new(rank, suit)).unwrap();
        for _ in 0..kings {
            c.put_face(Card::new(Rank::King, suit), 1).unwrap();
        }
        prop_assert_eq!(c.bid(), rank.value() << kings);
        prop_assert_eq!(c.slots()[0].value(), rank.value() * [1, 2, 4, 8][kings]);
    }

    #[test]
    fn queens_flip_direction_by_parity(
        first in any_numeral_rank(),
        second in any_numeral_rank(),
        queens in 0usize..=3,
        kings in 0usize..=3,
        suit in any_suit(),
    ) {
        prop_assume!(first != second);
        prop_assume!(queens + kings <= 3);
        let mut c = Caravan::new(CaravanName::E);
        c.put_numeral(Card::new(first, Suit::Clubs)).unwrap();
        c.put_numeral(Card::new(second, Suit::Hearts)).unwrap();
        let before = c.direction();
        for _ in 0..kings {
            c.put_face(Card::new(Rank::King, suit), 2).unwrap();
        }
        for _ in 0..queens {
            c.put_face(Card::new(Rank::Queen, suit), 2).unwrap();
        }
        let expected = if queens % 2 == 1 { before.flipped() } else { before };
        prop_assert_eq!(c.direction(), expected);
    }

    #[test]
    fn put_then_remove_rank_empties(card in any_numeral()) {
        let mut c = Caravan::new(CaravanName::F);
        c.put_numeral(card).unwrap();
        prop_assert_eq!(c.remove_rank(card.rank(), 0).unwrap(), 1);
        prop_assert!(c.is_empty());
        prop_assert_eq!(c.bid(), 0);
    }
}

#[test]
fn queen_scenario_on_ace_two_three() {
    let mut c = Caravan::new(CaravanName::C);
    for s in ["As", "2h", "3c"] {
        c.put_numeral(card(s)).unwrap();
    }
    assert_eq!(c.bid(), 6);
    assert_eq!(c.suit(), Some(Suit::Clubs));
    assert_eq!(c.direction(), Direction::Ascending);

    c.put_face(card("Qd"), 3).unwrap();
    assert_eq!(c.suit(), Some(Suit::Diamonds));
    assert_eq!(c.direction(), Direction::Descending);
    assert_eq!(c.bid(), 6);

    c.put_face(card("Qs"), 3).unwrap();
    assert_eq!(c.direction(), Direction::Ascending);
    assert_eq!(c.suit(), Some(Suit::Spades));
}

#[test]
fn suit_or_direction_is_enough() {
    let mut c = Caravan::new(CaravanName::A);
    c.put_numeral(card("4h")).unwrap();
    c.put_numeral(card("8c")).unwrap();
    // Ascending clubs: a lower club and a higher heart are both fine.
    assert!(c.clone().put_numeral(card("2c")).is_ok());
    assert!(c.clone().put_numeral(card("9h")).is_ok());
    assert!(c.put_numeral(card("3d")).unwrap_err().is_recoverable());
}

#[test]
fn eight_slots_then_full() {
    let mut c = Caravan::new(CaravanName::D);
    for s in ["As", "2s", "3s", "4s", "5s", "6s", "7s", "8s"] {
        c.put_numeral(card(s)).unwrap();
    }
    assert_eq!(c.size(), MAX_SLOTS);
    assert!(c.put_numeral(card("9s")).is_err());
    assert_eq!(c.bid(), 36);
    assert!(c.is_bust());
}

//! Доменные типы, оценка рук и раскладка банков.

use std::collections::HashSet;

use poker_table::domain::{Card, CardSlot, Chips, Deck, Rank, Street, Suit, TableConfig};
use poker_table::rules::eval::{describe_hand, evaluate_best_hand, HandCategory};
use poker_table::rules::pots::{build_pots, Pot};

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|c| c.parse().unwrap()).collect()
}

// card.rs

#[test]
fn card_parse_and_codes() {
    let card: Card = "Ah".parse().unwrap();
    assert_eq!(card, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(card.to_string(), "Ah");
    assert_eq!(card.code(), "hA");
    assert_eq!(Card::new(Rank::Two, Suit::Clubs).code(), "c2");
    assert_eq!(Card::new(Rank::Ten, Suit::Spades).code(), "sT");

    assert!("".parse::<Card>().is_err());
    assert!("1c".parse::<Card>().is_err());
    assert!("Acx".parse::<Card>().is_err());
}

// chips.rs

#[test]
fn chips_saturate_instead_of_underflow() {
    let mut x = Chips(10);
    x -= Chips(20);
    assert_eq!(x, Chips::ZERO);
    assert_eq!(Chips(10).checked_sub(Chips(11)), None);

    let total: Chips = [Chips(1), Chips(2), Chips(3)].iter().sum();
    assert_eq!(total, Chips(6));
}

// deck.rs

#[test]
fn standard_deck_is_unique_and_spades_on_top() {
    let mut deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);
    let set: HashSet<_> = deck.cards.iter().collect();
    assert_eq!(set.len(), 52);

    assert_eq!(deck.draw_one(), Some("As".parse().unwrap()));
    assert_eq!(deck.draw_exact(2), Some(cards(&["Ks", "Qs"])));
    assert!(deck.remove("2c".parse().unwrap()));
    assert!(!deck.remove("2c".parse().unwrap()));
    assert_eq!(deck.len(), 48);
}

#[test]
fn draw_exact_leaves_deck_untouched_when_short() {
    let mut deck = Deck::stacked(&cards(&["Ah", "Kd"]));
    assert_eq!(deck.draw_exact(3), None);
    assert_eq!(deck.len(), 2);
    assert_eq!(deck.draw_one(), Some("Ah".parse().unwrap()));
}

#[test]
fn card_slot_serializes() {
    let json = serde_json::to_string(&CardSlot::FaceDown).unwrap();
    assert_eq!(json, "\"FaceDown\"");
}

// hand.rs

#[test]
fn streets_in_order() {
    assert_eq!(Street::Preflop.next(), Some(Street::Flop));
    assert!(Street::River.is_last());
    assert!(!Street::Preflop.burns_card());
    let board: usize = Street::ALL.iter().map(|s| s.board_cards()).sum();
    assert_eq!(board, 5);
}

// config.rs

#[test]
fn config_default_and_json() {
    let default = TableConfig::default();
    assert_eq!(default.ante, Chips(500));
    assert_eq!(default.big_blind, Chips(2000));
    assert_eq!(default.player_count, 3);

    let config =
        TableConfig::from_json(r#"{"ante":0,"small_blind":1,"big_blind":2,"player_count":6}"#)
            .unwrap();
    assert_eq!(config.player_count, 6);

    assert!(TableConfig::from_json(r#"{"ante":0,"small_blind":1,"big_blind":0,"player_count":6}"#).is_err());
    assert!(TableConfig::from_json(r#"{"ante":0,"small_blind":1,"big_blind":2,"player_count":1}"#).is_err());
    assert!(TableConfig::from_json("not json").is_err());
}

// eval.rs

#[test]
fn evaluator_orders_categories() {
    let board = cards(&["2h", "7d", "9c", "Ks", "As"]);

    let pair = evaluate_best_hand(&cards(&["Ah", "3c"]), &board).unwrap();
    let two_pair = evaluate_best_hand(&cards(&["Ah", "Kd"]), &board).unwrap();
    let trips = evaluate_best_hand(&cards(&["Ad", "Ac"]), &board).unwrap();
    let straight = evaluate_best_hand(&cards(&["3c", "4d"]), &cards(&["5h", "Ad", "2s", "Kc", "9h"])).unwrap();

    assert_eq!(pair.category(), HandCategory::OnePair);
    assert_eq!(two_pair.category(), HandCategory::TwoPair);
    assert_eq!(trips.category(), HandCategory::ThreeOfAKind);
    assert_eq!(straight.category(), HandCategory::Straight);
    assert!(pair < two_pair && two_pair < trips);
    assert_eq!(describe_hand(trips), "Three of a kind");
}

#[test]
fn evaluator_kicker_and_wheel() {
    let board = cards(&["Ah", "Ad", "8c", "6s", "2d"]);
    let king = evaluate_best_hand(&cards(&["Kc", "3h"]), &board).unwrap();
    let queen = evaluate_best_hand(&cards(&["Qc", "3s"]), &board).unwrap();
    assert!(king > queen);

    // A2345 – самый младший стрит.
    let wheel = evaluate_best_hand(&cards(&["3c", "4d"]), &cards(&["5h", "Ad", "2s", "Kc", "9h"])).unwrap();
    let six_high = evaluate_best_hand(&cards(&["3c", "4d"]), &cards(&["5h", "6d", "2s", "Kc", "9h"])).unwrap();
    assert!(six_high > wheel);

    assert!(evaluate_best_hand(&cards(&["3c", "4d"]), &cards(&["5h"])).is_none());
}

#[test]
fn evaluator_flush_beats_straight() {
    let board = cards(&["5h", "6h", "7h", "8c", "Kd"]);
    let flush = evaluate_best_hand(&cards(&["2h", "Th"]), &board).unwrap();
    let straight = evaluate_best_hand(&cards(&["9s", "4c"]), &board).unwrap();
    assert_eq!(flush.category(), HandCategory::Flush);
    assert!(flush > straight);
}

// pots.rs

#[test]
fn single_pot_when_everyone_matches() {
    let pots = build_pots(&[Chips(10), Chips(10), Chips(10)], &[true, true, true]);
    assert_eq!(
        pots,
        vec![Pot {
            amount: Chips(30),
            eligible_seats: vec![0, 1, 2],
        }]
    );
}

#[test]
fn all_ins_make_layered_side_pots() {
    let pots = build_pots(
        &[Chips(50), Chips(20), Chips(100), Chips(100)],
        &[true, true, true, true],
    );
    let amounts: Vec<Chips> = pots.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![Chips(80), Chips(90), Chips(100)]);
    assert_eq!(pots[0].eligible_seats, vec![0, 1, 2, 3]);
    assert_eq!(pots[1].eligible_seats, vec![0, 2, 3]);
    assert_eq!(pots[2].eligible_seats, vec![2, 3]);
}

#[test]
fn folded_chips_stay_in_pot_without_eligibility() {
    // Место 0 сфолдило после самой большой ставки.
    let pots = build_pots(&[Chips(60), Chips(40), Chips(40)], &[false, true, true]);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, Chips(140));
    assert_eq!(pots[0].eligible_seats, vec![1, 2]);
}

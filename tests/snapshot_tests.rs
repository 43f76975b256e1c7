//! Снапшот стола и JSON-контракт для хоста.

use serde_json::{json, Value};

use poker_table::domain::{Chips, Player, TableConfig, HIDDEN_CARD_CODE};
use poker_table::engine::{FixedClock, GamePhase, Move, PokerTable};
use poker_table::rules::{HoldemDealer, RandomSource};

#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {
        // no-op
    }
}

fn dealt_table() -> PokerTable<HoldemDealer<DummyRng>> {
    let config = TableConfig::new(Chips(0), Chips(1), Chips(2), 3);
    let players = vec![
        Player::new("alice", Chips(100)),
        Player::new("bob", Chips(100)),
        Player::new("carol", Chips(100)),
    ];
    let mut table = PokerTable::with_factory(config, players, HoldemDealer::new(DummyRng))
        .unwrap()
        .with_clock(FixedClock(5_000));
    table.reset().unwrap();
    // 2 блайнда + 6 карманных карт + ожидание хода.
    for _ in 0..9 {
        table.step(None).unwrap();
    }
    table
}

#[test]
fn snapshot_json_has_expected_fields() {
    let table = dealt_table();
    let json: Value = serde_json::from_str(&table.game_state().unwrap().to_json().unwrap()).unwrap();

    for key in [
        "timestamp", "config", "players", "dealer", "phase", "turn", "hands", "board",
        "stacks", "bets", "pot", "min_bet", "max_bet",
    ] {
        assert!(json.get(key).is_some(), "missing field {key}");
    }

    assert_eq!(json["phase"], "WAITING_MOVE");
    assert_eq!(json["turn"], 0);
    assert_eq!(json["dealer"], 0);
    assert_eq!(json["pot"], 3);
    assert_eq!(json["bets"], json!([0, 1, 2]));
    assert_eq!(json["stacks"], json!([100, 99, 98]));
    assert_eq!(json["board"], json!([]));
    assert_eq!(
        json["config"],
        json!({"ante": 0, "small_blind": 1, "big_blind": 2, "player_count": 3})
    );
    assert_eq!(json["players"][1], json!({"identity": "bob", "money": 100}));
}

#[test]
fn phase_is_null_before_first_step() {
    let config = TableConfig::new(Chips(0), Chips(1), Chips(2), 2);
    let players = vec![Player::new("a", Chips(10)), Player::new("b", Chips(10))];
    let mut table = PokerTable::with_factory(config, players, HoldemDealer::new(DummyRng)).unwrap();
    table.reset().unwrap();

    let json: Value = serde_json::to_value(table.game_state().unwrap()).unwrap();
    assert_eq!(json["phase"], Value::Null);
    assert_eq!(json["turn"], Value::Null);
    assert_eq!(json["min_bet"], 0);
}

#[test]
fn card_codes_are_suit_then_rank() {
    let snap = dealt_table().game_state().unwrap();

    assert_eq!(snap.hands[0], vec!["sQ", "s9"]);
    assert_eq!(snap.hands[1], vec!["sA", "sJ"]);
    assert_eq!(snap.hands[2], vec!["sK", "sT"]);
}

#[test]
fn masked_snapshot_hides_other_hands() {
    let snap = dealt_table().game_state().unwrap();
    let hero = snap.masked_for(1);

    assert_eq!(hero.hands[1], snap.hands[1]);
    assert_eq!(hero.hands[0], vec![HIDDEN_CARD_CODE; 2]);
    assert_eq!(hero.hands[2], vec![HIDDEN_CARD_CODE; 2]);
    assert_eq!(hero.stacks, snap.stacks);
}

#[test]
fn folded_hand_is_empty_in_snapshot() {
    let mut table = dealt_table();
    table.step(Some(Move::Fold)).unwrap();

    let snap = table.game_state().unwrap();
    assert!(snap.hands[0].is_empty());
    assert_eq!(snap.hands.len(), 3);
    assert_eq!(snap.phase, Some(GamePhase::MakingMove));
}

#[test]
fn snapshot_rotates_with_button() {
    let mut table = dealt_table();
    while table.hands_played() == 0 {
        let mv = table.whose_turn().map(|_| Move::Call);
        table.step(mv).unwrap();
    }
    for _ in 0..9 {
        table.step(None).unwrap();
    }

    let snap = table.game_state().unwrap();
    assert_eq!(snap.dealer, 1);
    // Первым (после BB) ходит игрок на баттоне – bob.
    assert_eq!(snap.turn, Some(1));
    assert_eq!(snap.players[snap.turn.unwrap()].identity, "bob");
    // Первая карта уходит игроку слева от баттона.
    assert_eq!(snap.hands[2], vec!["sA", "sJ"]);
}

#[test]
fn moves_use_tagged_json_shape() {
    assert_eq!(
        serde_json::to_value(Move::Bet(Chips(20))).unwrap(),
        json!({"type": "BET", "value": 20})
    );
    assert_eq!(serde_json::to_value(Move::Fold).unwrap(), json!({"type": "FOLD"}));

    let mv: Move = serde_json::from_str(r#"{"type":"RAISE","value":40}"#).unwrap();
    assert_eq!(mv, Move::Raise(Chips(40)));
}

#[test]
fn phase_names_match_wire_format() {
    assert_eq!(
        serde_json::to_value(GamePhase::PostingAnte).unwrap(),
        json!("POSTING_ANTES")
    );
    assert_eq!(GamePhase::PullingChips.as_str(), "PULLING_CHIPS");
    assert_eq!(GamePhase::MakingMove.to_string(), "MAKING_MOVE");
}

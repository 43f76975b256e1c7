//! Поворот мест: table-absolute <-> player-relative.
//!
//! Проверяем:
//! - обратимость to_relative / to_absolute;
//! - поворот на d и затем на (n − d) mod n – тождество;
//! - согласованность индексов с поворотом векторов;
//! - сдвиг баттона.

use proptest::prelude::*;

use poker_table::engine::seats::{
    absolute_index, relative_index, to_absolute, to_relative, DealerButton,
};

#[test]
fn zero_offset_is_identity() {
    let xs = vec![10, 20, 30];
    assert_eq!(to_relative(&xs, 0), xs);
    assert_eq!(to_absolute(&xs, 0), xs);
}

#[test]
fn absolute_seat_zero_belongs_to_dealer_player() {
    // abs: [dealer, sb, bb], игрок 1 на баттоне.
    let abs = vec!["btn", "sb", "bb"];
    let rel = to_relative(&abs, 1);
    assert_eq!(rel, vec!["bb", "btn", "sb"]);
    assert_eq!(rel[relative_index(0, 1, 3)], "btn");
}

#[test]
fn empty_input_stays_empty() {
    let xs: Vec<u32> = Vec::new();
    assert!(to_relative(&xs, 3).is_empty());
    assert!(to_absolute(&xs, 3).is_empty());
}

#[test]
fn dealer_button_wraps_around() {
    let mut button = DealerButton::default();
    button.advance(3);
    assert_eq!(button.offset(), 1);
    button.advance(3);
    button.advance(3);
    assert_eq!(button.offset(), 0);
}

proptest! {
    #[test]
    fn relative_then_absolute_is_identity(
        xs in proptest::collection::vec(any::<u16>(), 1..10),
        dealer in 0usize..32,
    ) {
        prop_assert_eq!(to_absolute(&to_relative(&xs, dealer), dealer), xs.clone());
        prop_assert_eq!(to_relative(&to_absolute(&xs, dealer), dealer), xs);
    }

    #[test]
    fn rotating_by_complement_is_identity(
        xs in proptest::collection::vec(any::<u8>(), 1..10),
        dealer in 0usize..32,
    ) {
        let n = xs.len();
        let d = dealer % n;
        let back = (n - d) % n;
        prop_assert_eq!(to_relative(&to_relative(&xs, d), back), xs);
    }

    #[test]
    fn indices_agree_with_vector_rotation(
        n in 1usize..10,
        dealer in 0usize..32,
    ) {
        let abs: Vec<usize> = (0..n).collect();
        let rel = to_relative(&abs, dealer);
        for seat in 0..n {
            let r = relative_index(seat, dealer, n);
            prop_assert_eq!(rel[r], seat);
            prop_assert_eq!(absolute_index(r, dealer, n), seat);
        }
    }
}

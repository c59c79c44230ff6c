//! Scoring engine properties.
//!
//! These tests check frame classification and roll validation over arbitrary
//! pin sets rather than hand-picked leaves.

use openbowler::scoring::split::{is_split, standing_mask};
use openbowler::{tally, Frame, FrameKind, LaneError, PinState};
use proptest::prelude::*;

const ALL: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Any subset of the ten pins, in arbitrary order.
fn pin_set() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::btree_set(1u8..=10, 0..=10)
        .prop_map(|s| s.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #[test]
    fn strike_iff_all_ten_on_first_roll(pins in pin_set()) {
        let mut frame = Frame::new(1, FrameKind::TenPin);
        let outcome = frame.roll(&pins).unwrap();

        prop_assert_eq!(outcome.strike, pins.len() == 10);
        prop_assert_eq!(usize::from(outcome.pins_down), pins.len());
        prop_assert!(!frame.is_spare());
    }

    #[test]
    fn clearing_the_leave_is_a_spare(first in pin_set()) {
        prop_assume!(first.len() < 10);

        let mut frame = Frame::new(4, FrameKind::TenPin);
        frame.roll(&first).unwrap();
        let leave: Vec<u8> = frame.standing().to_vec();
        frame.roll(&leave).unwrap();

        prop_assert!(frame.is_spare());
        prop_assert!(!frame.is_strike());
        prop_assert_eq!(frame.pinfall(), 10);
    }

    #[test]
    fn out_of_range_pin_rejects_whole_roll(pins in pin_set(), bad in prop_oneof![Just(0u8), 11u8..=255]) {
        let mut frame = Frame::new(1, FrameKind::TenPin);
        let mut request = pins.clone();
        request.push(bad);

        prop_assert_eq!(frame.roll(&request), Err(LaneError::InvalidPin { pin: bad }));
        prop_assert_eq!(frame.current_roll(), 1);
        prop_assert!(frame.pins().iter().all(|p| p.state() == PinState::Standing));
    }

    #[test]
    fn frame_score_outside_one_to_three_is_sentinel(index in 4usize..1000, pins in pin_set()) {
        let mut frame = Frame::new(10, FrameKind::TenPin);
        frame.roll(&pins).unwrap();

        prop_assert_eq!(frame.frame_score(0), -1);
        prop_assert_eq!(frame.frame_score(index), -1);
        prop_assert_eq!(frame.frame_score(1), pins.len() as i32);
    }

    #[test]
    fn split_requires_head_pin_down(pins in pin_set()) {
        let mut frame = Frame::new(1, FrameKind::TenPin);
        frame.roll(&pins).unwrap();

        if frame.is_split() {
            prop_assert!(pins.contains(&1));
            prop_assert!(frame.standing().len() >= 2);
        }
    }
}

#[test]
fn test_split_table_leaves() {
    for leave in [[7u8, 10], [4, 6], [8, 10], [5, 7]] {
        assert!(is_split(standing_mask(&leave)), "{:?} should be a split", leave);
    }
    for leave in [[2u8, 8], [3, 9], [6, 10], [4, 7]] {
        assert!(!is_split(standing_mask(&leave)), "{:?} should not be a split", leave);
    }
}

#[test]
fn test_split_flag_on_frame() {
    let mut frame = Frame::new(2, FrameKind::TenPin);
    let knocked: Vec<u8> = ALL.iter().copied().filter(|p| *p != 7 && *p != 10).collect();
    let outcome = frame.roll(&knocked).unwrap();
    assert!(outcome.split);

    // Missing the head pin is never a split.
    let mut frame = Frame::new(2, FrameKind::TenPin);
    frame.roll(&[2, 3, 4, 5, 6, 8, 9]).unwrap();
    assert!(!frame.is_split());
}

#[test]
fn test_three_game_series_scores() {
    // 9-pin count then spare, every frame; tenth gets a 9 fill ball.
    let mut frames = Vec::new();
    for number in 1..=10u8 {
        let mut frame = Frame::new(number, FrameKind::TenPin);
        frame.roll(&ALL[..9]).unwrap();
        frame.roll(&[10]).unwrap();
        if number == 10 {
            frame.roll(&ALL[..9]).unwrap();
        }
        frames.push(frame);
    }

    let card = tally(&frames);
    assert!(card.is_final());
    assert_eq!(card.total(), 190);
}

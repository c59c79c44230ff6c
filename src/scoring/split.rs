//! Split detection for a ten-pin rack.
//!
//! Pins are linked when they touch in the rack (diagonal neighbours one row
//! apart) or sit on the same sleeper line with exactly one pin between them
//! (2-8, 3-9). Pins side by side on the same row are not linked: the pin
//! directly ahead of them is what holds them together.
//!
//! A first-ball leave is a split when the head pin is down, at least two pins
//! stand, and the standing pins fall into two or more linked groups. So 7-10,
//! 4-5, 5-7 and 3-10 are splits while 2-8, 3-6-10 and 2-4-5-8 are not.

use super::pin::PIN_COUNT;

/// Fixed link table between pin numbers.
const PIN_LINKS: [(u8, u8); 14] = [
    (1, 2),
    (1, 3),
    (2, 4),
    (2, 5),
    (3, 5),
    (3, 6),
    (4, 7),
    (4, 8),
    (5, 8),
    (5, 9),
    (6, 9),
    (6, 10),
    // sleepers
    (2, 8),
    (3, 9),
];

/// Bit for pin `number` in a standing mask.
#[must_use]
pub const fn pin_bit(number: u8) -> u16 {
    1 << (number - 1)
}

/// Build a standing mask from a list of standing pin numbers.
#[must_use]
pub fn standing_mask(standing: &[u8]) -> u16 {
    standing
        .iter()
        .filter(|&&n| (1..=PIN_COUNT as u8).contains(&n))
        .fold(0, |mask, &n| mask | pin_bit(n))
}

/// Check whether the standing pins form a split.
#[must_use]
pub fn is_split(standing: u16) -> bool {
    if standing & pin_bit(1) != 0 || standing.count_ones() < 2 {
        return false;
    }

    // Flood from the lowest standing pin across links between standing pins.
    let mut group = standing & standing.wrapping_neg();
    loop {
        let mut grown = group;
        for &(a, b) in &PIN_LINKS {
            let (a, b) = (pin_bit(a), pin_bit(b));
            if standing & a != 0 && standing & b != 0 && grown & (a | b) != 0 {
                grown |= a | b;
            }
        }
        if grown == group {
            break;
        }
        group = grown;
    }

    group != standing
}

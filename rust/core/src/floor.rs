// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor numbering and display palette

/// Floor assigned when the caller does not supply one
pub const DEFAULT_FLOOR: u32 = 1;

const FLOOR_COLORS: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

/// Display color for a floor. Floors outside 1..=5 use floor 1's color.
pub fn floor_color(floor: u32) -> &'static str {
    match floor {
        1..=5 => FLOOR_COLORS[(floor - 1) as usize],
        _ => FLOOR_COLORS[0],
    }
}

/// Resolve an optional floor number; missing and zero both mean floor 1
pub fn resolve_floor(floor: Option<u32>) -> u32 {
    match floor {
        Some(0) | None => DEFAULT_FLOOR,
        Some(n) => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette() {
        assert_eq!(floor_color(1), "#3b82f6");
        assert_eq!(floor_color(2), "#10b981");
        assert_eq!(floor_color(3), "#f59e0b");
        assert_eq!(floor_color(4), "#ef4444");
        assert_eq!(floor_color(5), "#8b5cf6");
    }

    #[test]
    fn test_out_of_range_uses_first_floor() {
        assert_eq!(floor_color(0), floor_color(1));
        assert_eq!(floor_color(6), floor_color(1));
        assert_eq!(floor_color(u32::MAX), floor_color(1));
    }

    #[test]
    fn test_resolve_floor() {
        assert_eq!(resolve_floor(None), 1);
        assert_eq!(resolve_floor(Some(0)), 1);
        assert_eq!(resolve_floor(Some(3)), 3);
        assert_eq!(resolve_floor(Some(9)), 9);
    }
}

//! Scoring and reveal helpers for the round engine.

/// Placeholder shown for answer characters that are not yet revealed
pub const MASK_CHAR: char = '•';

/// Points brackets as (inclusive upper bound of elapsed ms, points).
/// First matching bracket wins.
const POINT_BRACKETS: &[(u64, u32)] = &[
    (5_000, 50),
    (10_000, 40),
    (15_000, 30),
    (20_000, 20),
    (25_000, 10),
];

/// Points for anything slower than the last bracket
const LATE_POINTS: u32 = 5;

/// Points awarded for a correct answer given `elapsed_ms` into the round
pub fn points_for_elapsed(elapsed_ms: u64) -> u32 {
    POINT_BRACKETS
        .iter()
        .find(|(upper, _)| elapsed_ms <= *upper)
        .map(|(_, points)| *points)
        .unwrap_or(LATE_POINTS)
}

/// Canonical form used for answer comparison
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Share of the answer revealed after `elapsed_ms`: 10% per reveal interval,
/// clamped to 100
pub fn reveal_percentage(elapsed_ms: u64, reveal_interval_ms: u64) -> f64 {
    if reveal_interval_ms == 0 {
        return 100.0;
    }
    let pct = (elapsed_ms as f64 / reveal_interval_ms as f64) * 10.0;
    pct.min(100.0)
}

/// Reveal the first `ceil(len * pct / 100)` characters of `answer`, masking the rest
pub fn masked_answer(answer: &str, percentage: f64) -> String {
    let len = answer.chars().count();
    let pct = percentage.clamp(0.0, 100.0);
    let shown = ((len as f64) * (pct / 100.0)).ceil() as usize;
    let shown = shown.min(len);

    answer
        .chars()
        .take(shown)
        .chain(std::iter::repeat(MASK_CHAR).take(len - shown))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_bracket_boundaries() {
        assert_eq!(points_for_elapsed(0), 50);
        assert_eq!(points_for_elapsed(5_000), 50);
        assert_eq!(points_for_elapsed(5_001), 40);
        assert_eq!(points_for_elapsed(10_000), 40);
        assert_eq!(points_for_elapsed(10_001), 30);
        assert_eq!(points_for_elapsed(15_000), 30);
        assert_eq!(points_for_elapsed(20_000), 20);
        assert_eq!(points_for_elapsed(25_000), 10);
        assert_eq!(points_for_elapsed(25_001), 5);
        assert_eq!(points_for_elapsed(u64::MAX), 5);
    }

    #[test]
    fn test_points_never_increase_with_time() {
        let mut previous = points_for_elapsed(0);
        for elapsed in (0..=30_000).step_by(100) {
            let points = points_for_elapsed(elapsed);
            assert!(points <= previous, "points rose at {}ms", elapsed);
            previous = points;
        }
    }

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("  Diamond \n"), "diamond");
        assert_eq!(normalize_answer("ENDER Pearl"), "ender pearl");
        assert_eq!(normalize_answer(""), "");
    }

    #[test]
    fn test_reveal_percentage_progression() {
        assert_eq!(reveal_percentage(0, 2_500), 0.0);
        assert_eq!(reveal_percentage(2_500, 2_500), 10.0);
        assert_eq!(reveal_percentage(12_500, 2_500), 50.0);
        assert_eq!(reveal_percentage(25_000, 2_500), 100.0);
        assert_eq!(reveal_percentage(40_000, 2_500), 100.0);
    }

    #[test]
    fn test_masked_answer() {
        assert_eq!(masked_answer("Diamond", 0.0), "•••••••");
        // ceil(7 * 0.1) = 1
        assert_eq!(masked_answer("Diamond", 10.0), "D••••••");
        assert_eq!(masked_answer("Diamond", 50.0), "Diam•••");
        assert_eq!(masked_answer("Diamond", 100.0), "Diamond");
        assert_eq!(masked_answer("", 50.0), "");
    }

    #[test]
    fn test_masked_answer_counts_characters_not_bytes() {
        assert_eq!(masked_answer("Überholt", 25.0), "Üb••••••");
    }
}

use super::{MemberId, ScoreMap};

/// Member with the lowest score; ties go to the smallest member ID.
pub fn pick_lowest(scores: &ScoreMap) -> Option<&MemberId> {
    scores
        .iter()
        .min_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(id, _)| id)
}

/// Member with the highest score; ties go to the smallest member ID.
pub fn pick_highest(scores: &ScoreMap) -> Option<&MemberId> {
    scores
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, u32)]) -> ScoreMap {
        entries
            .iter()
            .map(|(id, score)| (id.to_string(), *score))
            .collect()
    }

    #[test]
    fn test_empty_map_picks_nobody() {
        let empty = ScoreMap::new();
        assert_eq!(pick_lowest(&empty), None);
        assert_eq!(pick_highest(&empty), None);
    }

    #[test]
    fn test_lowest_score_wins() {
        let map = scores(&[("m-a", 4), ("m-b", 1), ("m-c", 3)]);
        assert_eq!(pick_lowest(&map).map(String::as_str), Some("m-b"));
        assert_eq!(pick_highest(&map).map(String::as_str), Some("m-a"));
    }

    #[test]
    fn test_ties_break_on_smallest_id() {
        let map = scores(&[("m-c", 2), ("m-a", 2), ("m-b", 2)]);
        assert_eq!(pick_lowest(&map).map(String::as_str), Some("m-a"));
        assert_eq!(pick_highest(&map).map(String::as_str), Some("m-a"));
    }

    #[test]
    fn test_repeated_picks_are_stable() {
        let map = scores(&[("m-b", 0), ("m-a", 0), ("m-d", 5), ("m-c", 5)]);
        let first = pick_lowest(&map).cloned();
        for _ in 0..10 {
            assert_eq!(pick_lowest(&map).cloned(), first);
        }
        assert_eq!(pick_highest(&map).map(String::as_str), Some("m-c"));
    }
}

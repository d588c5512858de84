use crate::models::RecommendationResult;

/// Order by total descending and assign 1-based ranks.
///
/// The sort is stable, so equal totals keep their input order.
pub fn rank(mut results: Vec<RecommendationResult>) -> Vec<RecommendationResult> {
    results.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
    for (i, result) in results.iter_mut().enumerate() {
        result.rank = i + 1;
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreBreakdown;

    fn result(id: &str, total: f64) -> RecommendationResult {
        RecommendationResult {
            resort_id: id.to_string(),
            score: ScoreBreakdown {
                total,
                ..ScoreBreakdown::default()
            },
            rank: 0,
            explanations: Vec::new(),
            highlights: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_rank_orders_descending() {
        let ranked = rank(vec![result("a", 10.0), result("b", 70.0), result("c", 40.0)]);
        let ids: Vec<_> = ranked.iter().map(|r| r.resort_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![
            result("first", 50.0),
            result("top", 80.0),
            result("second", 50.0),
            result("third", 50.0),
        ]);
        let ids: Vec<_> = ranked.iter().map(|r| r.resort_id.as_str()).collect();
        assert_eq!(ids, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }
}

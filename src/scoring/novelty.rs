//! Novelty criterion: fewer visits relative to resort size scores higher.

use crate::models::{ResortConfig, VisitCounts};

use super::Contribution;

pub const NOVELTY_CAP: f64 = 12.0;

/// Slopes per "unit" of exploration; a 10-slope resort is explored in one visit.
const SLOPES_PER_VISIT: f64 = 10.0;

pub(super) fn score(config: &ResortConfig, visits: &VisitCounts) -> Contribution {
    let mut out = Contribution::default();
    let count = visits.get(&config.id).copied().unwrap_or(0);

    if count == 0 {
        out.score = NOVELTY_CAP;
        out.highlights.push("Never visited".to_string());
        return out;
    }

    let slope_factor = config.slopes_total as f64 / SLOPES_PER_VISIT;
    if slope_factor <= 0.0 {
        return out;
    }
    let explored = count as f64 / slope_factor;
    out.score = NOVELTY_CAP * (1.0 - explored.min(1.0));

    if out.score >= NOVELTY_CAP * 0.75 {
        let plural = if count > 1 { "s" } else { "" };
        out.explanations.push(format!(
            "Only visited {count} time{plural}, still lots to explore"
        ));
    } else if out.score >= NOVELTY_CAP * 0.5 {
        out.explanations
            .push(format!("Visited {count} times, some areas still unexplored"));
    } else if out.score < NOVELTY_CAP * 0.25 && count >= 3 {
        out.explanations
            .push(format!("Familiar territory ({count} visits)"));
    }

    out.capped(NOVELTY_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support::resort;
    use approx::assert_relative_eq;

    fn visits(id: &str, n: u32) -> VisitCounts {
        VisitCounts::from([(id.to_string(), n)])
    }

    #[test]
    fn test_never_visited_gets_full_points() {
        let out = score(&resort("a"), &VisitCounts::new());
        assert_eq!(out.score, NOVELTY_CAP);
        assert_eq!(out.highlights, vec!["Never visited".to_string()]);
    }

    #[test]
    fn test_large_resorts_decay_slower() {
        let mut big = resort("big");
        big.slopes_total = 80;
        let out = score(&big, &visits("big", 2));
        assert_relative_eq!(out.score, 9.0);
        assert!(out.explanations[0].starts_with("Only visited 2 times"));

        let mut small = resort("small");
        small.slopes_total = 10;
        let out = score(&small, &visits("small", 2));
        assert_eq!(out.score, 0.0);
    }

    #[test]
    fn test_familiar_territory() {
        let mut config = resort("a");
        config.slopes_total = 30;
        let out = score(&config, &visits("a", 3));
        assert_eq!(out.score, 0.0);
        assert_eq!(out.explanations, vec!["Familiar territory (3 visits)".to_string()]);
    }

    #[test]
    fn test_no_slopes_is_zero_not_nan() {
        let mut config = resort("a");
        config.slopes_total = 0;
        let out = score(&config, &visits("a", 1));
        assert_eq!(out.score, 0.0);
    }
}

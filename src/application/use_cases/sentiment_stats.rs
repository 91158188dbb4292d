//! Per-label counts and percentages over a validated feedback table

use crate::domain::feedback::{FeedbackTable, SentimentLabel, SentimentStats};

/// Count rows per label and express each as a share of the total.
///
/// Percentages are rounded to two decimals. An empty table yields zero
/// counts and `0.0` percentages rather than dividing by zero.
pub fn aggregate(table: &FeedbackTable) -> SentimentStats {
    let mut stats = SentimentStats::default();
    for row in &table.rows {
        stats.get_mut(row.sentiment).count += 1;
    }

    let total = table.len();
    if total == 0 {
        return stats;
    }

    for label in SentimentLabel::ALL {
        let detail = stats.get_mut(label);
        detail.percent = round_two(detail.count as f64 / total as f64 * 100.0);
    }
    stats
}

/// Two decimals, exact halves to even (`3.125` -> `3.12`).
fn round_two(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::FeedbackRow;

    fn table(ratings: &[f64]) -> FeedbackTable {
        let rows = ratings
            .iter()
            .enumerate()
            .map(|(i, rating)| FeedbackRow::new(i.to_string(), format!("comment {}", i), *rating))
            .collect();
        FeedbackTable::new(vec![], rows)
    }

    #[test]
    fn test_even_split() {
        let stats = aggregate(&table(&[4.0, 3.0, 1.0]));

        for label in SentimentLabel::ALL {
            assert_eq!(stats.get(label).count, 1);
            assert_eq!(stats.get(label).percent, 33.33);
        }
    }

    #[test]
    fn test_empty_table_is_all_zero() {
        let stats = aggregate(&table(&[]));

        assert_eq!(stats, SentimentStats::default());
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_absent_labels_still_reported() {
        let stats = aggregate(&table(&[5.0, 4.0]));

        assert_eq!(stats.positive.count, 2);
        assert_eq!(stats.positive.percent, 100.0);
        assert_eq!(stats.neutral.count, 0);
        assert_eq!(stats.neutral.percent, 0.0);
        assert_eq!(stats.negative.percent, 0.0);
    }

    #[test]
    fn test_counts_and_percents_sum() {
        let ratings = [5.0, 4.0, 4.5, 3.0, 2.0, 1.0, -3.0, 3.0, 2.5, 5.0, 1.0];
        let stats = aggregate(&table(&ratings));

        assert_eq!(stats.total(), ratings.len());
        let percent_sum: f64 = SentimentLabel::ALL
            .iter()
            .map(|label| stats.get(*label).percent)
            .sum();
        assert!((percent_sum - 100.0).abs() <= 0.02);
    }

    #[test]
    fn test_rounding() {
        // 2 of 7 = 28.571428...
        let stats = aggregate(&table(&[4.0, 4.0, 1.0, 1.0, 1.0, 1.0, 1.0]));
        assert_eq!(stats.positive.percent, 28.57);
        assert_eq!(stats.negative.percent, 71.43);
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        // 1 of 32 = 3.125, 31 of 32 = 96.875
        let mut ratings = vec![5.0];
        ratings.extend(std::iter::repeat(1.0).take(31));

        let stats = aggregate(&table(&ratings));

        assert_eq!(stats.positive.percent, 3.12);
        assert_eq!(stats.negative.percent, 96.88);
    }
}

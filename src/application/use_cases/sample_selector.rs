//! Representative comments per sentiment bucket

use crate::domain::feedback::{FeedbackTable, SampleSet, SentimentLabel};

pub const DEFAULT_SAMPLE_LIMIT: usize = 3;

/// Take up to `limit` texts per label, in table order.
pub fn select_samples(table: &FeedbackTable, limit: usize) -> SampleSet {
    let mut samples = SampleSet::default();
    for label in SentimentLabel::ALL {
        *samples.get_mut(label) = table
            .rows_with(label)
            .map(|row| row.text.clone())
            .take(limit)
            .collect();
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::FeedbackRow;

    fn table(rows: &[(f64, &str)]) -> FeedbackTable {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, (rating, text))| FeedbackRow::new(i.to_string(), text.to_string(), *rating))
            .collect();
        FeedbackTable::new(vec![], rows)
    }

    #[test]
    fn test_limit_and_order() {
        let table = table(&[
            (5.0, "p1"),
            (1.0, "n1"),
            (4.0, "p2"),
            (5.0, "p3"),
            (4.0, "p4"),
            (2.0, "n2"),
        ]);

        let samples = select_samples(&table, DEFAULT_SAMPLE_LIMIT);

        assert_eq!(samples.positive, vec!["p1", "p2", "p3"]);
        assert!(samples.neutral.is_empty());
        assert_eq!(samples.negative, vec!["n1", "n2"]);
    }

    #[test]
    fn test_custom_limit() {
        let table = table(&[(3.0, "a"), (3.0, "b"), (3.0, "c")]);

        assert_eq!(select_samples(&table, 1).neutral, vec!["a"]);
        assert!(select_samples(&table, 0).neutral.is_empty());
    }
}

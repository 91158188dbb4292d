// ============================================================
// FEEDBACK CSV READER
// ============================================================
// Decode uploaded bytes and validate them into a FeedbackTable

use std::borrow::Cow;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::domain::feedback::{FeedbackRejection, FeedbackRow, FeedbackTable, REQUIRED_COLUMNS};

/// Validating CSV reader for feedback uploads
pub struct FeedbackCsvReader {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for FeedbackCsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Column positions resolved from the header row
struct ColumnIndex {
    feedback_id: usize,
    text: usize,
    rating: usize,
}

impl FeedbackCsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Validate raw upload bytes. All-or-nothing: any bad row rejects the file.
    pub fn validate(&self, bytes: &[u8]) -> Result<FeedbackTable, FeedbackRejection> {
        let content = decode(bytes);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::None)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|_| FeedbackRejection::Unparseable)?
            .clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(FeedbackRejection::Unparseable);
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|_| FeedbackRejection::Unparseable)?;
            // Short rows are padded with empty cells; long rows have nowhere to go.
            if record.len() > headers.len() {
                return Err(FeedbackRejection::Unparseable);
            }
            records.push(record);
        }

        let columns = resolve_columns(&headers)?;

        let mut ratings = Vec::with_capacity(records.len());
        for record in &records {
            let rating = parse_rating(cell(record, columns.rating))
                .ok_or(FeedbackRejection::NonNumericRating)?;
            ratings.push(rating);
        }

        let mut texts = Vec::with_capacity(records.len());
        for record in &records {
            let text = cell(record, columns.text).trim();
            if text.is_empty() {
                return Err(FeedbackRejection::EmptyText);
            }
            texts.push(text.to_string());
        }

        let rows: Vec<FeedbackRow> = records
            .iter()
            .zip(texts)
            .zip(ratings)
            .map(|((record, text), rating)| {
                FeedbackRow::new(cell(record, columns.feedback_id).to_string(), text, rating)
            })
            .collect();

        debug!(rows = rows.len(), columns = headers.len(), "Validated feedback CSV");

        Ok(FeedbackTable::new(
            headers.iter().map(str::to_string).collect(),
            rows,
        ))
    }
}

/// UTF-8 (BOM stripped) first; bytes that are not UTF-8 are read as Windows-1252.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}

fn resolve_columns(headers: &StringRecord) -> Result<ColumnIndex, FeedbackRejection> {
    let position = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| position(*name).is_none())
        .map(str::to_string)
        .collect();

    match (position("feedback_id"), position("text"), position("rating")) {
        (Some(feedback_id), Some(text), Some(rating)) => Ok(ColumnIndex {
            feedback_id,
            text,
            rating,
        }),
        _ => Err(FeedbackRejection::MissingColumns { columns: missing }),
    }
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn parse_rating(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| !rating.is_nan())
}

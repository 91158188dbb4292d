// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Decoding and validation of uploaded feedback CSVs

mod feedback_reader;

pub use feedback_reader::FeedbackCsvReader;

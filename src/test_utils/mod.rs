/// Scripted in-memory connection
pub mod recording;

/// Row and result set helpers
pub mod test_helpers;

pub use recording::RecordingConnection;
pub use test_helpers::{create_test_row, create_test_result_set};

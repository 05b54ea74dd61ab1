pub mod error;

pub use error::{ApiError, CoachError, ErrorCategory, ErrorClassifier, Result, ResultExt};

mod errors;
mod types;

pub use errors::SubmissionError;
pub use types::SubmissionResult;

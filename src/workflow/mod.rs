pub mod status;
pub mod submission;

pub use status::{StatusArea, StatusKind, StatusMessage};
pub use submission::{SubmissionController, SubmissionResult};

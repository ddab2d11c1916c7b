pub mod download_writer;
pub mod payload;

pub use download_writer::DownloadWriter;
pub use payload::{build_payload, collect_exam_answers, SubmissionPayload, EXAM_ANSWERS_FIELD};

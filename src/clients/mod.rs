pub mod upload_client;

pub use upload_client::{filename_from_content_disposition, UploadClient, UploadOutcome};

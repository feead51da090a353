pub mod fcs_file;
pub mod job;
pub mod queue_message;
pub mod upload_batch;
pub mod user;

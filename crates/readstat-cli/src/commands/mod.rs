pub mod init;
pub mod report;
pub mod summarize;
pub mod validate;

pub mod batch;
pub mod queries;
pub mod report;

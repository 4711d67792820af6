pub mod applicants;
pub mod insights;

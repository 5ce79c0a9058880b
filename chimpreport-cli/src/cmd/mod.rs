pub mod doctor;
pub mod report;
pub mod url;

//! Output: the rules document and console reporting

pub mod console;
pub mod yaml;

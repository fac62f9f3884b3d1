//! Utility modules shared by the content editors and tool wrappers.

pub mod command;
pub mod date;
pub mod front_matter;
pub mod fs;
pub mod git;
pub mod log;
pub mod slug;

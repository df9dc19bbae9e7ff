//! CLI commands

pub mod list;
pub mod new;
pub mod related;
pub mod search;
pub mod sync;

//! Terminal clock and weekly work schedule tracker.
//! The weekly schedule is a set of `HH:MM` intervals per day, which is summed up and compared
//! against daily and weekly targets. All of the arithmetic lives in [schedule] and doesn't depend
//! on anything else, the rest of the crate is storage and terminal plumbing around it.

pub mod cli;
pub mod fs;
pub mod schedule;
pub mod settings;
pub mod utils;

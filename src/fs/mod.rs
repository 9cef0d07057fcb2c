//! Small file system helpers shared by the settings stores.

pub mod operations;

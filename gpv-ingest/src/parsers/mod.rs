//! Publisher-specific announcement parsers.

pub mod zoe;

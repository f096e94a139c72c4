//! Library components of the `labsum` command-line tool.

pub mod input;
pub mod logging;
pub mod render;

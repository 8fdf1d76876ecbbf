//! Filesystem and network helpers shared by the bundler backends.

pub mod fs;
pub mod http;

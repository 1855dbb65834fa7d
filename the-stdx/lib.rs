//! Host helpers shared by the text crates.

pub mod fs;

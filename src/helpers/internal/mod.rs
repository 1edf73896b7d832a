//! Internal helpers shared across the public helper modules

pub mod fs_utils;

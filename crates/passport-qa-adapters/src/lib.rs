//! Passport QA Adapters - External adapters for passport-qa.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - Landmark sidecar files

pub mod fs;
pub mod landmarks;

pub use fs::FsImageSource;
pub use landmarks::{NoLandmarks, SidecarLandmarks};

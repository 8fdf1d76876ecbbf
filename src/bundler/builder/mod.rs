//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that drives the
//! WiX backend to create installer artifacts.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads configuration from [`Settings`](crate::bundler::Settings)
//! 2. Determines which package types to create
//! 3. Delegates to the WiX backend
//! 4. Calculates sizes and checksums
//! 5. Returns [`BundledArtifact`](crate::bundler::BundledArtifact) results
//!
//! # Example
//!
//! ```no_run
//! use octobuild_installer::bundler::{Bundler, Settings};
//!
//! # async fn example(settings: Settings) -> octobuild_installer::bundler::Result<()> {
//! let bundler = Bundler::new(settings);
//! let artifacts = bundler.bundle().await?;
//!
//! for artifact in artifacts {
//!     println!("Created: {} ({} bytes)", artifact.package_type, artifact.size);
//!     println!("SHA256: {}", artifact.checksum);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`tool_detection`] - External tool availability checking

pub mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::Bundler;

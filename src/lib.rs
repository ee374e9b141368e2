//! cke: render configuration into Kubernetes-style YAML manifests.
//!
//! The pipeline is linear:
//!
//! 1. [`discover`] lists source files under a root directory.
//! 2. [`evaluate`] loads them through the [`engine`], one instance per
//!    directory, and encode-checks each instance.
//! 3. [`render::extract_plans`] finds values with an `apiVersion` field and
//!    validates them strictly.
//! 4. [`render::render_stream`] or [`render::render_files`] writes the YAML.

pub mod cli;
pub mod commands;
pub mod config;
pub mod discover;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod exit_codes;
pub mod fs;
pub mod render;

#[cfg(test)]
mod test_support;

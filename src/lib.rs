//! Generates Rust clients for Solana programs from their Anchor or Shank IDL.
//!
//! A run loads the IDL, builds the node graph, applies the rewrite rules in
//! [`transforms`] bottom-up, and renders the client into
//! `clients/rust/<crate>/src/generated`, replacing whatever was there.

pub mod config;
pub mod constants;
pub mod errors;
pub mod from_anchor;
pub mod generator;
pub mod models;
pub mod nodes;
pub mod transforms;
pub mod utils;
pub mod visitors;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::config::{ClientTarget, GeneratorConfig};
use crate::generator::RustRenderer;
use crate::visitors::BottomUpTransformer;

/// What a run produced for one client
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub program: String,
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Main entry point for generating one client.
///
/// Nothing under the output directory is touched until the IDL has been
/// loaded, transformed and rendered in memory.
pub fn generate_client(target: &ClientTarget, config: &GeneratorConfig) -> Result<GenerationReport> {
    let idl_path = config.idl_path(target);
    let idl = models::load_idl(&idl_path)
        .with_context(|| format!("Failed to load IDL: {}", idl_path.display()))?;

    let root = from_anchor::root_node_from_anchor(&idl)
        .with_context(|| format!("Failed to build nodes from {}", idl_path.display()))?;

    let root = BottomUpTransformer::new(transforms::default_rules())
        .visit(&root)
        .context("Failed to apply transform rules")?;

    let output_dir = config.output_dir(target);
    let renderer = RustRenderer::new(&output_dir, config.render_options(target));
    let files = renderer
        .render(&root)
        .with_context(|| format!("Failed to render client into {}", output_dir.display()))?;

    info!(
        "Generated {} files for {} in {}",
        files.len(),
        root.program.name,
        output_dir.display()
    );

    Ok(GenerationReport {
        program: root.program.name,
        output_dir,
        files,
    })
}

/// Generate every configured client, in order, stopping at the first failure
pub fn generate_all(config: &GeneratorConfig) -> Result<Vec<GenerationReport>> {
    config
        .targets
        .iter()
        .map(|target| generate_client(target, config))
        .collect()
}

/// Version of the generator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

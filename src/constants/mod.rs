//! Constants used throughout the generator

pub mod anchor;

use crate::nodes::NumberFormat;

/// Directory holding the IDL documents, relative to the project root
pub const IDL_DIR: &str = "idl";

/// Directory holding the generated Rust client crates, relative to the project root
pub const RUST_CLIENTS_DIR: &str = "clients/rust";

/// Render target inside a client crate
pub const GENERATED_SUBDIR: &str = "src/generated";

/// Toolchain handed to `cargo fmt` when formatting the generated code
pub const DEFAULT_TOOLCHAIN: &str = "+nightly-2024-07-25";

/// IDL file of the vault whitelist program
pub const VAULT_WHITELIST_IDL: &str = "vault_whitelist.json";

/// Client crate generated from [`VAULT_WHITELIST_IDL`]
pub const VAULT_WHITELIST_CLIENT: &str = "vault-whitelist-client";

/// Name of the field prepended to every account layout
pub const DISCRIMINATOR_FIELD: &str = "discriminator";

/// Numeric type of the prepended discriminator field (8 bytes)
pub const DISCRIMINATOR_FORMAT: NumberFormat = NumberFormat::U64;

/// Pod wrapper types and the plain integer each one stands for.
///
/// Names are the camelCase form the node graph uses.
pub const POD_ALIASES: &[(&str, NumberFormat)] = &[
    ("podU128", NumberFormat::U128),
    ("podU64", NumberFormat::U64),
    ("podU32", NumberFormat::U32),
    ("podU16", NumberFormat::U16),
];

//! IDL document root and loading

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::anchor::PUBKEY_LENGTH;
use crate::errors::{ErrorContext, ErrorExt, GeneratorError, GeneratorResult};
use crate::models::account::{IdlAccountDef, IdlErrorCode};
use crate::models::instruction::IdlInstruction;
use crate::models::types::IdlTypeDef;

/// Interface Description Language (IDL) document, as written by Anchor or Shank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorIdl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IdlMetadata>,
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlAccountDef>,
    #[serde(default)]
    pub types: Vec<IdlTypeDef>,
    #[serde(default)]
    pub errors: Vec<IdlErrorCode>,
    /// Not rendered; kept so documents round-trip
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<serde_json::Value>,
    /// Not rendered; kept so documents round-trip
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<serde_json::Value>,
}

/// Program metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdlMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Program origin (shank, anchor)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AnchorIdl {
    /// Program name from the top level (legacy) or from `metadata` (0.30)
    pub fn program_name(&self) -> GeneratorResult<&str> {
        self.name
            .as_deref()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.name.as_deref()))
            .ok_or_else(|| GeneratorError::InvalidIdl("IDL has no program name".to_string()))
    }

    /// Program version, falling back to `0.0.0`
    pub fn program_version(&self) -> &str {
        self.version
            .as_deref()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.version.as_deref()))
            .unwrap_or("0.0.0")
    }

    /// `metadata.origin`, if any
    pub fn origin(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.origin.as_deref())
    }

    /// Program address, validated as a base58 encoded 32 byte key.
    ///
    /// `Ok(None)` when the document does not carry one.
    pub fn program_address(&self) -> GeneratorResult<Option<&str>> {
        let address = self
            .address
            .as_deref()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.address.as_deref()));

        if let Some(address) = address {
            validate_address(address)?;
        }

        Ok(address)
    }
}

/// Check that `address` is a base58 encoded 32 byte key
pub fn validate_address(address: &str) -> GeneratorResult<()> {
    let decoded = bs58::decode(address).into_vec().map_err(|e| {
        GeneratorError::InvalidIdl(format!("Address {} is not base58: {}", address, e))
    })?;
    if decoded.len() != PUBKEY_LENGTH {
        return Err(GeneratorError::InvalidIdl(format!(
            "Address {} decodes to {} bytes, expected {}",
            address,
            decoded.len(),
            PUBKEY_LENGTH
        )));
    }
    Ok(())
}

/// Read and parse an IDL document
pub fn load_idl(path: &Path) -> GeneratorResult<AnchorIdl> {
    info!("Loading IDL from: {}", path.display());

    let json = fs::read_to_string(path)
        .with_context(ErrorContext::new("models", "read IDL file").with_path(path))?;

    debug!("Read IDL ({} bytes)", json.len());
    parse_idl_content(&json)
}

/// Parse an IDL document from a JSON string
pub fn parse_idl_content(content: &str) -> GeneratorResult<AnchorIdl> {
    let idl: AnchorIdl = serde_json::from_str(content)?;
    debug!(
        "Parsed IDL with {} instructions, {} accounts, {} types, {} errors",
        idl.instructions.len(),
        idl.accounts.len(),
        idl.types.len(),
        idl.errors.len()
    );
    Ok(idl)
}

//! Instruction entries of an IDL document

use serde::{Deserialize, Serialize};

use super::types::IdlField;

/// Shank-style discriminant: `{"type": "u8", "value": N}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlDiscriminant {
    #[serde(rename = "type")]
    pub ty: String,
    pub value: u64,
}

/// Represents a program instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub docs: Vec<String>,
    /// Anchor discriminator (8 bytes)
    #[serde(default)]
    pub discriminator: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminant: Option<IdlDiscriminant>,
    #[serde(default)]
    pub accounts: Vec<IdlInstructionAccount>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

/// Represents an account used by an instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlInstructionAccount {
    pub name: String,
    #[serde(rename = "isMut", alias = "writable", default)]
    pub is_mut: bool,
    #[serde(rename = "isSigner", alias = "signer", default)]
    pub is_signer: bool,
    #[serde(rename = "isOptional", alias = "optional", default)]
    pub is_optional: bool,
    #[serde(default)]
    pub docs: Vec<String>,
    /// Fixed address, when the account is always the same (e.g. the system program)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

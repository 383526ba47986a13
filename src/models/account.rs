//! Account layouts of an IDL document

use serde::{Deserialize, Serialize};

use super::types::IdlTypeDefTy;

/// Represents a program account structure.
///
/// Legacy and Shank IDLs carry the layout inline in `type`; Anchor 0.30 only
/// lists the name and discriminator and keeps the layout in `types`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlAccountDef {
    pub name: String,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default)]
    pub discriminator: Vec<u8>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<IdlTypeDefTy>,
}

/// Error definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlErrorCode {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub msg: Option<String>,
}

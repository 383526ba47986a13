//! Field and type definitions shared by instructions, accounts and `types`

use serde::{Deserialize, Serialize};

/// A type reference as it appears in an IDL field.
///
/// Primitives are bare strings (`"u64"`, `"publicKey"`); composites are
/// single-key objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlType {
    Primitive(String),
    Vec { vec: Box<IdlType> },
    Option { option: Box<IdlType> },
    COption { coption: Box<IdlType> },
    Array { array: (Box<IdlType>, usize) },
    Defined { defined: IdlDefined },
}

/// Target of a `defined` type.
///
/// Legacy and Shank IDLs use a bare name, Anchor 0.30 uses `{ "name": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlDefined {
    Name(String),
    Named { name: String },
}

impl IdlDefined {
    pub fn name(&self) -> &str {
        match self {
            IdlDefined::Name(name) => name,
            IdlDefined::Named { name } => name,
        }
    }
}

/// A named, typed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(rename = "type")]
    pub ty: IdlType,
}

/// Body of a type definition or an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IdlTypeDefTy {
    Struct {
        #[serde(default)]
        fields: Vec<IdlField>,
    },
    Enum {
        #[serde(default)]
        variants: Vec<IdlEnumVariant>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlEnumVariant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<IdlEnumFields>,
}

/// Payload of an enum variant: named (struct-like) or positional (tuple-like)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlEnumFields {
    Named(Vec<IdlField>),
    Tuple(Vec<IdlType>),
}

/// Entry of the top-level `types` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlTypeDef {
    pub name: String,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(rename = "type")]
    pub ty: IdlTypeDefTy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_composite_types() {
        let ty: IdlType = serde_json::from_str(r#"{"array": ["u8", 32]}"#).unwrap();
        assert_eq!(
            ty,
            IdlType::Array {
                array: (Box::new(IdlType::Primitive("u8".to_string())), 32)
            }
        );

        let ty: IdlType = serde_json::from_str(r#"{"vec": {"defined": "PodU64"}}"#).unwrap();
        match ty {
            IdlType::Vec { vec } => match *vec {
                IdlType::Defined { defined } => assert_eq!(defined.name(), "PodU64"),
                other => panic!("unexpected inner type: {other:?}"),
            },
            other => panic!("unexpected type: {other:?}"),
        }
    }

    #[test]
    fn test_parse_modern_defined() {
        let ty: IdlType = serde_json::from_str(r#"{"defined": {"name": "Config"}}"#).unwrap();
        match ty {
            IdlType::Defined { defined } => assert_eq!(defined.name(), "Config"),
            other => panic!("unexpected type: {other:?}"),
        }
    }

    #[test]
    fn test_enum_variant_payloads() {
        let def: IdlTypeDef = serde_json::from_str(
            r#"{
                "name": "Action",
                "type": {
                    "kind": "enum",
                    "variants": [
                        { "name": "Noop" },
                        { "name": "Amount", "fields": ["u64"] },
                        { "name": "Move", "fields": [{ "name": "to", "type": "publicKey" }] }
                    ]
                }
            }"#,
        )
        .unwrap();

        let IdlTypeDefTy::Enum { variants } = def.ty else {
            panic!("expected enum");
        };
        assert!(variants[0].fields.is_none());
        assert!(matches!(variants[1].fields, Some(IdlEnumFields::Tuple(_))));
        assert!(matches!(variants[2].fields, Some(IdlEnumFields::Named(_))));
    }
}

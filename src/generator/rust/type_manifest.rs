//! Rust spelling of type nodes, plus the imports that spelling needs

use std::collections::BTreeSet;

use heck::{ToPascalCase, ToSnakeCase};

use crate::errors::{GeneratorError, GeneratorResult};
use crate::nodes::{ArrayCount, NumberFormat, TypeNode};

pub const PUBKEY_IMPORT: &str = "solana_program::pubkey::Pubkey";

/// `use` paths collected while rendering one file
#[derive(Debug, Default, Clone)]
pub struct ImportMap {
    imports: BTreeSet<String>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>) {
        self.imports.insert(path.into());
    }

    /// One `use` line per path, sorted
    pub fn render(&self) -> String {
        self.imports
            .iter()
            .map(|path| format!("use {};\n", path))
            .collect()
    }
}

/// Rust type for `ty`, recording imports into `imports`.
///
/// Struct and enum types are only valid at the top of a defined type, where
/// the caller renders them as items; in field position they are rejected.
pub fn rust_type(ty: &TypeNode, imports: &mut ImportMap) -> GeneratorResult<String> {
    Ok(match ty {
        TypeNode::Number { format } => format.as_str().to_string(),
        TypeNode::Boolean => "bool".to_string(),
        TypeNode::PublicKey => {
            imports.add(PUBKEY_IMPORT);
            "Pubkey".to_string()
        }
        TypeNode::String => "String".to_string(),
        TypeNode::Bytes => "Vec<u8>".to_string(),
        TypeNode::Array { item, count } => {
            let item = rust_type(item, imports)?;
            match count {
                ArrayCount::Fixed(n) => format!("[{}; {}]", item, n),
                ArrayCount::Prefixed(NumberFormat::U32) => format!("Vec<{}>", item),
                ArrayCount::Prefixed(other) => {
                    return Err(GeneratorError::Render(format!(
                        "Arrays prefixed with {} are not supported by borsh",
                        other
                    )))
                }
            }
        }
        TypeNode::Option { item } => format!("Option<{}>", rust_type(item, imports)?),
        TypeNode::DefinedTypeLink { name } => {
            let type_name = name.to_pascal_case();
            imports.add(format!("crate::generated::types::{}", type_name));
            type_name
        }
        TypeNode::Struct(_) | TypeNode::Enum(_) => {
            return Err(GeneratorError::Render(
                "Inline struct and enum types must be declared as defined types".to_string(),
            ))
        }
    })
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

/// snake_case identifier for a field or module, escaped when it is a keyword
pub fn field_ident(name: &str) -> String {
    let ident = name.to_snake_case();
    if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{}", ident)
    } else {
        ident
    }
}

/// `/// line` comments for a docs list, indented by `indent`
pub fn render_docs(docs: &[String], indent: &str) -> String {
    docs.iter()
        .map(|line| {
            if line.is_empty() {
                format!("{}///\n", indent)
            } else {
                format!("{}/// {}\n", indent, line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{defined_type_link_node, number_type_node};

    #[test]
    fn test_composite_types() {
        let mut imports = ImportMap::new();
        let ty = TypeNode::Option {
            item: Box::new(TypeNode::Array {
                item: Box::new(TypeNode::PublicKey),
                count: ArrayCount::Prefixed(NumberFormat::U32),
            }),
        };
        assert_eq!(rust_type(&ty, &mut imports).unwrap(), "Option<Vec<Pubkey>>");
        assert_eq!(imports.render(), "use solana_program::pubkey::Pubkey;\n");
    }

    #[test]
    fn test_fixed_array_and_link() {
        let mut imports = ImportMap::new();
        let ty = TypeNode::Array {
            item: Box::new(defined_type_link_node("podU64")),
            count: ArrayCount::Fixed(4),
        };
        assert_eq!(rust_type(&ty, &mut imports).unwrap(), "[PodU64; 4]");
        assert_eq!(imports.render(), "use crate::generated::types::PodU64;\n");
        assert_eq!(
            rust_type(&number_type_node(NumberFormat::U128), &mut imports).unwrap(),
            "u128"
        );
    }

    #[test]
    fn test_unsupported_prefix() {
        let mut imports = ImportMap::new();
        let ty = TypeNode::Array {
            item: Box::new(TypeNode::Boolean),
            count: ArrayCount::Prefixed(NumberFormat::U8),
        };
        assert!(matches!(
            rust_type(&ty, &mut imports),
            Err(GeneratorError::Render(_))
        ));
    }

    #[test]
    fn test_keyword_fields() {
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("metaMerkleRoot"), "meta_merkle_root");
    }
}

//! Type nodes: how a field, argument or defined type is laid out in bytes

use std::fmt;

/// Fixed-width numeric formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
}

impl NumberFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        let format = match name {
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "f32" => Self::F32,
            "f64" => Self::F64,
            _ => return None,
        };
        Some(format)
    }

    /// Rust spelling of the format, which is also its IDL spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    pub fn bit_width(&self) -> usize {
        match self {
            Self::U8 | Self::I8 => 8,
            Self::U16 | Self::I16 => 16,
            Self::U32 | Self::I32 | Self::F32 => 32,
            Self::U64 | Self::I64 | Self::F64 => 64,
            Self::U128 | Self::I128 => 128,
        }
    }

    pub fn byte_size(&self) -> usize {
        self.bit_width() / 8
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many items an array holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayCount {
    /// Known at compile time, no prefix on the wire
    Fixed(usize),
    /// Length written before the items with the given format
    Prefixed(NumberFormat),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Number { format: NumberFormat },
    Boolean,
    PublicKey,
    String,
    Bytes,
    Array { item: Box<TypeNode>, count: ArrayCount },
    Option { item: Box<TypeNode> },
    Struct(StructTypeNode),
    Enum(EnumTypeNode),
    DefinedTypeLink { name: String },
}

impl TypeNode {
    /// Name of the linked type for a `DefinedTypeLink`, `None` for everything else
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeNode::DefinedTypeLink { name } => Some(name),
            _ => None,
        }
    }

    /// Size in bytes when every value of this type has the same encoded length.
    ///
    /// `resolve` returns the type behind a defined-type link.
    pub fn fixed_size<'r, F>(&self, resolve: &F) -> Option<usize>
    where
        F: Fn(&str) -> Option<&'r TypeNode>,
    {
        match self {
            TypeNode::Number { format } => Some(format.byte_size()),
            TypeNode::Boolean => Some(1),
            TypeNode::PublicKey => Some(32),
            TypeNode::String | TypeNode::Bytes | TypeNode::Option { .. } => None,
            TypeNode::Array { item, count } => match count {
                ArrayCount::Fixed(n) => item.fixed_size(resolve).map(|s| s * n),
                ArrayCount::Prefixed(_) => None,
            },
            TypeNode::Struct(s) => s.fixed_size(resolve),
            TypeNode::Enum(e) => {
                if e.is_scalar() {
                    Some(1)
                } else {
                    None
                }
            }
            TypeNode::DefinedTypeLink { name } => resolve(name).and_then(|t| t.fixed_size(resolve)),
        }
    }
}

/// Ordered fields of a struct
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructTypeNode {
    pub fields: Vec<StructFieldTypeNode>,
}

impl StructTypeNode {
    pub fn new(fields: Vec<StructFieldTypeNode>) -> Self {
        Self { fields }
    }

    pub fn fixed_size<'r, F>(&self, resolve: &F) -> Option<usize>
    where
        F: Fn(&str) -> Option<&'r TypeNode>,
    {
        self.fields
            .iter()
            .map(|f| f.ty.fixed_size(resolve))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructFieldTypeNode {
    pub name: String,
    pub docs: Vec<String>,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumTypeNode {
    pub variants: Vec<EnumVariantTypeNode>,
}

impl EnumTypeNode {
    /// True when no variant carries data
    pub fn is_scalar(&self) -> bool {
        self.variants
            .iter()
            .all(|v| matches!(v, EnumVariantTypeNode::Empty { .. }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnumVariantTypeNode {
    Empty { name: String },
    Tuple { name: String, items: Vec<TypeNode> },
    Struct { name: String, fields: StructTypeNode },
}

impl EnumVariantTypeNode {
    pub fn name(&self) -> &str {
        match self {
            EnumVariantTypeNode::Empty { name }
            | EnumVariantTypeNode::Tuple { name, .. }
            | EnumVariantTypeNode::Struct { name, .. } => name,
        }
    }
}

/// `numberTypeNode(format)`
pub fn number_type_node(format: NumberFormat) -> TypeNode {
    TypeNode::Number { format }
}

/// `structFieldTypeNode({ name, type })` with no docs
pub fn struct_field_type_node(name: &str, ty: TypeNode) -> StructFieldTypeNode {
    StructFieldTypeNode {
        name: name.to_string(),
        docs: Vec::new(),
        ty,
    }
}

/// `definedTypeLinkNode(name)`
pub fn defined_type_link_node(name: &str) -> TypeNode {
    TypeNode::DefinedTypeLink {
        name: name.to_string(),
    }
}

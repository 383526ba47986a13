//! Intermediate node graph built from an IDL document.
//!
//! Nodes are plain values. Transformations never edit a graph in place; they
//! build a new one, so a graph handed to a transformer is still intact after it
//! returns. Names inside the graph are camelCase.

mod node;
mod type_node;

pub use self::node::{assert_is_node, Node, NodeKind};
pub use self::type_node::{
    defined_type_link_node, number_type_node, struct_field_type_node, ArrayCount, EnumTypeNode,
    EnumVariantTypeNode, NumberFormat, StructFieldTypeNode, StructTypeNode, TypeNode,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RootNode {
    pub program: ProgramNode,
    pub additional_programs: Vec<ProgramNode>,
}

impl RootNode {
    pub fn new(program: ProgramNode) -> Self {
        Self {
            program,
            additional_programs: Vec::new(),
        }
    }

    /// Every program in the graph, main program first
    pub fn all_programs(&self) -> impl Iterator<Item = &ProgramNode> {
        std::iter::once(&self.program).chain(self.additional_programs.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramNode {
    pub name: String,
    /// Base58 program address, empty when the IDL does not carry one
    pub public_key: String,
    pub version: String,
    pub origin: Option<String>,
    pub accounts: Vec<AccountNode>,
    pub instructions: Vec<InstructionNode>,
    pub defined_types: Vec<DefinedTypeNode>,
    pub errors: Vec<ErrorNode>,
}

impl ProgramNode {
    /// Type behind a defined-type link
    pub fn resolve_type(&self, name: &str) -> Option<&TypeNode> {
        self.defined_types
            .iter()
            .find(|t| t.name == name)
            .map(|t| &t.ty)
    }
}

/// On-chain account layout
#[derive(Debug, Clone, PartialEq)]
pub struct AccountNode {
    pub name: String,
    pub docs: Vec<String>,
    /// Discriminator bytes declared by the IDL, empty when there are none
    pub discriminator: Vec<u8>,
    pub data: StructTypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructionNode {
    pub name: String,
    pub docs: Vec<String>,
    /// Bytes written before the arguments
    pub discriminator: Vec<u8>,
    pub accounts: Vec<InstructionAccountNode>,
    pub arguments: Vec<InstructionArgumentNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructionAccountNode {
    pub name: String,
    pub docs: Vec<String>,
    pub is_writable: bool,
    pub is_signer: bool,
    pub is_optional: bool,
    pub default_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructionArgumentNode {
    pub name: String,
    pub docs: Vec<String>,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefinedTypeNode {
    pub name: String,
    pub docs: Vec<String>,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNode {
    pub code: u32,
    pub name: String,
    pub message: String,
}

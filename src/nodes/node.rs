//! Kind-erased node wrapper used by visitors and transform rules

use std::fmt;

use super::{
    AccountNode, DefinedTypeNode, ErrorNode, InstructionAccountNode, InstructionArgumentNode,
    InstructionNode, ProgramNode, RootNode, StructFieldTypeNode, StructTypeNode, TypeNode,
};
use crate::errors::{GeneratorError, GeneratorResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Program,
    Account,
    Instruction,
    InstructionAccount,
    InstructionArgument,
    DefinedType,
    Error,
    StructFieldType,
    NumberType,
    BooleanType,
    PublicKeyType,
    StringType,
    BytesType,
    ArrayType,
    OptionType,
    StructType,
    EnumType,
    DefinedTypeLink,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "rootNode",
            NodeKind::Program => "programNode",
            NodeKind::Account => "accountNode",
            NodeKind::Instruction => "instructionNode",
            NodeKind::InstructionAccount => "instructionAccountNode",
            NodeKind::InstructionArgument => "instructionArgumentNode",
            NodeKind::DefinedType => "definedTypeNode",
            NodeKind::Error => "errorNode",
            NodeKind::StructFieldType => "structFieldTypeNode",
            NodeKind::NumberType => "numberTypeNode",
            NodeKind::BooleanType => "booleanTypeNode",
            NodeKind::PublicKeyType => "publicKeyTypeNode",
            NodeKind::StringType => "stringTypeNode",
            NodeKind::BytesType => "bytesTypeNode",
            NodeKind::ArrayType => "arrayTypeNode",
            NodeKind::OptionType => "optionTypeNode",
            NodeKind::StructType => "structTypeNode",
            NodeKind::EnumType => "enumTypeNode",
            NodeKind::DefinedTypeLink => "definedTypeLinkNode",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any node of the graph
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Root(RootNode),
    Program(ProgramNode),
    Account(AccountNode),
    Instruction(InstructionNode),
    InstructionAccount(InstructionAccountNode),
    InstructionArgument(InstructionArgumentNode),
    DefinedType(DefinedTypeNode),
    Error(ErrorNode),
    StructFieldType(StructFieldTypeNode),
    Type(TypeNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::Program(_) => NodeKind::Program,
            Node::Account(_) => NodeKind::Account,
            Node::Instruction(_) => NodeKind::Instruction,
            Node::InstructionAccount(_) => NodeKind::InstructionAccount,
            Node::InstructionArgument(_) => NodeKind::InstructionArgument,
            Node::DefinedType(_) => NodeKind::DefinedType,
            Node::Error(_) => NodeKind::Error,
            Node::StructFieldType(_) => NodeKind::StructFieldType,
            Node::Type(ty) => match ty {
                TypeNode::Number { .. } => NodeKind::NumberType,
                TypeNode::Boolean => NodeKind::BooleanType,
                TypeNode::PublicKey => NodeKind::PublicKeyType,
                TypeNode::String => NodeKind::StringType,
                TypeNode::Bytes => NodeKind::BytesType,
                TypeNode::Array { .. } => NodeKind::ArrayType,
                TypeNode::Option { .. } => NodeKind::OptionType,
                TypeNode::Struct(_) => NodeKind::StructType,
                TypeNode::Enum(_) => NodeKind::EnumType,
                TypeNode::DefinedTypeLink { .. } => NodeKind::DefinedTypeLink,
            },
        }
    }

    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    fn mismatch(&self, expected: NodeKind) -> GeneratorError {
        GeneratorError::NodeKindMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn into_root(self) -> GeneratorResult<RootNode> {
        match self {
            Node::Root(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::Root)),
        }
    }

    pub fn into_program(self) -> GeneratorResult<ProgramNode> {
        match self {
            Node::Program(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::Program)),
        }
    }

    pub fn into_account(self) -> GeneratorResult<AccountNode> {
        match self {
            Node::Account(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::Account)),
        }
    }

    pub fn into_instruction(self) -> GeneratorResult<InstructionNode> {
        match self {
            Node::Instruction(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::Instruction)),
        }
    }

    pub fn into_instruction_account(self) -> GeneratorResult<InstructionAccountNode> {
        match self {
            Node::InstructionAccount(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::InstructionAccount)),
        }
    }

    pub fn into_instruction_argument(self) -> GeneratorResult<InstructionArgumentNode> {
        match self {
            Node::InstructionArgument(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::InstructionArgument)),
        }
    }

    pub fn into_defined_type(self) -> GeneratorResult<DefinedTypeNode> {
        match self {
            Node::DefinedType(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::DefinedType)),
        }
    }

    pub fn into_error(self) -> GeneratorResult<ErrorNode> {
        match self {
            Node::Error(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::Error)),
        }
    }

    pub fn into_struct_field_type(self) -> GeneratorResult<StructFieldTypeNode> {
        match self {
            Node::StructFieldType(node) => Ok(node),
            other => Err(other.mismatch(NodeKind::StructFieldType)),
        }
    }

    /// Any type node
    pub fn into_type(self) -> GeneratorResult<TypeNode> {
        match self {
            Node::Type(ty) => Ok(ty),
            // Reported against the most general type kind we can name.
            other => Err(other.mismatch(NodeKind::StructType)),
        }
    }

    pub fn into_struct_type(self) -> GeneratorResult<StructTypeNode> {
        match self {
            Node::Type(TypeNode::Struct(node)) => Ok(node),
            other => Err(other.mismatch(NodeKind::StructType)),
        }
    }
}

/// Fail with [`GeneratorError::NodeKindMismatch`] unless `node` is of `kind`
pub fn assert_is_node(node: &Node, kind: NodeKind) -> GeneratorResult<()> {
    if node.is_kind(kind) {
        Ok(())
    } else {
        Err(node.mismatch(kind))
    }
}

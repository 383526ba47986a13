//! Bottom-up transformer
//!
//! Children are visited first and their parent is rebuilt from the
//! transformed children before any rule sees the parent. A rule that
//! copies a parent therefore always copies the rewritten children.

use log::debug;

use super::TransformRule;
use crate::errors::{GeneratorError, GeneratorResult};
use crate::nodes::{
    AccountNode, DefinedTypeNode, EnumTypeNode, EnumVariantTypeNode, InstructionArgumentNode,
    InstructionNode, Node, NodeKind, ProgramNode, RootNode, StructFieldTypeNode, StructTypeNode,
    TypeNode,
};

pub struct BottomUpTransformer<'a> {
    rules: Vec<Box<dyn TransformRule + 'a>>,
}

impl<'a> BottomUpTransformer<'a> {
    pub fn new(rules: Vec<Box<dyn TransformRule + 'a>>) -> Self {
        Self { rules }
    }

    /// Transform a whole graph. `root` is left untouched; the result is a new graph.
    pub fn visit(&self, root: &RootNode) -> GeneratorResult<RootNode> {
        debug!("Running bottom-up transformer with {} rules", self.rules.len());
        let node = self.visit_node(Node::Root(root.clone()))?;
        node.into_root().map_err(|e| replacement_error(NodeKind::Root, e))
    }

    /// Transform a single node and everything below it
    pub fn visit_node(&self, node: Node) -> GeneratorResult<Node> {
        let rebuilt = match node {
            Node::Root(root) => Node::Root(self.visit_root(root)?),
            Node::Program(program) => Node::Program(self.visit_program(program)?),
            Node::Account(account) => Node::Account(self.visit_account(account)?),
            Node::Instruction(ix) => Node::Instruction(self.visit_instruction(ix)?),
            Node::InstructionArgument(arg) => Node::InstructionArgument(InstructionArgumentNode {
                ty: self.visit_type(arg.ty)?,
                ..arg
            }),
            Node::DefinedType(def) => Node::DefinedType(DefinedTypeNode {
                ty: self.visit_type(def.ty)?,
                ..def
            }),
            Node::StructFieldType(field) => Node::StructFieldType(StructFieldTypeNode {
                ty: self.visit_type(field.ty)?,
                ..field
            }),
            Node::Type(ty) => Node::Type(self.rebuild_type(ty)?),
            leaf @ (Node::InstructionAccount(_) | Node::Error(_)) => leaf,
        };

        self.apply_rules(rebuilt)
    }

    fn apply_rules(&self, mut node: Node) -> GeneratorResult<Node> {
        for rule in &self.rules {
            if rule.select(&node) {
                let before = node.kind();
                node = rule.transform(node)?;
                debug!("Rule rewrote [{}] into [{}]", before, node.kind());
            }
        }
        Ok(node)
    }

    fn visit_root(&self, root: RootNode) -> GeneratorResult<RootNode> {
        Ok(RootNode {
            program: self.visit_child(Node::Program(root.program), Node::into_program)?,
            additional_programs: self.visit_children(
                root.additional_programs,
                Node::Program,
                Node::into_program,
            )?,
        })
    }

    fn visit_program(&self, program: ProgramNode) -> GeneratorResult<ProgramNode> {
        Ok(ProgramNode {
            accounts: self.visit_children(program.accounts, Node::Account, Node::into_account)?,
            instructions: self.visit_children(
                program.instructions,
                Node::Instruction,
                Node::into_instruction,
            )?,
            defined_types: self.visit_children(
                program.defined_types,
                Node::DefinedType,
                Node::into_defined_type,
            )?,
            errors: self.visit_children(program.errors, Node::Error, Node::into_error)?,
            ..program
        })
    }

    fn visit_account(&self, account: AccountNode) -> GeneratorResult<AccountNode> {
        Ok(AccountNode {
            data: self.visit_struct(account.data)?,
            ..account
        })
    }

    fn visit_instruction(&self, ix: InstructionNode) -> GeneratorResult<InstructionNode> {
        Ok(InstructionNode {
            accounts: self.visit_children(
                ix.accounts,
                Node::InstructionAccount,
                Node::into_instruction_account,
            )?,
            arguments: self.visit_children(
                ix.arguments,
                Node::InstructionArgument,
                Node::into_instruction_argument,
            )?,
            ..ix
        })
    }

    fn visit_struct(&self, data: StructTypeNode) -> GeneratorResult<StructTypeNode> {
        self.visit_child(Node::Type(TypeNode::Struct(data)), Node::into_struct_type)
    }

    fn visit_type(&self, ty: TypeNode) -> GeneratorResult<TypeNode> {
        self.visit_child(Node::Type(ty), Node::into_type)
    }

    fn visit_fields(&self, fields: StructTypeNode) -> GeneratorResult<StructTypeNode> {
        Ok(StructTypeNode::new(self.visit_children(
            fields.fields,
            Node::StructFieldType,
            Node::into_struct_field_type,
        )?))
    }

    /// Rebuild a type node from its transformed children, without applying rules to it
    fn rebuild_type(&self, ty: TypeNode) -> GeneratorResult<TypeNode> {
        Ok(match ty {
            TypeNode::Array { item, count } => TypeNode::Array {
                item: Box::new(self.visit_type(*item)?),
                count,
            },
            TypeNode::Option { item } => TypeNode::Option {
                item: Box::new(self.visit_type(*item)?),
            },
            TypeNode::Struct(fields) => TypeNode::Struct(self.visit_fields(fields)?),
            TypeNode::Enum(e) => TypeNode::Enum(EnumTypeNode {
                variants: e
                    .variants
                    .into_iter()
                    .map(|variant| self.rebuild_variant(variant))
                    .collect::<GeneratorResult<Vec<_>>>()?,
            }),
            leaf => leaf,
        })
    }

    fn rebuild_variant(&self, variant: EnumVariantTypeNode) -> GeneratorResult<EnumVariantTypeNode> {
        Ok(match variant {
            EnumVariantTypeNode::Empty { name } => EnumVariantTypeNode::Empty { name },
            EnumVariantTypeNode::Tuple { name, items } => EnumVariantTypeNode::Tuple {
                name,
                items: items
                    .into_iter()
                    .map(|item| self.visit_type(item))
                    .collect::<GeneratorResult<Vec<_>>>()?,
            },
            EnumVariantTypeNode::Struct { name, fields } => EnumVariantTypeNode::Struct {
                name,
                fields: self.visit_fields(fields)?,
            },
        })
    }

    fn visit_child<T>(
        &self,
        child: Node,
        unwrap: fn(Node) -> GeneratorResult<T>,
    ) -> GeneratorResult<T> {
        let original = child.kind();
        let visited = self.visit_node(child)?;
        unwrap(visited).map_err(|e| replacement_error(original, e))
    }

    fn visit_children<C, T>(
        &self,
        children: Vec<C>,
        wrap: fn(C) -> Node,
        unwrap: fn(Node) -> GeneratorResult<T>,
    ) -> GeneratorResult<Vec<T>> {
        children
            .into_iter()
            .map(|child| self.visit_child(wrap(child), unwrap))
            .collect()
    }
}

/// A child came back as a kind its slot cannot hold
fn replacement_error(original: NodeKind, err: GeneratorError) -> GeneratorError {
    match err {
        GeneratorError::NodeKindMismatch { found, .. } => GeneratorError::InvalidReplacement {
            original,
            replacement: found,
        },
        other => other,
    }
}

//! Rewrite rules applied to the vault whitelist graph before rendering.
//!
//! Two independent rewrites:
//! * struct fields typed with a pod wrapper (`PodU16` .. `PodU128`) become plain integers
//! * every account gets an 8 byte `discriminator` field in front of its layout

use crate::constants::{DISCRIMINATOR_FIELD, DISCRIMINATOR_FORMAT, POD_ALIASES};
use crate::errors::GeneratorResult;
use crate::nodes::{
    assert_is_node, number_type_node, struct_field_type_node, AccountNode, Node, NodeKind,
    NumberFormat, StructFieldTypeNode, StructTypeNode,
};
use crate::visitors::TransformRule;

/// Replace the type of struct fields linked to `alias` with a number of `format`
#[derive(Debug, Clone)]
pub struct PodAliasRule {
    alias: &'static str,
    format: NumberFormat,
}

impl PodAliasRule {
    pub fn new(alias: &'static str, format: NumberFormat) -> Self {
        Self { alias, format }
    }
}

impl TransformRule for PodAliasRule {
    fn select(&self, node: &Node) -> bool {
        match node {
            Node::StructFieldType(field) => field.ty.name() == Some(self.alias),
            _ => false,
        }
    }

    fn transform(&self, node: Node) -> GeneratorResult<Node> {
        assert_is_node(&node, NodeKind::StructFieldType)?;
        let field = node.into_struct_field_type()?;
        Ok(Node::StructFieldType(StructFieldTypeNode {
            ty: number_type_node(self.format),
            ..field
        }))
    }
}

/// Prepend `discriminator: u64` to every account layout
#[derive(Debug, Clone, Default)]
pub struct AccountDiscriminatorRule;

impl TransformRule for AccountDiscriminatorRule {
    fn select(&self, node: &Node) -> bool {
        node.is_kind(NodeKind::Account)
    }

    fn transform(&self, node: Node) -> GeneratorResult<Node> {
        assert_is_node(&node, NodeKind::Account)?;
        let account = node.into_account()?;

        let mut fields = Vec::with_capacity(account.data.fields.len() + 1);
        fields.push(struct_field_type_node(
            DISCRIMINATOR_FIELD,
            number_type_node(DISCRIMINATOR_FORMAT),
        ));
        fields.extend(account.data.fields);

        Ok(Node::Account(AccountNode {
            data: StructTypeNode { fields },
            ..account
        }))
    }
}

/// One rule per known pod alias
pub fn pod_alias_rules() -> Vec<PodAliasRule> {
    POD_ALIASES
        .iter()
        .map(|&(alias, format)| PodAliasRule::new(alias, format))
        .collect()
}

/// The ordered rule list applied to every generated client
pub fn default_rules() -> Vec<Box<dyn TransformRule>> {
    let mut rules: Vec<Box<dyn TransformRule>> = pod_alias_rules()
        .into_iter()
        .map(|rule| Box::new(rule) as Box<dyn TransformRule>)
        .collect();
    rules.push(Box::new(AccountDiscriminatorRule));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GeneratorError;
    use crate::nodes::{
        defined_type_link_node, ArrayCount, InstructionArgumentNode, InstructionNode, ProgramNode,
        RootNode, TypeNode,
    };
    use crate::visitors::BottomUpTransformer;

    fn field(name: &str, ty: TypeNode) -> StructFieldTypeNode {
        StructFieldTypeNode {
            name: name.to_string(),
            docs: vec![format!("The {name}")],
            ty,
        }
    }

    fn root_with_accounts(accounts: Vec<AccountNode>) -> RootNode {
        RootNode::new(ProgramNode {
            name: "vaultWhitelist".to_string(),
            public_key: String::new(),
            version: "0.0.1".to_string(),
            origin: Some("shank".to_string()),
            accounts,
            instructions: Vec::new(),
            defined_types: Vec::new(),
            errors: Vec::new(),
        })
    }

    #[test]
    fn test_each_pod_alias_becomes_its_integer() {
        let cases = [
            ("podU16", NumberFormat::U16, 16),
            ("podU32", NumberFormat::U32, 32),
            ("podU64", NumberFormat::U64, 64),
            ("podU128", NumberFormat::U128, 128),
        ];
        let rules = pod_alias_rules();

        for (alias, format, bits) in cases {
            let original = field("amount", defined_type_link_node(alias));
            let node = Node::StructFieldType(original.clone());
            let rule = rules
                .iter()
                .find(|r| r.select(&node))
                .unwrap_or_else(|| panic!("no rule selects {alias}"));
            assert_eq!(rules.iter().filter(|r| r.select(&node)).count(), 1);

            let out = rule.transform(node).unwrap().into_struct_field_type().unwrap();
            assert_eq!(out.ty, number_type_node(format));
            assert_eq!(format.bit_width(), bits);
            assert_eq!(out.name, original.name);
            assert_eq!(out.docs, original.docs);
        }
    }

    #[test]
    fn test_other_fields_are_not_selected() {
        let rules = pod_alias_rules();
        let untouched = [
            field("a", defined_type_link_node("podI64")),
            field("b", defined_type_link_node("PodU64")),
            field("c", defined_type_link_node("podU64Extra")),
            field("d", number_type_node(NumberFormat::U64)),
            field("e", TypeNode::PublicKey),
        ];
        for f in untouched {
            let node = Node::StructFieldType(f);
            assert!(rules.iter().all(|r| !r.select(&node)), "{node:?}");
        }

        // A pod link outside a struct field is left alone as well.
        let bare = Node::Type(defined_type_link_node("podU64"));
        assert!(rules.iter().all(|r| !r.select(&bare)));
    }

    #[test]
    fn test_unmatched_field_unchanged_by_transformer() {
        let original = field("owner", defined_type_link_node("vaultOwner"));
        let root = root_with_accounts(vec![AccountNode {
            name: "config".to_string(),
            docs: Vec::new(),
            discriminator: Vec::new(),
            data: StructTypeNode::new(vec![original.clone()]),
        }]);

        let out = BottomUpTransformer::new(
            pod_alias_rules()
                .into_iter()
                .map(|r| Box::new(r) as Box<dyn TransformRule>)
                .collect(),
        )
        .visit(&root)
        .unwrap();
        assert_eq!(out.program.accounts[0].data.fields[0], original);
    }

    #[test]
    fn test_wrapped_pod_links_are_kept() {
        let wrapped = vec![
            field(
                "maybeTotal",
                TypeNode::Option {
                    item: Box::new(defined_type_link_node("podU64")),
                },
            ),
            field(
                "history",
                TypeNode::Array {
                    item: Box::new(defined_type_link_node("podU32")),
                    count: ArrayCount::Fixed(4),
                },
            ),
        ];
        let mut root = root_with_accounts(vec![AccountNode {
            name: "whitelist".to_string(),
            docs: Vec::new(),
            discriminator: Vec::new(),
            data: StructTypeNode::new(wrapped.clone()),
        }]);
        let amount = InstructionArgumentNode {
            name: "amount".to_string(),
            docs: Vec::new(),
            ty: defined_type_link_node("podU64"),
        };
        root.program.instructions.push(InstructionNode {
            name: "mint".to_string(),
            docs: Vec::new(),
            discriminator: vec![5],
            accounts: Vec::new(),
            arguments: vec![amount.clone()],
        });

        let out = BottomUpTransformer::new(default_rules()).visit(&root).unwrap();
        let fields = &out.program.accounts[0].data.fields;
        assert_eq!(fields.len(), 3);
        assert_eq!(&fields[1..], &wrapped[..]);
        assert_eq!(out.program.instructions[0].arguments[0], amount);
    }

    #[test]
    fn test_discriminator_prepended() {
        let fields = vec![
            field("vault", TypeNode::PublicKey),
            field("bump", number_type_node(NumberFormat::U8)),
        ];
        let account = AccountNode {
            name: "whitelist".to_string(),
            docs: vec!["Whitelist account".to_string()],
            discriminator: Vec::new(),
            data: StructTypeNode::new(fields.clone()),
        };

        let out = AccountDiscriminatorRule
            .transform(Node::Account(account.clone()))
            .unwrap()
            .into_account()
            .unwrap();

        assert_eq!(out.data.fields.len(), fields.len() + 1);
        assert_eq!(out.data.fields[0].name, "discriminator");
        assert_eq!(out.data.fields[0].ty, number_type_node(NumberFormat::U64));
        assert_eq!(&out.data.fields[1..], &fields[..]);
        assert_eq!(out.name, account.name);
        assert_eq!(out.docs, account.docs);
    }

    #[test]
    fn test_discriminator_on_empty_account() {
        let root = root_with_accounts(vec![AccountNode {
            name: "empty".to_string(),
            docs: Vec::new(),
            discriminator: Vec::new(),
            data: StructTypeNode::default(),
        }]);
        let out = BottomUpTransformer::new(default_rules()).visit(&root).unwrap();
        let fields = &out.program.accounts[0].data.fields;
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "discriminator");
    }

    #[test]
    fn test_default_rules_on_account() {
        let root = root_with_accounts(vec![AccountNode {
            name: "config".to_string(),
            docs: Vec::new(),
            discriminator: Vec::new(),
            data: StructTypeNode::new(vec![
                field("admin", TypeNode::PublicKey),
                field("total", defined_type_link_node("podU128")),
                field("count", defined_type_link_node("podU16")),
            ]),
        }]);

        let out = BottomUpTransformer::new(default_rules()).visit(&root).unwrap();
        let fields = &out.program.accounts[0].data.fields;
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["discriminator", "admin", "total", "count"]);
        assert_eq!(fields[2].ty, number_type_node(NumberFormat::U128));
        assert_eq!(fields[3].ty, number_type_node(NumberFormat::U16));

        // Input graph unchanged.
        assert_eq!(root.program.accounts[0].data.fields.len(), 3);
        assert_eq!(
            root.program.accounts[0].data.fields[1].ty,
            defined_type_link_node("podU128")
        );
    }

    #[test]
    fn test_mismatched_node_is_fatal() {
        let err = AccountDiscriminatorRule
            .transform(Node::Type(TypeNode::Boolean))
            .unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::NodeKindMismatch {
                expected: NodeKind::Account,
                ..
            }
        ));

        let err = PodAliasRule::new("podU64", NumberFormat::U64)
            .transform(Node::Type(TypeNode::Boolean))
            .unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::NodeKindMismatch {
                expected: NodeKind::StructFieldType,
                ..
            }
        ));
    }
}

//! Conversion of an Anchor or Shank IDL document into the node graph

use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use log::{debug, warn};

use crate::constants::anchor::{ACCOUNT_NAMESPACE, GLOBAL_NAMESPACE, SHANK_ORIGIN};
use crate::errors::{GeneratorError, GeneratorResult};
use crate::models::{
    validate_address, AnchorIdl, IdlAccountDef, IdlEnumFields, IdlEnumVariant, IdlErrorCode, IdlField,
    IdlInstruction, IdlInstructionAccount, IdlType, IdlTypeDef, IdlTypeDefTy,
};
use crate::nodes::{
    defined_type_link_node, AccountNode, ArrayCount, DefinedTypeNode, EnumTypeNode,
    EnumVariantTypeNode, ErrorNode, InstructionAccountNode, InstructionArgumentNode,
    InstructionNode, NumberFormat, ProgramNode, RootNode, StructFieldTypeNode, StructTypeNode,
    TypeNode,
};
use crate::utils::hash::generate_anchor_discriminator;

/// Build the node graph for an IDL document
pub fn root_node_from_anchor(idl: &AnchorIdl) -> GeneratorResult<RootNode> {
    Ok(RootNode::new(program_node_from_anchor(idl)?))
}

pub fn program_node_from_anchor(idl: &AnchorIdl) -> GeneratorResult<ProgramNode> {
    let name = idl.program_name()?;
    let public_key = idl.program_address()?.unwrap_or_default().to_string();
    if public_key.is_empty() {
        warn!("IDL for {} has no program address", name);
    }
    let is_shank = idl.origin() == Some(SHANK_ORIGIN);

    let mut account_type_names = HashSet::new();
    let accounts = idl
        .accounts
        .iter()
        .map(|account| {
            if account.ty.is_none() {
                account_type_names.insert(account.name.as_str());
            }
            account_node_from_anchor(account, &idl.types, is_shank)
        })
        .collect::<GeneratorResult<Vec<_>>>()?;

    // 0.30 documents keep account layouts in `types`; those are rendered as accounts only.
    let defined_types = idl
        .types
        .iter()
        .filter(|def| !account_type_names.contains(def.name.as_str()))
        .map(defined_type_node_from_anchor)
        .collect::<GeneratorResult<Vec<_>>>()?;

    let instructions = idl
        .instructions
        .iter()
        .map(|ix| instruction_node_from_anchor(ix, is_shank))
        .collect::<GeneratorResult<Vec<_>>>()?;

    let errors = idl.errors.iter().map(error_node_from_anchor).collect();

    debug!(
        "Built program node {} ({} accounts, {} instructions, {} types)",
        name,
        accounts.len(),
        instructions.len(),
        defined_types.len()
    );

    Ok(ProgramNode {
        name: name.to_lower_camel_case(),
        public_key,
        version: idl.program_version().to_string(),
        origin: idl.origin().map(str::to_string),
        accounts,
        instructions,
        defined_types,
        errors,
    })
}

fn account_node_from_anchor(
    account: &IdlAccountDef,
    types: &[IdlTypeDef],
    is_shank: bool,
) -> GeneratorResult<AccountNode> {
    let body = match &account.ty {
        Some(ty) => ty,
        None => {
            &types
                .iter()
                .find(|def| def.name == account.name)
                .ok_or_else(|| {
                    GeneratorError::InvalidIdl(format!(
                        "Account {} has no layout and no type of the same name",
                        account.name
                    ))
                })?
                .ty
        }
    };

    let fields = match body {
        IdlTypeDefTy::Struct { fields } => fields,
        IdlTypeDefTy::Enum { .. } => {
            return Err(GeneratorError::InvalidIdl(format!(
                "Account {} must be a struct",
                account.name
            )))
        }
    };

    // Shank accounts carry their own discriminator inside the layout.
    let discriminator = if !account.discriminator.is_empty() || is_shank {
        account.discriminator.clone()
    } else {
        generate_anchor_discriminator(ACCOUNT_NAMESPACE, &account.name.to_pascal_case()).to_vec()
    };

    Ok(AccountNode {
        name: account.name.to_lower_camel_case(),
        docs: account.docs.clone(),
        discriminator,
        data: struct_type_node_from_anchor(fields)?,
    })
}

fn instruction_node_from_anchor(ix: &IdlInstruction, is_shank: bool) -> GeneratorResult<InstructionNode> {
    let discriminator = if !ix.discriminator.is_empty() {
        ix.discriminator.clone()
    } else if let Some(discriminant) = &ix.discriminant {
        let value = u8::try_from(discriminant.value).map_err(|_| {
            GeneratorError::InvalidIdl(format!(
                "Instruction {} discriminant {} does not fit in a u8",
                ix.name, discriminant.value
            ))
        })?;
        vec![value]
    } else if is_shank {
        return Err(GeneratorError::InvalidIdl(format!(
            "Shank instruction {} has no discriminant",
            ix.name
        )));
    } else {
        generate_anchor_discriminator(GLOBAL_NAMESPACE, &ix.name.to_snake_case()).to_vec()
    };

    let arguments = ix
        .args
        .iter()
        .map(|arg| {
            Ok(InstructionArgumentNode {
                name: arg.name.to_lower_camel_case(),
                docs: arg.docs.clone(),
                ty: type_node_from_anchor(&arg.ty)?,
            })
        })
        .collect::<GeneratorResult<Vec<_>>>()?;

    Ok(InstructionNode {
        name: ix.name.to_lower_camel_case(),
        docs: ix.docs.clone(),
        discriminator,
        accounts: ix
            .accounts
            .iter()
            .map(instruction_account_node_from_anchor)
            .collect::<GeneratorResult<Vec<_>>>()?,
        arguments,
    })
}

fn instruction_account_node_from_anchor(
    account: &IdlInstructionAccount,
) -> GeneratorResult<InstructionAccountNode> {
    if let Some(address) = &account.address {
        validate_address(address)?;
    }
    Ok(InstructionAccountNode {
        name: account.name.to_lower_camel_case(),
        docs: account.docs.clone(),
        is_writable: account.is_mut,
        is_signer: account.is_signer,
        is_optional: account.is_optional,
        default_address: account.address.clone(),
    })
}

fn defined_type_node_from_anchor(def: &IdlTypeDef) -> GeneratorResult<DefinedTypeNode> {
    let ty = match &def.ty {
        IdlTypeDefTy::Struct { fields } => TypeNode::Struct(struct_type_node_from_anchor(fields)?),
        IdlTypeDefTy::Enum { variants } => TypeNode::Enum(EnumTypeNode {
            variants: variants
                .iter()
                .map(enum_variant_from_anchor)
                .collect::<GeneratorResult<Vec<_>>>()?,
        }),
    };

    Ok(DefinedTypeNode {
        name: def.name.to_lower_camel_case(),
        docs: def.docs.clone(),
        ty,
    })
}

fn enum_variant_from_anchor(variant: &IdlEnumVariant) -> GeneratorResult<EnumVariantTypeNode> {
    let name = variant.name.to_lower_camel_case();
    Ok(match &variant.fields {
        None => EnumVariantTypeNode::Empty { name },
        Some(IdlEnumFields::Named(fields)) => EnumVariantTypeNode::Struct {
            name,
            fields: struct_type_node_from_anchor(fields)?,
        },
        Some(IdlEnumFields::Tuple(items)) => EnumVariantTypeNode::Tuple {
            name,
            items: items
                .iter()
                .map(type_node_from_anchor)
                .collect::<GeneratorResult<Vec<_>>>()?,
        },
    })
}

fn struct_type_node_from_anchor(fields: &[IdlField]) -> GeneratorResult<StructTypeNode> {
    let fields = fields
        .iter()
        .map(|field| {
            Ok(StructFieldTypeNode {
                name: field.name.to_lower_camel_case(),
                docs: field.docs.clone(),
                ty: type_node_from_anchor(&field.ty)?,
            })
        })
        .collect::<GeneratorResult<Vec<_>>>()?;
    Ok(StructTypeNode::new(fields))
}

fn error_node_from_anchor(error: &IdlErrorCode) -> ErrorNode {
    ErrorNode {
        code: error.code,
        name: error.name.to_lower_camel_case(),
        message: error.msg.clone().unwrap_or_default(),
    }
}

/// Convert one IDL type reference
pub fn type_node_from_anchor(ty: &IdlType) -> GeneratorResult<TypeNode> {
    Ok(match ty {
        IdlType::Primitive(name) => primitive_type_node(name)?,
        IdlType::Vec { vec } => TypeNode::Array {
            item: Box::new(type_node_from_anchor(vec)?),
            count: ArrayCount::Prefixed(NumberFormat::U32),
        },
        IdlType::Option { option: item } | IdlType::COption { coption: item } => TypeNode::Option {
            item: Box::new(type_node_from_anchor(item)?),
        },
        IdlType::Array { array: (item, len) } => TypeNode::Array {
            item: Box::new(type_node_from_anchor(item)?),
            count: ArrayCount::Fixed(*len),
        },
        IdlType::Defined { defined } => defined_type_link_node(&defined.name().to_lower_camel_case()),
    })
}

fn primitive_type_node(name: &str) -> GeneratorResult<TypeNode> {
    if let Some(format) = NumberFormat::from_name(name) {
        return Ok(TypeNode::Number { format });
    }
    match name {
        "bool" => Ok(TypeNode::Boolean),
        "publicKey" | "pubkey" => Ok(TypeNode::PublicKey),
        "string" => Ok(TypeNode::String),
        "bytes" => Ok(TypeNode::Bytes),
        other => Err(GeneratorError::InvalidIdl(format!("Unknown primitive type: {}", other))),
    }
}

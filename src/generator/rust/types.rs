//! Defined type files: structs and enums shared by accounts and instructions

use heck::ToPascalCase;

use super::type_manifest::{render_docs, rust_type, ImportMap};
use super::{render_fields, HEADER};
use crate::errors::GeneratorResult;
use crate::nodes::{DefinedTypeNode, EnumTypeNode, EnumVariantTypeNode, TypeNode};

const DERIVES: &str = "#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]\n";

pub fn render_defined_type(def: &DefinedTypeNode) -> GeneratorResult<String> {
    let name = def.name.to_pascal_case();
    let mut imports = ImportMap::new();
    imports.add("borsh::BorshDeserialize");
    imports.add("borsh::BorshSerialize");

    let body = match &def.ty {
        TypeNode::Struct(s) => {
            let fields = render_fields(&s.fields, &mut imports, "    ", "pub ")?;
            format!("{}pub struct {} {{\n{}}}\n", DERIVES, name, fields)
        }
        TypeNode::Enum(e) => render_enum(&name, e, &mut imports)?,
        other => {
            let aliased = rust_type(other, &mut imports)?;
            format!("pub type {} = {};\n", name, aliased)
        }
    };

    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&imports.render());
    out.push('\n');
    out.push_str(&render_docs(&def.docs, ""));
    out.push_str(&body);
    Ok(out)
}

fn render_enum(name: &str, e: &EnumTypeNode, imports: &mut ImportMap) -> GeneratorResult<String> {
    let mut variants = String::new();
    for variant in &e.variants {
        let variant_name = variant.name().to_pascal_case();
        match variant {
            EnumVariantTypeNode::Empty { .. } => {
                variants.push_str(&format!("    {},\n", variant_name));
            }
            EnumVariantTypeNode::Tuple { items, .. } => {
                let items = items
                    .iter()
                    .map(|item| rust_type(item, imports))
                    .collect::<GeneratorResult<Vec<_>>>()?;
                variants.push_str(&format!("    {}({}),\n", variant_name, items.join(", ")));
            }
            EnumVariantTypeNode::Struct { fields, .. } => {
                let fields = render_fields(&fields.fields, imports, "        ", "")?;
                variants.push_str(&format!("    {} {{\n{}    }},\n", variant_name, fields));
            }
        }
    }

    let derives = if e.is_scalar() {
        "#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd)]\n"
    } else {
        DERIVES
    };
    Ok(format!("{}pub enum {} {{\n{}}}\n", derives, name, variants))
}

//! Account files: one borsh struct per account layout

use heck::ToPascalCase;

use super::type_manifest::{render_docs, ImportMap};
use super::{render_fields, HEADER};
use crate::errors::GeneratorResult;
use crate::nodes::{AccountNode, ProgramNode};

pub fn render_account(account: &AccountNode, program: &ProgramNode) -> GeneratorResult<String> {
    let name = account.name.to_pascal_case();
    let mut imports = ImportMap::new();
    imports.add("borsh::BorshDeserialize");
    imports.add("borsh::BorshSerialize");

    let fields = render_fields(&account.data.fields, &mut imports, "    ", "pub ")?;

    let mut consts = String::new();
    if let Some(len) = account
        .data
        .fixed_size(&|link: &str| program.resolve_type(link))
    {
        consts.push_str(&format!("    pub const LEN: usize = {};\n\n", len));
    }
    if !account.discriminator.is_empty() {
        consts.push_str(&format!(
            "    pub const DISCRIMINATOR: [u8; {}] = {:?};\n\n",
            account.discriminator.len(),
            account.discriminator
        ));
    }

    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&imports.render());
    out.push('\n');
    out.push_str(&render_docs(&account.docs, ""));
    out.push_str("#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]\n");
    out.push_str(&format!("pub struct {} {{\n{}}}\n\n", name, fields));
    out.push_str(&format!(
        "impl {name} {{\n\
         {consts}\
         \x20   #[inline(always)]\n\
         \x20   pub fn from_bytes(data: &[u8]) -> Result<Self, std::io::Error> {{\n\
         \x20       let mut data = data;\n\
         \x20       Self::deserialize(&mut data)\n\
         \x20   }}\n\
         }}\n\n"
    ));
    out.push_str(&format!(
        "impl<'a> TryFrom<&solana_program::account_info::AccountInfo<'a>> for {name} {{\n\
         \x20   type Error = std::io::Error;\n\
         \n\
         \x20   fn try_from(\n\
         \x20       account_info: &solana_program::account_info::AccountInfo<'a>,\n\
         \x20   ) -> Result<Self, Self::Error> {{\n\
         \x20       let mut data: &[u8] = &(*account_info.data).borrow();\n\
         \x20       Self::deserialize(&mut data)\n\
         \x20   }}\n\
         }}\n"
    ));
    Ok(out)
}

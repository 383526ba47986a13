//! Instruction files: accounts struct, data struct, optional args struct and builder

use heck::{ToPascalCase, ToShoutySnakeCase};

use super::type_manifest::{field_ident, render_docs, rust_type, ImportMap};
use super::HEADER;
use crate::errors::GeneratorResult;
use crate::nodes::{InstructionAccountNode, InstructionNode, ProgramNode, TypeNode};

const PUBKEY: &str = "solana_program::pubkey::Pubkey";

pub fn render_instruction(ix: &InstructionNode, program: &ProgramNode) -> GeneratorResult<String> {
    let name = ix.name.to_pascal_case();
    let program_id = format!(
        "crate::generated::programs::{}_ID",
        program.name.to_shouty_snake_case()
    );
    let mut imports = ImportMap::new();
    imports.add("borsh::BorshDeserialize");
    imports.add("borsh::BorshSerialize");

    let has_args = !ix.arguments.is_empty();
    let mut args_struct = String::new();
    if has_args {
        args_struct.push_str(
            "#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]\n",
        );
        args_struct.push_str(&format!("pub struct {}InstructionArgs {{\n", name));
        for arg in &ix.arguments {
            args_struct.push_str(&render_docs(&arg.docs, "    "));
            args_struct.push_str(&format!(
                "    pub {}: {},\n",
                field_ident(&arg.name),
                rust_type(&arg.ty, &mut imports)?
            ));
        }
        args_struct.push_str("}\n");
    }

    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&imports.render());
    out.push('\n');

    // Accounts.
    out.push_str(&render_docs(&ix.docs, ""));
    out.push_str("/// Accounts.\n");
    out.push_str(&format!("pub struct {} {{\n", name));
    for account in &ix.accounts {
        out.push_str(&render_docs(&account.docs, "    "));
        if account.is_optional {
            out.push_str(&format!("    pub {}: Option<{}>,\n", field_ident(&account.name), PUBKEY));
        } else {
            out.push_str(&format!("    pub {}: {},\n", field_ident(&account.name), PUBKEY));
        }
    }
    out.push_str("}\n\n");

    // Instruction builder on the accounts struct.
    let (args_param, args_append) = if has_args {
        (
            format!(", args: {}InstructionArgs", name),
            "        let mut args = borsh::to_vec(&args).unwrap();\n        data.append(&mut args);\n",
        )
    } else {
        (String::new(), "")
    };
    out.push_str(&format!("impl {} {{\n", name));
    out.push_str(&format!(
        "    pub fn instruction(&self{}) -> solana_program::instruction::Instruction {{\n",
        args_param
    ));
    out.push_str(&format!(
        "        let mut accounts = Vec::with_capacity({});\n",
        ix.accounts.len()
    ));
    for account in &ix.accounts {
        out.push_str(&render_account_meta(account, &program_id));
    }
    out.push_str(&format!(
        "        let mut data = borsh::to_vec(&{}InstructionData::new()).unwrap();\n",
        name
    ));
    out.push_str(args_append);
    out.push('\n');
    out.push_str("        solana_program::instruction::Instruction {\n");
    out.push_str(&format!("            program_id: {},\n", program_id));
    out.push_str("            accounts,\n");
    out.push_str("            data,\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    // Data.
    let len = ix.discriminator.len();
    out.push_str("#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]\n");
    out.push_str(&format!("pub struct {}InstructionData {{\n", name));
    out.push_str(&format!("    discriminator: [u8; {}],\n", len));
    out.push_str("}\n\n");
    out.push_str(&format!("impl {}InstructionData {{\n", name));
    out.push_str("    pub fn new() -> Self {\n");
    out.push_str(&format!(
        "        Self {{\n            discriminator: {:?},\n        }}\n",
        ix.discriminator
    ));
    out.push_str("    }\n");
    out.push_str("}\n\n");
    out.push_str(&format!("impl Default for {}InstructionData {{\n", name));
    out.push_str("    fn default() -> Self {\n        Self::new()\n    }\n}\n");

    if has_args {
        out.push('\n');
        out.push_str(&args_struct);
    }

    out.push('\n');
    out.push_str(&render_builder(ix, &name, &mut imports)?);

    Ok(out)
}

/// `[writable, signer, optional]` style flags for builder docs
fn account_flags(account: &InstructionAccountNode) -> String {
    let mut flags = Vec::new();
    if account.is_writable {
        flags.push("writable");
    }
    if account.is_signer {
        flags.push("signer");
    }
    if account.is_optional {
        flags.push("optional");
    }
    format!("[{}]", flags.join(", "))
}

/// `<Ix>Builder`: one setter per account and argument, then `instruction()`
fn render_builder(
    ix: &InstructionNode,
    name: &str,
    imports: &mut ImportMap,
) -> GeneratorResult<String> {
    let mut docs = format!("/// Instruction builder for `{}`.\n///\n/// ### Accounts:\n///\n", name);
    let mut fields = String::new();
    let mut setters = String::new();
    let mut account_inits = String::new();

    for (i, account) in ix.accounts.iter().enumerate() {
        let ident = field_ident(&account.name);
        let label = ident.trim_start_matches("r#");
        match &account.default_address {
            Some(address) => docs.push_str(&format!(
                "///   {}. `{}` {} (default to `{}`)\n",
                i,
                account_flags(account),
                label,
                address
            )),
            None => docs.push_str(&format!("///   {}. `{}` {}\n", i, account_flags(account), label)),
        }
        fields.push_str(&format!("    {}: Option<{}>,\n", ident, PUBKEY));

        if account.is_optional {
            setters.push_str("    /// `[optional account]`\n");
            setters.push_str(&render_docs(&account.docs, "    "));
            setters.push_str(&format!(
                "    #[inline(always)]\n\
                 \x20   pub fn {ident}(&mut self, {ident}: Option<{PUBKEY}>) -> &mut Self {{\n\
                 \x20       self.{ident} = {ident};\n\
                 \x20       self\n\
                 \x20   }}\n"
            ));
            account_inits.push_str(&format!("            {ident}: self.{ident},\n"));
            continue;
        }

        if let Some(address) = &account.default_address {
            setters.push_str(&format!("    /// `[optional account, default to '{}']`\n", address));
            account_inits.push_str(&format!(
                "            {ident}: self.{ident}.unwrap_or(solana_program::pubkey!(\"{address}\")),\n"
            ));
        } else {
            account_inits.push_str(&format!(
                "            {ident}: self.{ident}.expect(\"{label} is not set\"),\n"
            ));
        }
        setters.push_str(&render_docs(&account.docs, "    "));
        setters.push_str(&format!(
            "    #[inline(always)]\n\
             \x20   pub fn {ident}(&mut self, {ident}: {PUBKEY}) -> &mut Self {{\n\
             \x20       self.{ident} = Some({ident});\n\
             \x20       self\n\
             \x20   }}\n"
        ));
    }

    let mut arg_inits = String::new();
    for arg in &ix.arguments {
        let ident = field_ident(&arg.name);
        let label = ident.trim_start_matches("r#");
        // Option arguments are set with their inner value and may be left unset.
        let (value_ty, optional) = match &arg.ty {
            TypeNode::Option { item } => (rust_type(item, imports)?, true),
            ty => (rust_type(ty, imports)?, false),
        };
        fields.push_str(&format!("    {}: Option<{}>,\n", ident, value_ty));

        if optional {
            setters.push_str("    /// `[optional argument]`\n");
            arg_inits.push_str(&format!("            {ident}: self.{ident}.clone(),\n"));
        } else {
            arg_inits.push_str(&format!(
                "            {ident}: self.{ident}.clone().expect(\"{label} is not set\"),\n"
            ));
        }
        setters.push_str(&render_docs(&arg.docs, "    "));
        setters.push_str(&format!(
            "    #[inline(always)]\n\
             \x20   pub fn {ident}(&mut self, {ident}: {value_ty}) -> &mut Self {{\n\
             \x20       self.{ident} = Some({ident});\n\
             \x20       self\n\
             \x20   }}\n"
        ));
    }

    let mut out = docs;
    out.push_str("#[derive(Clone, Debug, Default)]\n");
    out.push_str(&format!("pub struct {}Builder {{\n{}}}\n\n", name, fields));
    out.push_str(&format!("impl {}Builder {{\n", name));
    out.push_str("    pub fn new() -> Self {\n        Self::default()\n    }\n");
    out.push_str(&setters);
    out.push_str("    #[allow(clippy::clone_on_copy)]\n");
    out.push_str("    pub fn instruction(&self) -> solana_program::instruction::Instruction {\n");
    out.push_str(&format!("        let accounts = {} {{\n{}        }};\n", name, account_inits));
    if ix.arguments.is_empty() {
        out.push_str("\n        accounts.instruction()\n");
    } else {
        out.push_str(&format!(
            "        let args = {}InstructionArgs {{\n{}        }};\n\n        accounts.instruction(args)\n",
            name, arg_inits
        ));
    }
    out.push_str("    }\n}\n");
    Ok(out)
}

fn render_account_meta(account: &InstructionAccountNode, program_id: &str) -> String {
    let ident = field_ident(&account.name);
    let ctor = if account.is_writable {
        "new"
    } else {
        "new_readonly"
    };
    let signer = account.is_signer;

    if account.is_optional {
        // Missing optional accounts are passed as the program id, read-only.
        format!(
            "        if let Some(key) = self.{ident} {{\n\
             \x20           accounts.push(solana_program::instruction::AccountMeta::{ctor}(\n\
             \x20               key, {signer},\n\
             \x20           ));\n\
             \x20       }} else {{\n\
             \x20           accounts.push(solana_program::instruction::AccountMeta::new_readonly(\n\
             \x20               {program_id}, false,\n\
             \x20           ));\n\
             \x20       }}\n"
        )
    } else {
        format!(
            "        accounts.push(solana_program::instruction::AccountMeta::{ctor}(\n\
             \x20           self.{ident}, {signer},\n\
             \x20       ));\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{number_type_node, InstructionArgumentNode, NumberFormat};

    fn program() -> ProgramNode {
        ProgramNode {
            name: "vaultWhitelist".to_string(),
            public_key: "Ve11Kbfp6XjQcwTgnppWV9t1UzmsUWWnkpD7kk2rm8E".to_string(),
            version: "0.0.1".to_string(),
            origin: Some("shank".to_string()),
            accounts: Vec::new(),
            instructions: Vec::new(),
            defined_types: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn account(name: &str, is_writable: bool, is_signer: bool, is_optional: bool) -> InstructionAccountNode {
        InstructionAccountNode {
            name: name.to_string(),
            docs: Vec::new(),
            is_writable,
            is_signer,
            is_optional,
            default_address: None,
        }
    }

    #[test]
    fn test_instruction_without_args() {
        let ix = InstructionNode {
            name: "initializeConfig".to_string(),
            docs: Vec::new(),
            discriminator: vec![0],
            accounts: vec![
                account("config", true, false, false),
                account("admin", true, true, false),
                account("systemProgram", false, false, false),
            ],
            arguments: Vec::new(),
        };

        let out = render_instruction(&ix, &program()).unwrap();
        assert!(out.contains("pub struct InitializeConfig {\n    pub config: solana_program::pubkey::Pubkey,"));
        assert!(out.contains("pub fn instruction(&self) -> solana_program::instruction::Instruction"));
        assert!(out.contains("AccountMeta::new(\n            self.admin, true,"));
        assert!(out.contains("AccountMeta::new_readonly(\n            self.system_program, false,"));
        assert!(out.contains("discriminator: [u8; 1],"));
        assert!(out.contains("discriminator: [0],"));
        assert!(out.contains("program_id: crate::generated::programs::VAULT_WHITELIST_ID,"));
        assert!(!out.contains("InstructionArgs"));
    }

    #[test]
    fn test_instruction_with_args_and_optional_account() {
        let ix = InstructionNode {
            name: "mint".to_string(),
            docs: vec!["Mint shares".to_string()],
            discriminator: vec![7],
            accounts: vec![account("burnSigner", false, true, true)],
            arguments: vec![InstructionArgumentNode {
                name: "amountIn".to_string(),
                docs: Vec::new(),
                ty: number_type_node(NumberFormat::U64),
            }],
        };

        let out = render_instruction(&ix, &program()).unwrap();
        assert!(out.contains("/// Mint shares\n/// Accounts.\npub struct Mint {"));
        assert!(out.contains("pub burn_signer: Option<solana_program::pubkey::Pubkey>,"));
        assert!(out.contains("if let Some(key) = self.burn_signer {"));
        assert!(out.contains("pub fn instruction(&self, args: MintInstructionArgs)"));
        assert!(out.contains("pub struct MintInstructionArgs {\n    pub amount_in: u64,\n}"));
    }

    #[test]
    fn test_builder_setters_and_defaults() {
        let mut system_program = account("systemProgram", false, false, false);
        system_program.default_address = Some("11111111111111111111111111111111".to_string());
        let ix = InstructionNode {
            name: "mint".to_string(),
            docs: Vec::new(),
            discriminator: vec![5],
            accounts: vec![
                account("depositor", true, true, false),
                account("mintSigner", false, true, true),
                system_program,
            ],
            arguments: vec![
                InstructionArgumentNode {
                    name: "amountIn".to_string(),
                    docs: Vec::new(),
                    ty: number_type_node(NumberFormat::U64),
                },
                InstructionArgumentNode {
                    name: "proof".to_string(),
                    docs: Vec::new(),
                    ty: TypeNode::Option {
                        item: Box::new(TypeNode::Bytes),
                    },
                },
            ],
        };

        let out = render_instruction(&ix, &program()).unwrap();
        assert!(out.contains("#[derive(Clone, Debug, Default)]\npub struct MintBuilder {\n    depositor: Option<solana_program::pubkey::Pubkey>,"));
        assert!(out.contains("///   0. `[writable, signer]` depositor\n"));
        assert!(out.contains("///   1. `[signer, optional]` mint_signer\n"));
        assert!(out.contains("///   2. `[]` system_program (default to `11111111111111111111111111111111`)\n"));
        assert!(out.contains("pub fn depositor(&mut self, depositor: solana_program::pubkey::Pubkey) -> &mut Self {"));
        assert!(out.contains("pub fn mint_signer(&mut self, mint_signer: Option<solana_program::pubkey::Pubkey>) -> &mut Self {"));
        assert!(out.contains("depositor: self.depositor.expect(\"depositor is not set\"),"));
        assert!(out.contains("mint_signer: self.mint_signer,"));
        assert!(out.contains(
            "system_program: self.system_program.unwrap_or(solana_program::pubkey!(\"11111111111111111111111111111111\")),"
        ));
        assert!(out.contains("pub fn amount_in(&mut self, amount_in: u64) -> &mut Self {"));
        assert!(out.contains("amount_in: self.amount_in.clone().expect(\"amount_in is not set\"),"));
        assert!(out.contains("pub fn proof(&mut self, proof: Vec<u8>) -> &mut Self {"));
        assert!(out.contains("proof: self.proof.clone(),"));
        assert!(out.contains("accounts.instruction(args)\n"));
    }

    #[test]
    fn test_optional_account_does_not_shadow_locals() {
        let ix = InstructionNode {
            name: "sync".to_string(),
            docs: Vec::new(),
            discriminator: vec![9],
            accounts: vec![account("accounts", false, false, true), account("data", true, false, true)],
            arguments: Vec::new(),
        };

        let out = render_instruction(&ix, &program()).unwrap();
        assert!(!out.contains("if let Some(accounts)"));
        assert!(!out.contains("if let Some(data)"));
        assert!(out.contains("if let Some(key) = self.accounts {"));
        assert!(out.contains("if let Some(key) = self.data {"));
        assert!(out.contains("\n        accounts.instruction()\n"));
    }
}

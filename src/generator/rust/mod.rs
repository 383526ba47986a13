//! Rust client renderer
//!
//! Produces the `src/generated` tree of a client crate:
//!
//! ```text
//! generated/
//!   mod.rs
//!   programs.rs
//!   accounts/{mod.rs, <account>.rs}
//!   instructions/{mod.rs, <instruction>.rs}
//!   types/{mod.rs, <type>.rs}
//!   errors/{mod.rs, <program>.rs}
//! ```
//!
//! Generated code depends on `borsh`, `solana-program` and `thiserror`.

mod accounts;
mod errors;
mod instructions;
mod programs;
mod type_manifest;
mod types;

use std::path::{Path, PathBuf};

use heck::ToSnakeCase;
use log::info;

use super::{format_generated, reset_directory, RenderMap, RenderOptions};
use crate::errors::{GeneratorError, GeneratorResult};
use crate::nodes::{RootNode, StructFieldTypeNode};
use self::type_manifest::{field_ident, render_docs, rust_type, ImportMap};

/// First lines of every generated file
pub(crate) const HEADER: &str = "//! This code was AUTOGENERATED using the vault-whitelist-codegen library.\n\
//! Please DO NOT EDIT THIS FILE, instead change the IDL or the transform rules,\n\
//! then rerun the generator to update it.\n";

/// `name: Type,` lines for struct fields, with their docs
pub(crate) fn render_fields(
    fields: &[StructFieldTypeNode],
    imports: &mut ImportMap,
    indent: &str,
    visibility: &str,
) -> GeneratorResult<String> {
    let mut out = String::new();
    for field in fields {
        out.push_str(&render_docs(&field.docs, indent));
        out.push_str(&format!(
            "{}{}{}: {},\n",
            indent,
            visibility,
            field_ident(&field.name),
            rust_type(&field.ty, imports)?
        ));
    }
    Ok(out)
}

/// `pub(crate) mod r#x; pub use self::r#x::*;` for each module
fn render_mod(modules: &[String]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for module in modules {
        out.push_str(&format!("pub(crate) mod r#{};\n", module));
    }
    out.push('\n');
    for module in modules {
        out.push_str(&format!("pub use self::r#{}::*;\n", module));
    }
    out
}

pub struct RustRenderer {
    output_dir: PathBuf,
    options: RenderOptions,
}

impl RustRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, options: RenderOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Every generated file, keyed by its path relative to the output directory
    pub fn render_map(&self, root: &RootNode) -> GeneratorResult<RenderMap> {
        let program = &root.program;
        let mut map = RenderMap::new();
        let mut top_modules = Vec::new();

        if !program.accounts.is_empty() {
            let mut modules = Vec::new();
            for account in &program.accounts {
                let module = account.name.to_snake_case();
                map.add(
                    format!("accounts/{}.rs", module),
                    accounts::render_account(account, program)?,
                );
                modules.push(module);
            }
            map.add("accounts/mod.rs", render_mod(&modules));
            top_modules.push("accounts");
        }

        if !program.errors.is_empty() {
            let module = program.name.to_snake_case();
            map.add(format!("errors/{}.rs", module), errors::render_errors(program));
            map.add("errors/mod.rs", render_mod(&[module]));
            top_modules.push("errors");
        }

        if !program.instructions.is_empty() {
            if program.public_key.is_empty() {
                return Err(GeneratorError::Render(format!(
                    "Program {} has instructions but no address",
                    program.name
                )));
            }
            let mut modules = Vec::new();
            for ix in &program.instructions {
                let module = ix.name.to_snake_case();
                map.add(
                    format!("instructions/{}.rs", module),
                    instructions::render_instruction(ix, program)?,
                );
                modules.push(module);
            }
            map.add("instructions/mod.rs", render_mod(&modules));
            top_modules.push("instructions");
        }

        if root.all_programs().any(|p| !p.public_key.is_empty()) {
            map.add("programs.rs", programs::render_programs(root));
            top_modules.push("programs");
        }

        if !program.defined_types.is_empty() {
            let mut modules = Vec::new();
            for def in &program.defined_types {
                let module = def.name.to_snake_case();
                map.add(format!("types/{}.rs", module), types::render_defined_type(def)?);
                modules.push(module);
            }
            map.add("types/mod.rs", render_mod(&modules));
            top_modules.push("types");
        }

        let mut root_mod = String::from(HEADER);
        root_mod.push('\n');
        for module in &top_modules {
            root_mod.push_str(&format!("pub mod {};\n", module));
        }
        if top_modules.contains(&"programs") {
            root_mod.push_str("\npub(crate) use programs::*;\n");
        }
        map.add("mod.rs", root_mod);

        Ok(map)
    }

    /// Render into the output directory.
    ///
    /// The whole tree is built in memory first, so a rendering error leaves
    /// the directory as it was. With `delete_folder_before_rendering` the
    /// directory is then wiped, which discards any hand edits in it.
    pub fn render(&self, root: &RootNode) -> GeneratorResult<Vec<PathBuf>> {
        let map = self.render_map(root)?;
        info!(
            "Rendering {} files into {}",
            map.len(),
            self.output_dir.display()
        );

        if self.options.delete_folder_before_rendering {
            reset_directory(&self.output_dir)?;
        }
        let written = map.write(&self.output_dir)?;

        if self.options.format_code {
            format_generated(&self.options, &written);
        }
        Ok(written)
    }
}

//! Program error enum

use heck::ToPascalCase;

use super::HEADER;
use crate::nodes::ProgramNode;

pub fn render_errors(program: &ProgramNode) -> String {
    let name = format!("{}Error", program.name.to_pascal_case());

    let mut variants = String::new();
    for error in &program.errors {
        let message = if error.message.is_empty() {
            error.name.clone()
        } else {
            error.message.clone()
        };
        // thiserror treats braces as format arguments.
        let escaped = message.replace('{', "{{").replace('}', "}}");
        variants.push_str(&format!("    /// {} - {}\n", error.code, message));
        variants.push_str(&format!("    #[error({:?})]\n", escaped));
        variants.push_str(&format!(
            "    {} = {:#X},\n",
            error.name.to_pascal_case(),
            error.code
        ));
    }

    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str("use thiserror::Error;\n\n");
    out.push_str("#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]\n");
    out.push_str(&format!("pub enum {} {{\n{}}}\n\n", name, variants));
    out.push_str(&format!(
        "impl From<{name}> for solana_program::program_error::ProgramError {{\n\
         \x20   fn from(e: {name}) -> Self {{\n\
         \x20       solana_program::program_error::ProgramError::Custom(e as u32)\n\
         \x20   }}\n\
         }}\n"
    ));
    out
}

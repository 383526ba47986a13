//! Program id constant

use heck::{ToShoutySnakeCase, ToSnakeCase};

use super::HEADER;
use crate::nodes::RootNode;

pub fn render_programs(root: &RootNode) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str("use solana_program::{pubkey, pubkey::Pubkey};\n");
    for program in root.all_programs().filter(|p| !p.public_key.is_empty()) {
        out.push('\n');
        out.push_str(&format!("/// `{}` program ID.\n", program.name.to_snake_case()));
        out.push_str(&format!(
            "pub const {}_ID: Pubkey = pubkey!(\"{}\");\n",
            program.name.to_shouty_snake_case(),
            program.public_key
        ));
    }
    out
}

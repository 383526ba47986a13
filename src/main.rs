use anyhow::{Context, Result};
use env_logger::Builder;
use log::{info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;
use vault_whitelist_codegen::config::GeneratorConfig;
use vault_whitelist_codegen::generate_all;

fn print_usage(program: &str) {
    println!("Vault Whitelist Client Generator v{}", vault_whitelist_codegen::VERSION);
    println!("\nUsage:");
    println!("  {} [PROJECT_ROOT] [--no-format]", program);
    println!("  {} --version", program);
    println!("\nOptions:");
    println!("  PROJECT_ROOT         Directory holding idl/ and clients/ (default: current directory)");
    println!("  --no-format          Skip running cargo fmt on the generated code");
    println!("  --version, -v        Show version information");
    println!("  --help, -h           Show this message");
}

// Simple CLI without clap
fn main() -> Result<()> {
    // Initialize logger
    Builder::new()
        .format(|buf, record| {
            let secs = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            writeln!(buf, "{} [{}] - {}", secs, record.level(), record.args())
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args
        .first()
        .map(String::as_str)
        .unwrap_or("generate-clients");

    let mut project_root = None;
    let mut format_code = true;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("Vault Whitelist Client Generator v{}", vault_whitelist_codegen::VERSION);
                return Ok(());
            }
            "--help" | "-h" => {
                print_usage(program);
                return Ok(());
            }
            "--no-format" => format_code = false,
            other if other.starts_with('-') => {
                print_usage(program);
                anyhow::bail!("Unknown argument: {}", other);
            }
            other => {
                if project_root.is_some() {
                    anyhow::bail!("Unexpected extra argument: {}", other);
                }
                project_root = Some(PathBuf::from(other));
            }
        }
    }

    let project_root = match project_root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let mut config = GeneratorConfig::for_project_root(project_root);
    config.format_code = format_code;

    info!("Generating clients under {}", config.project_root().display());
    for report in generate_all(&config)? {
        println!(
            "Generated {} client: {} files in {}",
            report.program,
            report.files.len(),
            report.output_dir.display()
        );
    }

    Ok(())
}

//! Where IDLs are read from and where clients are generated

use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_TOOLCHAIN, GENERATED_SUBDIR, IDL_DIR, RUST_CLIENTS_DIR, VAULT_WHITELIST_CLIENT,
    VAULT_WHITELIST_IDL,
};
use crate::generator::RenderOptions;

/// One IDL and the client crate generated from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientTarget {
    /// File name inside the IDL directory
    pub idl_file: String,
    /// Directory name of the client crate inside the clients directory
    pub crate_name: String,
}

impl ClientTarget {
    pub fn new(idl_file: &str, crate_name: &str) -> Self {
        Self {
            idl_file: idl_file.to_string(),
            crate_name: crate_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub project_root: PathBuf,
    pub targets: Vec<ClientTarget>,
    pub format_code: bool,
    pub toolchain: Option<String>,
}

impl GeneratorConfig {
    /// Default layout: `idl/vault_whitelist.json` generates
    /// `clients/rust/vault-whitelist-client/src/generated`
    pub fn for_project_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            targets: vec![ClientTarget::new(VAULT_WHITELIST_IDL, VAULT_WHITELIST_CLIENT)],
            format_code: true,
            toolchain: Some(DEFAULT_TOOLCHAIN.to_string()),
        }
    }

    pub fn idl_dir(&self) -> PathBuf {
        self.project_root.join(IDL_DIR)
    }

    pub fn idl_path(&self, target: &ClientTarget) -> PathBuf {
        self.idl_dir().join(&target.idl_file)
    }

    pub fn crate_folder(&self, target: &ClientTarget) -> PathBuf {
        self.project_root.join(RUST_CLIENTS_DIR).join(&target.crate_name)
    }

    pub fn output_dir(&self, target: &ClientTarget) -> PathBuf {
        self.crate_folder(target).join(GENERATED_SUBDIR)
    }

    pub fn render_options(&self, target: &ClientTarget) -> RenderOptions {
        RenderOptions {
            format_code: self.format_code,
            crate_folder: Some(self.crate_folder(target)),
            delete_folder_before_rendering: true,
            toolchain: self.toolchain.clone(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = GeneratorConfig::for_project_root("/work/vault-whitelist");
        let target = &config.targets[0];

        assert_eq!(
            config.idl_path(target),
            PathBuf::from("/work/vault-whitelist/idl/vault_whitelist.json")
        );
        assert_eq!(
            config.output_dir(target),
            PathBuf::from("/work/vault-whitelist/clients/rust/vault-whitelist-client/src/generated")
        );

        let options = config.render_options(target);
        assert!(options.format_code);
        assert!(options.delete_folder_before_rendering);
        assert_eq!(options.toolchain.as_deref(), Some("+nightly-2024-07-25"));
        assert_eq!(
            options.crate_folder,
            Some(PathBuf::from("/work/vault-whitelist/clients/rust/vault-whitelist-client"))
        );
    }
}

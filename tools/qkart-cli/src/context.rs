//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use qkart_auth::{FileStore, KeyValueStore, Session};
use qkart_data::{HttpStorefront, StorefrontApi};
use qkart_storefront::{AuthPage, Notifier};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["qkart.toml", ".qkart.toml", "qkart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    api: Arc<dyn StorefrontApi>,
    store: Arc<FileStore>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let currency = config.currency().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default display currency");
            Default::default()
        });
        let output = output.with_currency(currency);
        let endpoint = config.endpoint();
        tracing::debug!(%endpoint, config = ?config_path, "context loaded");

        let api = HttpStorefront::new(endpoint.clone())
            .with_context(|| format!("Failed to create API client for {}", endpoint))?;
        let store = FileStore::open(session_path(&config, &cwd));

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            api: Arc::new(api),
            store: Arc::new(store),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    pub fn api(&self) -> Arc<dyn StorefrontApi> {
        self.api.clone()
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn session_file(&self) -> &Path {
        self.store.path()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(self.output.notifier())
    }

    pub fn auth_page(&self) -> AuthPage {
        AuthPage::new(self.api(), self.notifier(), self.store())
    }

    /// The persisted session, if logged in.
    pub fn session(&self) -> Result<Option<Session>> {
        Session::load(self.store.as_ref()).context("Failed to read the session file")
    }

    /// The persisted session, or an error telling the user to log in.
    pub fn require_session(&self) -> Result<Session> {
        match self.session()? {
            Some(session) => Ok(session),
            None => bail!("Not logged in. Run `qkart login` first."),
        }
    }
}

fn session_path(config: &CliConfig, cwd: &Path) -> PathBuf {
    match &config.session.path {
        Some(path) => expand_home(path, cwd),
        None => data_dir().join("qkart").join("session.json"),
    }
}

/// Resolve `~/` and relative paths.
fn expand_home(path: &str, cwd: &Path) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_DATA_HOME") {
        PathBuf::from(dir)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_session_path_resolves_against_cwd() {
        let cwd = Path::new("/work/shop");
        assert_eq!(
            expand_home("state/session.json", cwd),
            PathBuf::from("/work/shop/state/session.json")
        );
        assert_eq!(
            expand_home("/var/qkart/session.json", cwd),
            PathBuf::from("/var/qkart/session.json")
        );
    }

    #[test]
    fn test_configured_session_path_wins() {
        let mut config = CliConfig::default();
        config.session.path = Some("/tmp/qkart-session.json".to_string());
        assert_eq!(
            session_path(&config, Path::new("/")),
            PathBuf::from("/tmp/qkart-session.json")
        );
    }

    #[test]
    fn test_find_config_walks_upward() {
        let root = std::env::temp_dir().join(format!("qkart-cli-ctx-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.join(".qkart.toml"),
            "[api]\nendpoint = \"http://localhost:8082/api/v1\"\n",
        )
        .unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.api.endpoint, "http://localhost:8082/api/v1");
        assert_eq!(path, root.join(".qkart.toml"));

        let _ = std::fs::remove_dir_all(&root);
    }
}

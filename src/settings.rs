//! Layered configuration parameter resolution
//!
//! Parameters such as the Gemini API key are looked up at call time from an
//! ordered list of sources. The default layering is a local override file
//! (`.env.local`) followed by the process environment. Names are
//! case-insensitive and canonically upper-cased.
//!
//! Resolution is a pure read: the override file is parsed on every call and
//! the process environment is never written to.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the Gemini API key parameter
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Parameters without which the service cannot do its job
pub const REQUIRED_PARAMS: &[&str] = &[GEMINI_API_KEY];

/// A source of configuration values
///
/// Implementations receive the canonical (upper-cased) name and return the
/// raw value, if any. Empty values are filtered by [`Resolver`].
pub trait ConfigSource: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;

    /// Short label for log output
    fn describe(&self) -> String;
}

/// Dotenv-format file consulted before the environment
#[derive(Debug, Clone)]
pub struct OverrideFile {
    path: PathBuf,
}

impl OverrideFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for OverrideFile {
    fn lookup(&self, name: &str) -> Option<String> {
        let entries = match dotenvy::from_path_iter(&self.path) {
            Ok(entries) => entries,
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Override file unreadable, ignoring it"
                );
                return None;
            }
        };

        // Later assignments of the same key win, as in a sourced shell file
        let mut found = None;
        for entry in entries {
            match entry {
                Ok((key, value)) if key == name => found = Some(value),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Skipping malformed line in override file"
                    );
                }
            }
        }
        found
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// The process environment (read-only)
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        env_value(name, std::env::var(name))
    }

    fn describe(&self) -> String {
        "environment".to_string()
    }
}

/// A set variable that is not valid UTF-8 is treated as absent, with a warning
fn env_value(name: &str, result: Result<String, std::env::VarError>) -> Option<String> {
    match result {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(
                param = %name,
                "Environment variable is not valid UTF-8, ignoring it"
            );
            None
        }
    }
}

/// Fixed in-memory mapping, mainly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    values: HashMap<String, String>,
}

impl StaticSource {
    /// Build from key/value pairs. Keys are upper-cased.
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_uppercase(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for StaticSource {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn describe(&self) -> String {
        format!("static({} keys)", self.values.len())
    }
}

/// Resolves parameters from an ordered list of sources
///
/// The first source holding a non-empty value wins. A value explicitly set
/// to the empty string is treated the same as an unset one.
pub struct Resolver {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Resolver {
    pub fn new(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        Self { sources }
    }

    /// Override file first, then the process environment
    pub fn layered(override_file: impl Into<PathBuf>) -> Self {
        Self::new(vec![
            Box::new(OverrideFile::new(override_file)),
            Box::new(ProcessEnv),
        ])
    }

    /// Resolve a parameter by name (case-insensitive)
    pub fn resolve(&self, name: &str) -> Option<String> {
        let canonical = name.to_uppercase();

        for source in &self.sources {
            if let Some(value) = source.lookup(&canonical).filter(|v| !v.is_empty()) {
                tracing::trace!(
                    param = %canonical,
                    source = %source.describe(),
                    "Configuration parameter resolved"
                );
                return Some(value);
            }
        }

        tracing::trace!(param = %canonical, "Configuration parameter not set");
        None
    }

    pub fn gemini_api_key(&self) -> Option<String> {
        self.resolve(GEMINI_API_KEY)
    }

    /// Names of required parameters that are currently unset, in declaration order
    pub fn validate_required(&self) -> Vec<&'static str> {
        REQUIRED_PARAMS
            .iter()
            .copied()
            .filter(|name| self.resolve(name).is_none())
            .collect()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.describe()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

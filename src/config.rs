use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::Error;

/// File looked up in the working directory by [`Config::load_default`].
pub const CONFIG_FILE: &str = "interfacer.toml";

/// How a reference's qualifier is mapped to an import path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Look the qualifier up in a fixed table.
    Index,
    /// Walk the search roots for a package with a matching package clause.
    #[default]
    Scan,
}

/// Resolved configuration: where packages live and how references resolve.
#[derive(Debug, Clone)]
pub struct Config {
    pub goroot: Option<PathBuf>,
    pub gopath: Vec<PathBuf>,
    pub goos: String,
    pub goarch: String,
    pub resolver: Strategy,
    /// Reuse parsed packages within one top-level call.
    pub cache: bool,
    /// Extra qualifier -> import path entries for the index strategy.
    pub imports: BTreeMap<String, String>,
    /// Import path prefix -> directory holding that module's source.
    pub modules: BTreeMap<String, PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goroot: None,
            gopath: Vec::new(),
            goos: host_goos().to_string(),
            goarch: host_goarch().to_string(),
            resolver: Strategy::default(),
            cache: true,
            imports: BTreeMap::new(),
            modules: BTreeMap::new(),
        }
    }
}

// ---- TOML deserialization types ----

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    goroot: Option<String>,
    #[serde(default)]
    gopath: Vec<String>,
    goos: Option<String>,
    goarch: Option<String>,
    resolver: Option<Strategy>,
    cache: Option<bool>,
    #[serde(default)]
    imports: BTreeMap<String, String>,
    #[serde(default)]
    modules: BTreeMap<String, String>,
}

impl Config {
    /// Load `path`, then fill unset fields from the environment and host.
    pub fn load(path: &Path) -> Result<Config, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("could not read config: {e}"), path.to_path_buf()))?;
        let base = path.parent().unwrap_or(Path::new("."));
        Self::from_toml_str(&text, base, path, |key| std::env::var(key).ok())
    }

    /// Use `./interfacer.toml` when present, otherwise environment defaults.
    pub fn load_default() -> Result<Config, Error> {
        let path = Path::new(CONFIG_FILE);
        if path.is_file() {
            return Self::load(path);
        }
        Ok(Self::from_env(|key| std::env::var(key).ok()))
    }

    /// Configuration built from environment variables alone.
    pub fn from_env(env: impl Fn(&str) -> Option<String>) -> Config {
        let mut config = Config::default();
        config.apply_env(&env);
        config
    }

    /// Parse config text. Values in the file win over the environment, which
    /// wins over host defaults. Relative paths are taken relative to `base`;
    /// `origin` only names the file in errors.
    pub fn from_toml_str(
        text: &str,
        base: &Path,
        origin: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, Error> {
        let raw: TomlConfig = toml::from_str(text)
            .map_err(|e| Error::config(format!("invalid config: {e}"), origin.to_path_buf()))?;

        let mut config = Config::from_env(env);
        if let Some(goroot) = raw.goroot {
            config.goroot = Some(base.join(goroot));
        }
        if !raw.gopath.is_empty() {
            config.gopath = raw.gopath.iter().map(|p| base.join(p)).collect();
        }
        if let Some(goos) = raw.goos {
            config.goos = goos;
        }
        if let Some(goarch) = raw.goarch {
            config.goarch = goarch;
        }
        config.resolver = raw.resolver.unwrap_or_default();
        config.cache = raw.cache.unwrap_or(true);
        config.imports = raw.imports;
        config.modules = raw.modules.into_iter().map(|(prefix, dir)| (prefix, base.join(dir))).collect();
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &Path) -> Result<(), Error> {
        if self.goos.is_empty() || self.goarch.is_empty() {
            return Err(Error::config("'goos' and 'goarch' must not be empty", origin.to_path_buf()));
        }
        for (qualifier, path) in &self.imports {
            if qualifier.is_empty() || path.is_empty() {
                return Err(Error::config(
                    format!("import '{qualifier}': qualifier and path must not be empty"),
                    origin.to_path_buf(),
                ));
            }
        }
        if let Some(prefix) = self.modules.keys().find(|p| p.is_empty() || p.ends_with('/')) {
            return Err(Error::config(
                format!("module '{prefix}': prefix must be a non-empty import path without trailing '/'"),
                origin.to_path_buf(),
            ));
        }
        Ok(())
    }

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) {
        if self.goroot.is_none() {
            self.goroot = env("GOROOT").filter(|s| !s.is_empty()).map(PathBuf::from);
        }
        if self.gopath.is_empty() {
            self.gopath = match env("GOPATH").filter(|s| !s.is_empty()) {
                Some(list) => std::env::split_paths(&list).collect(),
                None => env("HOME").map(|home| vec![PathBuf::from(home).join("go")]).unwrap_or_default(),
            };
        }
        if let Some(goos) = env("GOOS").filter(|s| !s.is_empty()) {
            self.goos = goos;
        }
        if let Some(goarch) = env("GOARCH").filter(|s| !s.is_empty()) {
            self.goarch = goarch;
        }
    }
}

/// Go's name for the host operating system.
pub fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// Go's name for the host architecture.
pub fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc64" => "ppc64",
        other => other,
    }
}

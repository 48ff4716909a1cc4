use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::diagnostics::Error;

/// A package directory and its buildable `.go` files, sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDir {
    pub import_path: String,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// A directory serving every import path under `prefix` (`""` serves all paths).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRoot {
    pub prefix: String,
    pub dir: PathBuf,
}

impl SearchRoot {
    pub fn new(prefix: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self { prefix: prefix.into(), dir: dir.into() }
    }

    /// Directory `import_path` would live in under this root.
    pub fn dir_for(&self, import_path: &str) -> Option<PathBuf> {
        if self.prefix.is_empty() {
            return Some(self.dir.join(import_path));
        }
        if import_path == self.prefix {
            return Some(self.dir.clone());
        }
        let rest = import_path.strip_prefix(&self.prefix)?.strip_prefix('/')?;
        Some(self.dir.join(rest))
    }

    /// Import path of `dir`, a directory somewhere below this root.
    pub fn import_path_of(&self, dir: &Path) -> Option<String> {
        let rel = dir.strip_prefix(&self.dir).ok()?;
        let rel = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/");
        Some(match (self.prefix.is_empty(), rel.is_empty()) {
            (true, _) => rel,
            (false, true) => self.prefix.clone(),
            (false, false) => format!("{}/{rel}", self.prefix),
        })
    }
}

/// Maps an import path to the directory and files of that package.
pub trait ModuleLocator {
    fn locate(&self, import_path: &str) -> Result<PackageDir, Error>;

    /// Search roots in lookup order, for collaborators that enumerate packages.
    fn roots(&self) -> Vec<SearchRoot>;

    /// Buildable files of an arbitrary package directory.
    fn buildable_files(&self, dir: &Path) -> Result<Vec<PathBuf>, Error>;
}

/// Build target used to filter `_GOOS` / `_GOARCH` file names and
/// `//go:build` constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub goos: String,
    pub goarch: String,
}

/// `go/build`-style lookup over module replacements, `GOROOT/src`,
/// `GOROOT/src/vendor` and each `GOPATH/src`, in that order.
#[derive(Debug, Clone)]
pub struct SearchPath {
    roots: Vec<SearchRoot>,
    target: Target,
}

impl SearchPath {
    pub fn new(roots: Vec<SearchRoot>, target: Target) -> Self {
        Self { roots, target }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut modules: Vec<SearchRoot> = config
            .modules
            .iter()
            .map(|(prefix, dir)| SearchRoot::new(prefix.clone(), dir.clone()))
            .collect();
        // Longest prefix first so nested modules shadow their parents.
        modules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()).then_with(|| a.prefix.cmp(&b.prefix)));

        let mut roots = modules;
        if let Some(goroot) = &config.goroot {
            roots.push(SearchRoot::new("", goroot.join("src")));
            roots.push(SearchRoot::new("", goroot.join("src").join("vendor")));
        }
        for gopath in &config.gopath {
            roots.push(SearchRoot::new("", gopath.join("src")));
        }
        Self::new(roots, Target { goos: config.goos.clone(), goarch: config.goarch.clone() })
    }
}

impl ModuleLocator for SearchPath {
    fn locate(&self, import_path: &str) -> Result<PackageDir, Error> {
        validate_import_path(import_path)?;

        let mut empty_dir = None;
        for root in &self.roots {
            let Some(dir) = root.dir_for(import_path) else { continue };
            if !dir.is_dir() {
                continue;
            }
            let files = self.buildable_files(&dir)?;
            if files.is_empty() {
                empty_dir.get_or_insert(dir);
                continue;
            }
            debug!(import_path, dir = %dir.display(), files = files.len(), "located package");
            return Ok(PackageDir { import_path: import_path.to_string(), dir, files });
        }

        let reason = match empty_dir {
            Some(dir) => format!("no buildable Go source files in {}", dir.display()),
            None => {
                let searched = self
                    .roots
                    .iter()
                    .filter_map(|r| r.dir_for(import_path))
                    .map(|d| format!("\n\t{}", d.display()))
                    .collect::<String>();
                format!("cannot find package \"{import_path}\" in any of:{searched}")
            }
        };
        Err(Error::module_not_found(import_path, reason))
    }

    fn roots(&self) -> Vec<SearchRoot> {
        self.roots.clone()
    }

    fn buildable_files(&self, dir: &Path) -> Result<Vec<PathBuf>, Error> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            Error::module_not_found(dir.display().to_string(), format!("could not read directory: {e}"))
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| is_buildable(name, &self.target))
            })
            .filter(|p| self.header_allows(p))
            .collect();
        files.sort();
        Ok(files)
    }
}

impl SearchPath {
    /// Whether the file's `//go:build` line, if any, admits the target. An
    /// unreadable file is kept so the package scan can report it.
    fn header_allows(&self, path: &Path) -> bool {
        let Ok(source) = std::fs::read_to_string(path) else { return true };
        let Some(expr) = build_constraint(&source) else { return true };
        match matches_constraint(expr, &self.target) {
            Some(true) => true,
            Some(false) => {
                debug!(file = %path.display(), constraint = expr, "excluded by build constraint");
                false
            }
            None => {
                warn!(file = %path.display(), constraint = expr, "excluding file with malformed build constraint");
                false
            }
        }
    }
}

fn validate_import_path(import_path: &str) -> Result<(), Error> {
    let invalid = import_path.is_empty()
        || import_path.starts_with('/')
        || import_path.ends_with('/')
        || import_path.contains('\\')
        || import_path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if invalid {
        return Err(Error::module_not_found(import_path, "invalid import path"));
    }
    Ok(())
}

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// Whether a file name belongs in a package build for `target`: a non-test
/// `.go` file, not hidden, whose `_GOOS` / `_GOARCH` suffixes match.
pub fn is_buildable(name: &str, target: &Target) -> bool {
    let Some(stem) = name.strip_suffix(".go") else { return false };
    if stem.ends_with("_test") || name.starts_with('_') || name.starts_with('.') {
        return false;
    }
    let stem = stem.split('.').next().unwrap_or(stem);
    // Only suffixes after an underscore count: `linux.go` builds everywhere.
    let Some(underscore) = stem.find('_') else { return true };
    let parts: Vec<&str> = stem[underscore..].split('_').collect();
    let n = parts.len();
    if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
        return matches_os(parts[n - 2], &target.goos) && parts[n - 1] == target.goarch;
    }
    if KNOWN_OS.contains(&parts[n - 1]) {
        return matches_os(parts[n - 1], &target.goos);
    }
    if KNOWN_ARCH.contains(&parts[n - 1]) {
        return parts[n - 1] == target.goarch;
    }
    true
}

/// Operating systems satisfying the `unix` build tag.
const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Expression of the `//go:build` line in the file header: the comments and
/// blank lines before the package clause.
pub fn build_constraint(source: &str) -> Option<&str> {
    let mut in_block = false;
    for line in source.lines() {
        let line = line.trim();
        if in_block {
            in_block = !line.contains("*/");
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if let Some(expr) = line.strip_prefix("//go:build") {
            if expr.is_empty() || expr.starts_with([' ', '\t']) {
                return Some(expr.trim());
            }
            continue;
        }
        if line.starts_with("//") {
            continue;
        }
        if line.starts_with("/*") {
            in_block = !line[2..].contains("*/");
            continue;
        }
        return None;
    }
    None
}

/// Evaluate a build constraint such as `linux && (amd64 || arm64) && !cgo`.
/// `None` when the expression does not parse.
pub fn matches_constraint(expr: &str, target: &Target) -> Option<bool> {
    let tokens = constraint_tokens(expr)?;
    let mut eval = ConstraintEval { tokens: &tokens, pos: 0, target };
    let value = eval.or()?;
    (eval.pos == tokens.len()).then_some(value)
}

fn constraint_tokens(expr: &str) -> Option<Vec<&str>> {
    let mut tokens = Vec::new();
    let mut rest = expr.trim_start();
    while !rest.is_empty() {
        let len = if rest.starts_with("&&") || rest.starts_with("||") {
            2
        } else if rest.starts_with(['!', '(', ')']) {
            1
        } else {
            let end = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                .unwrap_or(rest.len());
            if end == 0 {
                return None;
            }
            end
        };
        tokens.push(&rest[..len]);
        rest = rest[len..].trim_start();
    }
    Some(tokens)
}

struct ConstraintEval<'a> {
    tokens: &'a [&'a str],
    pos: usize,
    target: &'a Target,
}

impl ConstraintEval<'_> {
    fn next_is(&self, tok: &str) -> bool {
        self.tokens.get(self.pos) == Some(&tok)
    }

    fn or(&mut self) -> Option<bool> {
        let mut value = self.and()?;
        while self.next_is("||") {
            self.pos += 1;
            value |= self.and()?;
        }
        Some(value)
    }

    fn and(&mut self) -> Option<bool> {
        let mut value = self.not()?;
        while self.next_is("&&") {
            self.pos += 1;
            value &= self.not()?;
        }
        Some(value)
    }

    fn not(&mut self) -> Option<bool> {
        let tok = *self.tokens.get(self.pos)?;
        self.pos += 1;
        match tok {
            "!" => self.not().map(|v| !v),
            "(" => {
                let value = self.or()?;
                if !self.next_is(")") {
                    return None;
                }
                self.pos += 1;
                Some(value)
            }
            "&&" | "||" | ")" => None,
            tag => Some(matches_tag(tag, self.target)),
        }
    }
}

/// Whether a single build tag holds for `target`. Release tags `go1.N` all
/// hold; `cgo`, `ignore` and custom tags never do.
fn matches_tag(tag: &str, target: &Target) -> bool {
    if let Some(minor) = tag.strip_prefix("go1.") {
        return !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit());
    }
    match tag {
        "gc" => true,
        "unix" => UNIX_OS.contains(&target.goos.as_str()),
        _ => matches_os(tag, &target.goos) || tag == target.goarch,
    }
}

fn matches_os(tag: &str, goos: &str) -> bool {
    tag == goos
        || (tag == "linux" && goos == "android")
        || (tag == "solaris" && goos == "illumos")
        || (tag == "darwin" && goos == "ios")
}

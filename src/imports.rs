use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use tracing::debug;

use crate::config::Config;
use crate::diagnostics::Error;
use crate::modules::ModuleLocator;
use crate::parser::{self, ast::{InterfaceElem, TypeExpr}};

/// Adds the imports a Go fragment needs for its qualified identifiers.
pub trait ImportInference {
    /// Return `source` with an import inserted for every selector qualifier
    /// that is not already imported. Fails when a qualifier has no package.
    fn process(&self, source: &str) -> Result<String, Error>;
}

/// Import paths of the standard library packages known to the index.
const STANDARD_PACKAGES: &[&str] = &[
    "archive/tar", "archive/zip", "bufio", "bytes", "cmp", "compress/bzip2", "compress/flate",
    "compress/gzip", "compress/lzw", "compress/zlib", "container/heap", "container/list",
    "container/ring", "context", "crypto", "crypto/aes", "crypto/cipher", "crypto/ecdh",
    "crypto/ecdsa", "crypto/ed25519", "crypto/elliptic", "crypto/hmac", "crypto/rand",
    "crypto/rsa", "crypto/sha1", "crypto/sha256", "crypto/sha512", "crypto/tls",
    "crypto/x509", "database/sql", "database/sql/driver", "debug/elf", "embed",
    "encoding", "encoding/base64", "encoding/binary", "encoding/csv", "encoding/gob",
    "encoding/hex", "encoding/json", "encoding/pem", "encoding/xml", "errors", "expvar",
    "flag", "fmt", "go/ast", "go/build", "go/parser", "go/printer", "go/token", "go/types",
    "hash", "hash/crc32", "hash/fnv", "hash/maphash", "html", "html/template", "image",
    "image/color", "image/draw", "image/png", "io", "io/fs", "iter", "log", "log/slog",
    "maps", "math", "math/big", "math/bits", "math/rand", "math/rand/v2", "mime",
    "mime/multipart", "net", "net/http", "net/http/cookiejar", "net/http/httptest",
    "net/http/httptrace", "net/mail", "net/netip", "net/rpc", "net/smtp", "net/textproto",
    "net/url", "os", "os/exec", "os/signal", "os/user", "path", "path/filepath", "plugin",
    "reflect", "regexp", "regexp/syntax", "runtime", "runtime/debug", "runtime/pprof",
    "runtime/trace", "slices", "sort", "strconv", "strings", "sync", "sync/atomic",
    "syscall", "testing", "testing/fstest", "testing/iotest", "text/scanner",
    "text/tabwriter", "text/template", "time", "unicode", "unicode/utf16", "unicode/utf8",
    "unique", "unsafe",
];

/// Fixed table of qualifier -> candidate import paths.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl PackageIndex {
    /// Index of the standard library packages.
    pub fn standard() -> Self {
        let mut index = Self::default();
        for path in STANDARD_PACKAGES {
            index.insert(default_qualifier(path), *path);
        }
        index
    }

    /// Standard index, with `[imports]` entries replacing any built-in
    /// candidates for the same qualifier.
    pub fn from_config(config: &Config) -> Self {
        let mut index = Self::standard();
        for (qualifier, path) in &config.imports {
            index.entries.insert(qualifier.clone(), vec![path.clone()]);
        }
        index
    }

    pub fn insert(&mut self, qualifier: impl Into<String>, path: impl Into<String>) {
        let paths = self.entries.entry(qualifier.into()).or_default();
        let path = path.into();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    /// Shortest candidate path for `qualifier`, ties broken lexicographically.
    pub fn lookup(&self, qualifier: &str) -> Option<&str> {
        self.entries
            .get(qualifier)?
            .iter()
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .map(String::as_str)
    }
}

impl ImportInference for PackageIndex {
    fn process(&self, source: &str) -> Result<String, Error> {
        add_missing_imports(source, |qualifier, _| {
            self.lookup(qualifier)
                .map(str::to_string)
                .ok_or_else(|| Error::module_not_found(qualifier, "no known import path for this name"))
        })
    }
}

/// Finds packages by walking the locator's search roots and reading each
/// directory's package clause.
pub struct ExportScan {
    locator: Box<dyn ModuleLocator>,
}

#[derive(Debug)]
struct Candidate {
    path: String,
    files: Vec<PathBuf>,
}

impl ExportScan {
    pub fn new(locator: impl ModuleLocator + 'static) -> Self {
        Self { locator: Box::new(locator) }
    }

    /// Import path for `qualifier`. Packages declaring every name in `idents`
    /// win over those that don't; then shortest path, then lexicographic.
    pub fn lookup(&self, qualifier: &str, idents: &[String]) -> Result<String, Error> {
        let candidates = self.candidates(qualifier);
        debug!(qualifier, candidates = candidates.len(), "scanned search roots");

        let by_path = |a: &&Candidate, b: &&Candidate| a.path.len().cmp(&b.path.len()).then_with(|| a.path.cmp(&b.path));
        let declaring = candidates.iter().filter(|c| declares_all(c, idents)).min_by(by_path);
        declaring
            .or_else(|| candidates.iter().min_by(by_path))
            .map(|c| c.path.clone())
            .ok_or_else(|| Error::module_not_found(qualifier, "no package with this name under the search roots"))
    }

    fn candidates(&self, qualifier: &str) -> Vec<Candidate> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for root in self.locator.roots() {
            let mut stack = vec![root.dir.clone()];
            while let Some(dir) = stack.pop() {
                let Ok(entries) = std::fs::read_dir(&dir) else { continue };
                for entry in entries.filter_map(|e| e.ok()) {
                    let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
                    let name = entry.file_name();
                    let name = name.to_string_lossy();
                    if is_dir && !skip_dir(&name) {
                        stack.push(entry.path());
                    }
                }

                let Ok(files) = self.locator.buildable_files(&dir) else { continue };
                let Some(name) = files.iter().find_map(|f| parser::package_name(&std::fs::read_to_string(f).ok()?))
                else {
                    continue;
                };
                if name != qualifier {
                    continue;
                }
                let Some(path) = root.import_path_of(&dir).filter(|p| !p.is_empty()) else { continue };
                // Earlier roots shadow later ones.
                if seen.insert(path.clone()) {
                    found.push(Candidate { path, files });
                }
            }
        }
        found
    }
}

impl ImportInference for ExportScan {
    fn process(&self, source: &str) -> Result<String, Error> {
        add_missing_imports(source, |qualifier, idents| self.lookup(qualifier, idents))
    }
}

fn skip_dir(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_') || name == "testdata" || name == "vendor"
}

fn declares_all(candidate: &Candidate, idents: &[String]) -> bool {
    let mut missing: HashSet<&str> = idents.iter().map(String::as_str).collect();
    for file in &candidate.files {
        let Ok(source) = std::fs::read_to_string(file) else { continue };
        let Ok(parsed) = parser::parse_file(&source, 0) else { continue };
        for spec in parsed.type_specs() {
            missing.remove(spec.node.name.node.as_str());
        }
        if missing.is_empty() {
            return true;
        }
    }
    missing.is_empty()
}

/// Name a package at `path` is conventionally imported as: the last path
/// element, skipping a major-version suffix like `v2`.
pub fn default_qualifier(path: &str) -> &str {
    let mut elems = path.rsplit('/');
    let last = elems.next().unwrap_or(path);
    let is_version = last.len() > 1 && last.starts_with('v') && last[1..].bytes().all(|b| b.is_ascii_digit());
    match elems.next() {
        Some(prev) if is_version => prev,
        _ => last,
    }
}

/// Insert imports for every unimported selector qualifier in `source`,
/// asking `lookup(qualifier, idents)` for each qualifier's import path.
pub fn add_missing_imports(
    source: &str,
    mut lookup: impl FnMut(&str, &[String]) -> Result<String, Error>,
) -> Result<String, Error> {
    let file = parser::parse_file(source, 0)?;
    let imported: HashSet<&str> = file.imports.iter().map(|i| i.node.binding_name()).collect();

    let mut refs = Vec::new();
    for spec in file.var_specs() {
        if let Some(ty) = &spec.node.ty {
            collect_selectors(&ty.node, &mut refs);
        }
    }
    for spec in file.type_specs() {
        collect_selectors(&spec.node.ty.node, &mut refs);
    }

    let mut wanted: Vec<(&str, Vec<String>)> = Vec::new();
    for (qualifier, ident) in refs {
        if imported.contains(qualifier) {
            continue;
        }
        match wanted.iter_mut().find(|(q, _)| *q == qualifier) {
            Some((_, idents)) if !idents.iter().any(|i| i == ident) => idents.push(ident.to_string()),
            Some(_) => {}
            None => wanted.push((qualifier, vec![ident.to_string()])),
        }
    }
    if wanted.is_empty() {
        return Ok(source.to_string());
    }

    let mut lines = String::new();
    for (qualifier, idents) in &wanted {
        let path = lookup(qualifier, idents)?;
        debug!(qualifier, path = %path, "inferred import");
        if default_qualifier(&path) == *qualifier {
            lines.push_str(&format!("\nimport {path:?}"));
        } else {
            lines.push_str(&format!("\nimport {qualifier} {path:?}"));
        }
    }

    let at = file.package.span.end;
    Ok(format!("{}{}{}", &source[..at], lines, &source[at..]))
}

fn collect_selectors<'a>(ty: &'a TypeExpr, out: &mut Vec<(&'a str, &'a str)>) {
    match ty {
        TypeExpr::Ident(_) => {}
        TypeExpr::Selector { package, name } => out.push((&package.node, &name.node)),
        TypeExpr::Instance { base, args } => {
            collect_selectors(&base.node, out);
            for arg in args {
                collect_selectors(&arg.node, out);
            }
        }
        TypeExpr::Pointer(elem)
        | TypeExpr::Slice(elem)
        | TypeExpr::Ellipsis(elem)
        | TypeExpr::Paren(elem)
        | TypeExpr::Tilde(elem)
        | TypeExpr::Array { elem, .. }
        | TypeExpr::Chan { elem, .. } => collect_selectors(&elem.node, out),
        TypeExpr::Map { key, value } => {
            collect_selectors(&key.node, out);
            collect_selectors(&value.node, out);
        }
        TypeExpr::Func(func) => {
            for group in func.params.iter().chain(&func.results) {
                collect_selectors(&group.ty.node, out);
            }
        }
        TypeExpr::Interface(iface) => {
            for elem in iface.methods.iter().flatten() {
                match elem {
                    InterfaceElem::Method(m) => {
                        for group in m.sig.params.iter().chain(&m.sig.results) {
                            collect_selectors(&group.ty.node, out);
                        }
                    }
                    InterfaceElem::Embed(t) => collect_selectors(&t.node, out),
                }
            }
        }
        TypeExpr::Struct(st) => {
            for field in &st.fields {
                collect_selectors(&field.ty.node, out);
            }
        }
        TypeExpr::Union(terms) => {
            for term in terms {
                collect_selectors(&term.node, out);
            }
        }
    }
}

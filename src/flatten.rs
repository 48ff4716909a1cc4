use tracing::debug;

use crate::config::{Config, Strategy};
use crate::diagnostics::Error;
use crate::imports::{ExportScan, ImportInference, PackageIndex};
use crate::locate::{self, ModuleCache, ResolvedModule, Skipped};
use crate::modules::{ModuleLocator, SearchPath};
use crate::parser::ast::{InterfaceElem, TypeExpr, TypeSpec};
use crate::qualify::{Func, Param};
use crate::resolve::{self, InterfaceRef};

/// Resolves interface references and flattens them into method lists.
pub struct Interfacer {
    locator: Box<dyn ModuleLocator>,
    inference: Box<dyn ImportInference>,
    cache: bool,
}

impl Interfacer {
    pub fn new(locator: impl ModuleLocator + 'static, inference: impl ImportInference + 'static) -> Self {
        Self { locator: Box::new(locator), inference: Box::new(inference), cache: true }
    }

    /// Enable or disable reuse of parsed packages within one call.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        let locator = SearchPath::from_config(config);
        let inference: Box<dyn ImportInference> = match config.resolver {
            Strategy::Index => Box::new(PackageIndex::from_config(config)),
            Strategy::Scan => Box::new(ExportScan::new(locator.clone())),
        };
        Self { locator: Box::new(locator), inference, cache: config.cache }
    }

    pub fn find_interface(&self, reference: &str) -> Result<InterfaceRef, Error> {
        resolve::find_interface(&*self.inference, reference)
    }

    /// The first type spec named `ident` in the package at `path`.
    pub fn type_spec(&self, path: &str, ident: &str) -> Result<(ResolvedModule, TypeSpec), Error> {
        locate::type_spec(&*self.locator, None, path, ident, &mut Vec::new())
    }

    /// Every method an implementation of `reference` must provide, embedded
    /// interfaces expanded in place.
    pub fn functions(&self, reference: &str) -> Result<Vec<Func>, Error> {
        self.functions_with_diagnostics(reference).0
    }

    /// Like [`functions`](Self::functions), also returning the files that
    /// were skipped while scanning packages.
    pub fn functions_with_diagnostics(&self, reference: &str) -> (Result<Vec<Func>, Error>, Vec<Skipped>) {
        let mut session = Session {
            interfacer: self,
            chain: Vec::new(),
            skipped: Vec::new(),
            cache: self.cache.then(ModuleCache::default),
        };
        let result = session.functions(reference);
        (result, session.skipped)
    }
}

/// State of one top-level `functions` call.
struct Session<'a> {
    interfacer: &'a Interfacer,
    /// `(path, ident)` of every interface currently being expanded.
    chain: Vec<(String, String)>,
    skipped: Vec<Skipped>,
    cache: Option<ModuleCache>,
}

impl Session<'_> {
    fn functions(&mut self, reference: &str) -> Result<Vec<Func>, Error> {
        let found = self.interfacer.find_interface(reference)?;
        let key = (found.path, found.name);
        if self.chain.contains(&key) {
            let chain = self.chain.iter().chain([&key]).map(|(path, ident)| format!("{path}.{ident}")).collect();
            return Err(Error::CyclicEmbedding { chain });
        }

        let (module, spec) = locate::type_spec(
            &*self.interfacer.locator,
            self.cache.as_mut(),
            &key.0,
            &key.1,
            &mut self.skipped,
        )?;

        self.chain.push(key);
        let result = self.expand(reference, &module, &spec);
        self.chain.pop();
        result
    }

    fn expand(&mut self, reference: &str, module: &ResolvedModule, spec: &TypeSpec) -> Result<Vec<Func>, Error> {
        let TypeExpr::Interface(iface) = &spec.ty.node else {
            return Err(Error::NotAnInterface { reference: reference.to_string() });
        };
        let Some(elems) = &iface.methods else {
            return Err(Error::EmptyInterface { reference: reference.to_string() });
        };
        let scope: Vec<String> = spec.type_param_names().map(str::to_string).collect();

        let mut funcs = Vec::new();
        for elem in elems {
            match elem {
                InterfaceElem::Method(m) => funcs.push(Func {
                    name: m.name.node.clone(),
                    params: module.param_list(&m.sig.params, &scope),
                    res: module.param_list(&m.sig.results, &scope),
                }),
                InterfaceElem::Embed(ty) => match &ty.node {
                    // Type-set terms constrain, they add no methods.
                    TypeExpr::Union(_) | TypeExpr::Tilde(_) => {}
                    TypeExpr::Ident(name) if name == "any" || name == "comparable" => {}
                    TypeExpr::Ident(name) if name == "error" => funcs.push(Func {
                        name: "Error".to_string(),
                        params: Vec::new(),
                        res: vec![Param::new("", "string")],
                    }),
                    _ => {
                        let embedded = module.full_type(ty, &scope);
                        debug!(reference, embedded = %embedded, "expanding embedded interface");
                        funcs.extend(self.functions(&embedded)?);
                    }
                },
            }
        }
        Ok(funcs)
    }
}

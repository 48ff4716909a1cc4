use std::fmt;

use serde::Serialize;

use crate::locate::ResolvedModule;
use crate::parser::ast::*;
use crate::printer::print_type;
use crate::span::Spanned;

/// One flattened method: its name and fully-qualified parameters and results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Func {
    pub name: String,
    pub params: Vec<Param>,
    pub res: Vec<Param>,
}

/// A single parameter or result. `name` is empty for anonymous ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.name, self.ty)
        }
    }
}

fn join(params: &[Param]) -> String {
    params.iter().map(Param::to_string).collect::<Vec<_>>().join(", ")
}

/// Go method-spec form: `Read(p []byte) (n int, err error)`.
impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, join(&self.params))?;
        match self.res.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_empty() => write!(f, " {}", single.ty),
            res => write!(f, " ({})", join(res)),
        }
    }
}

/// Identifiers Go declares in the universe block.
const PREDECLARED: &[&str] = &[
    "any", "bool", "byte", "comparable", "complex64", "complex128", "error", "float32", "float64",
    "int", "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32",
    "uint64", "uintptr",
];

pub fn is_predeclared(name: &str) -> bool {
    PREDECLARED.contains(&name)
}

pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

impl ResolvedModule {
    /// Render `ty` so it is valid outside this package: exported names
    /// declared here become `name.Ident`. Names in `scope` (type parameters
    /// of the enclosing declaration) are left alone.
    pub fn full_type(&self, ty: &Spanned<TypeExpr>, scope: &[String]) -> String {
        let mut ty = ty.node.clone();
        qualify(&mut ty, &self.name, scope);
        print_type(&ty)
    }

    /// One [`Param`] per name in `group`, or a single unnamed one.
    pub fn params(&self, group: &ParamGroup, scope: &[String]) -> Vec<Param> {
        let ty = self.full_type(&group.ty, scope);
        if group.names.is_empty() {
            return vec![Param::new("", ty)];
        }
        group.names.iter().map(|name| Param::new(name.node.clone(), ty.clone())).collect()
    }

    /// Flatten a list of groups into individual parameters, in order.
    pub fn param_list(&self, groups: &[ParamGroup], scope: &[String]) -> Vec<Param> {
        groups.iter().flat_map(|g| self.params(g, scope)).collect()
    }
}

/// Rewrite unqualified exported identifiers in type position to `short.Ident`.
pub fn qualify(ty: &mut TypeExpr, short: &str, scope: &[String]) {
    match ty {
        TypeExpr::Ident(name) => {
            if is_exported(name) && !is_predeclared(name) && !scope.iter().any(|s| s == name) {
                let name = std::mem::take(name);
                *ty = TypeExpr::Selector {
                    package: Spanned::dummy(short.to_string()),
                    name: Spanned::dummy(name),
                };
            }
        }
        TypeExpr::Selector { .. } => {}
        TypeExpr::Instance { base, args } => {
            qualify(&mut base.node, short, scope);
            for arg in args {
                qualify(&mut arg.node, short, scope);
            }
        }
        TypeExpr::Array { len, elem } => {
            if let Some(len) = len {
                qualify_expr(len, short);
            }
            qualify(&mut elem.node, short, scope);
        }
        TypeExpr::Pointer(elem)
        | TypeExpr::Slice(elem)
        | TypeExpr::Ellipsis(elem)
        | TypeExpr::Paren(elem)
        | TypeExpr::Tilde(elem)
        | TypeExpr::Chan { elem, .. } => qualify(&mut elem.node, short, scope),
        TypeExpr::Map { key, value } => {
            qualify(&mut key.node, short, scope);
            qualify(&mut value.node, short, scope);
        }
        TypeExpr::Func(func) => qualify_signature(func, short, scope),
        TypeExpr::Interface(iface) => {
            for elem in iface.methods.iter_mut().flatten() {
                match elem {
                    InterfaceElem::Method(m) => qualify_signature(&mut m.sig, short, scope),
                    InterfaceElem::Embed(t) => qualify(&mut t.node, short, scope),
                }
            }
        }
        TypeExpr::Struct(st) => {
            for field in &mut st.fields {
                qualify(&mut field.ty.node, short, scope);
            }
        }
        TypeExpr::Union(terms) => {
            for term in terms {
                qualify(&mut term.node, short, scope);
            }
        }
    }
}

/// Same rewrite for the names in a constant expression: `[Size]byte`
/// becomes `[pkg.Size]byte`.
fn qualify_expr(e: &mut Expr, short: &str) {
    match e {
        Expr::Ident(name) => {
            if is_exported(name) && !is_predeclared(name) {
                let name = std::mem::take(name);
                *e = Expr::Selector { package: short.to_string(), name };
            }
        }
        Expr::Selector { .. } | Expr::BasicLit(_) => {}
        Expr::Paren(inner) | Expr::Unary { operand: inner, .. } => qualify_expr(inner, short),
        Expr::Binary { lhs, rhs, .. } => {
            qualify_expr(lhs, short);
            qualify_expr(rhs, short);
        }
        Expr::Call { func, args } => {
            qualify_expr(func, short);
            for arg in args {
                qualify_expr(arg, short);
            }
        }
    }
}

fn qualify_signature(func: &mut FuncType, short: &str, scope: &[String]) {
    for group in func.params.iter_mut().chain(func.results.iter_mut()) {
        qualify(&mut group.ty.node, short, scope);
    }
}

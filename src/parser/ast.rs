use crate::span::Spanned;

/// One parsed `.go` file. Only declaration-level structure is kept.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub package: Spanned<String>,
    pub imports: Vec<Spanned<ImportSpec>>,
    pub decls: Vec<Decl>,
}

impl SourceFile {
    pub fn type_specs(&self) -> impl Iterator<Item = &Spanned<TypeSpec>> {
        self.decls.iter().flat_map(|d| match d {
            Decl::Type(specs) => specs.as_slice(),
            Decl::Var(_) => &[][..],
        })
    }

    pub fn var_specs(&self) -> impl Iterator<Item = &Spanned<VarSpec>> {
        self.decls.iter().flat_map(|d| match d {
            Decl::Var(specs) => specs.as_slice(),
            Decl::Type(_) => &[][..],
        })
    }
}

#[derive(Debug, Clone)]
pub struct ImportSpec {
    /// Explicit local name: an identifier, `.` or `_`.
    pub name: Option<Spanned<String>>,
    pub path: Spanned<String>,
}

impl ImportSpec {
    /// Name the import is referred to by, assuming the package clause
    /// matches the last path element.
    pub fn binding_name(&self) -> &str {
        match &self.name {
            Some(name) => &name.node,
            None => self.path.node.rsplit('/').next().unwrap_or(&self.path.node),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Decl {
    Type(Vec<Spanned<TypeSpec>>),
    Var(Vec<Spanned<VarSpec>>),
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: Spanned<String>,
    pub type_params: Vec<ParamGroup>,
    /// `type A = B`
    pub is_alias: bool,
    pub ty: Spanned<TypeExpr>,
}

impl TypeSpec {
    pub fn type_param_names(&self) -> impl Iterator<Item = &str> {
        self.type_params.iter().flat_map(|g| g.names.iter().map(|n| n.node.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct VarSpec {
    pub names: Vec<Spanned<String>>,
    pub ty: Option<Spanned<TypeExpr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Ident(String),
    /// `pkg.Name`
    Selector { package: Spanned<String>, name: Spanned<String> },
    /// `Name[A, B]`
    Instance { base: Box<Spanned<TypeExpr>>, args: Vec<Spanned<TypeExpr>> },
    Pointer(Box<Spanned<TypeExpr>>),
    Slice(Box<Spanned<TypeExpr>>),
    /// `[N]T`. `None` for `[...]T`.
    Array { len: Option<Expr>, elem: Box<Spanned<TypeExpr>> },
    /// `...T`, only valid as the type of a final parameter.
    Ellipsis(Box<Spanned<TypeExpr>>),
    Map { key: Box<Spanned<TypeExpr>>, value: Box<Spanned<TypeExpr>> },
    Chan { dir: ChanDir, elem: Box<Spanned<TypeExpr>> },
    Func(FuncType),
    Interface(InterfaceType),
    Struct(StructType),
    Paren(Box<Spanned<TypeExpr>>),
    /// `~T`
    Tilde(Box<Spanned<TypeExpr>>),
    /// `A | B | C`
    Union(Vec<Spanned<TypeExpr>>),
}

/// A constant expression, as found in array lengths.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    /// `pkg.Name`
    Selector { package: String, name: String },
    /// Number, rune or string literal, as written.
    BasicLit(String),
    Paren(Box<Expr>),
    Unary { op: &'static str, operand: Box<Expr> },
    Binary { op: &'static str, lhs: Box<Expr>, rhs: Box<Expr> },
    /// Builtin call or conversion: `len(x)`, `uintptr(Size)`.
    Call { func: Box<Expr>, args: Vec<Expr> },
}

/// Binding power of a binary operator, 5 binding tightest.
pub fn precedence(op: &str) -> u8 {
    match op {
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        "+" | "-" | "|" | "^" => 4,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "&&" => 2,
        _ => 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub params: Vec<ParamGroup>,
    pub results: Vec<ParamGroup>,
}

/// A run of parameters sharing one type: `a, b int`, or an anonymous `int`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamGroup {
    pub names: Vec<Spanned<String>>,
    pub ty: Spanned<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    /// `None` when the element list is absent altogether. The parser always
    /// produces `Some`, possibly empty, for an `interface { ... }` literal.
    pub methods: Option<Vec<InterfaceElem>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceElem {
    Method(MethodSpec),
    /// Embedded interface or type-set term.
    Embed(Spanned<TypeExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub name: Spanned<String>,
    pub sig: FuncType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Empty for an embedded field.
    pub names: Vec<Spanned<String>>,
    pub ty: Spanned<TypeExpr>,
    pub tag: Option<String>,
}

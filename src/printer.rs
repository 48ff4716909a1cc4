use crate::parser::ast::*;

/// Print a type expression back to canonical Go text.
pub fn print_type(te: &TypeExpr) -> String {
    let mut pp = Printer::default();
    pp.emit_type_expr(te);
    pp.buf
}

#[derive(Default)]
struct Printer {
    buf: String,
}

impl Printer {
    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn emit_type_expr(&mut self, te: &TypeExpr) {
        match te {
            TypeExpr::Ident(name) => self.write(name),
            TypeExpr::Selector { package, name } => {
                self.write(&package.node);
                self.write(".");
                self.write(&name.node);
            }
            TypeExpr::Instance { base, args } => {
                self.emit_type_expr(&base.node);
                self.write("[");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_type_expr(&arg.node);
                }
                self.write("]");
            }
            TypeExpr::Pointer(elem) => {
                self.write("*");
                self.emit_type_expr(&elem.node);
            }
            TypeExpr::Slice(elem) => {
                self.write("[]");
                self.emit_type_expr(&elem.node);
            }
            TypeExpr::Array { len, elem } => {
                self.write("[");
                match len {
                    Some(len) => self.emit_expr(len, None),
                    None => self.write("..."),
                }
                self.write("]");
                self.emit_type_expr(&elem.node);
            }
            TypeExpr::Ellipsis(elem) => {
                self.write("...");
                self.emit_type_expr(&elem.node);
            }
            TypeExpr::Map { key, value } => {
                self.write("map[");
                self.emit_type_expr(&key.node);
                self.write("]");
                self.emit_type_expr(&value.node);
            }
            TypeExpr::Chan { dir, elem } => {
                match dir {
                    ChanDir::Both => self.write("chan "),
                    ChanDir::Send => self.write("chan<- "),
                    ChanDir::Recv => self.write("<-chan "),
                }
                self.emit_type_expr(&elem.node);
            }
            TypeExpr::Func(func) => {
                self.write("func");
                self.emit_signature(func);
            }
            TypeExpr::Interface(iface) => {
                self.write("interface{");
                let elems = iface.methods.as_deref().unwrap_or_default();
                if !elems.is_empty() {
                    self.write(" ");
                    for (i, elem) in elems.iter().enumerate() {
                        if i > 0 {
                            self.write("; ");
                        }
                        match elem {
                            InterfaceElem::Method(m) => {
                                self.write(&m.name.node);
                                self.emit_signature(&m.sig);
                            }
                            InterfaceElem::Embed(ty) => self.emit_type_expr(&ty.node),
                        }
                    }
                    self.write(" ");
                }
                self.write("}");
            }
            TypeExpr::Struct(st) => {
                self.write("struct{");
                if !st.fields.is_empty() {
                    self.write(" ");
                    for (i, field) in st.fields.iter().enumerate() {
                        if i > 0 {
                            self.write("; ");
                        }
                        self.emit_field(field);
                    }
                    self.write(" ");
                }
                self.write("}");
            }
            TypeExpr::Paren(inner) => {
                self.write("(");
                self.emit_type_expr(&inner.node);
                self.write(")");
            }
            TypeExpr::Tilde(inner) => {
                self.write("~");
                self.emit_type_expr(&inner.node);
            }
            TypeExpr::Union(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        self.write(" | ");
                    }
                    self.emit_type_expr(&term.node);
                }
            }
        }
    }

    /// Binary operators are spaced, except those binding tighter than an
    /// enclosing operator: `2 * N`, `2*N + 1`. `enclosing` is the lowest
    /// precedence among the binary operators around `e`.
    fn emit_expr(&mut self, e: &Expr, enclosing: Option<u8>) {
        match e {
            Expr::Ident(name) | Expr::BasicLit(name) => self.write(name),
            Expr::Selector { package, name } => {
                self.write(package);
                self.write(".");
                self.write(name);
            }
            Expr::Paren(inner) => {
                self.write("(");
                self.emit_expr(inner, None);
                self.write(")");
            }
            Expr::Unary { op, operand } => {
                self.write(op);
                self.emit_expr(operand, enclosing);
            }
            Expr::Binary { op, lhs, rhs } => {
                let prec = precedence(op);
                let spaced = enclosing.is_none_or(|outer| outer >= prec);
                let inner = Some(enclosing.map_or(prec, |outer| outer.min(prec)));
                self.emit_expr(lhs, inner);
                if spaced {
                    self.write(" ");
                    self.write(op);
                    self.write(" ");
                } else {
                    self.write(op);
                }
                self.emit_expr(rhs, inner);
            }
            Expr::Call { func, args } => {
                self.emit_expr(func, enclosing);
                self.write("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expr(arg, None);
                }
                self.write(")");
            }
        }
    }

    fn emit_signature(&mut self, func: &FuncType) {
        self.write("(");
        self.emit_param_groups(&func.params);
        self.write(")");
        match func.results.as_slice() {
            [] => {}
            [single] if single.names.is_empty() => {
                self.write(" ");
                self.emit_type_expr(&single.ty.node);
            }
            results => {
                self.write(" (");
                self.emit_param_groups(results);
                self.write(")");
            }
        }
    }

    fn emit_param_groups(&mut self, groups: &[ParamGroup]) {
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_names(&group.names);
            self.emit_type_expr(&group.ty.node);
        }
    }

    fn emit_names(&mut self, names: &[crate::span::Spanned<String>]) {
        if names.is_empty() {
            return;
        }
        let joined = names.iter().map(|n| n.node.as_str()).collect::<Vec<_>>().join(", ");
        self.write(&joined);
        self.write(" ");
    }

    fn emit_field(&mut self, field: &FieldDecl) {
        self.emit_names(&field.names);
        self.emit_type_expr(&field.ty.node);
        if let Some(tag) = &field.tag {
            self.write(" ");
            if tag.contains('`') {
                self.write(&format!("{tag:?}"));
            } else {
                self.write(&format!("`{tag}`"));
            }
        }
    }
}

pub mod ast;

use crate::diagnostics::Error;
use crate::lexer::{self, token::Token};
use crate::span::{Span, Spanned};
use ast::*;

/// Lex and parse one Go source file whose spans belong to `file_id`.
pub fn parse_file(source: &str, file_id: u32) -> Result<SourceFile, Error> {
    let tokens = lexer::lex_file(source, file_id)?;
    let mut parser = Parser::new(&tokens, source);
    parser.parse_source_file()
}

/// Read only the package clause of `source`, without lexing the rest.
pub fn package_name(source: &str) -> Option<String> {
    use logos::Logos;

    let mut lexer = Token::lexer(source)
        .spanned()
        .filter(|(tok, _)| !matches!(tok, Ok(Token::Newline | Token::LineComment | Token::BlockComment)));
    match lexer.next()? {
        (Ok(Token::Package), _) => {}
        _ => return None,
    }
    match lexer.next()? {
        (Ok(Token::Ident), span) => Some(source[span].to_string()),
        _ => None,
    }
}

/// One entry of a parameter list before Go's named/anonymous disambiguation.
enum Entry {
    Name(Spanned<String>),
    Named(Spanned<String>, Spanned<TypeExpr>),
    Type(Spanned<TypeExpr>),
}

pub struct Parser<'a> {
    tokens: &'a [Spanned<Token>],
    source: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned<Token>], source: &'a str) -> Self {
        Self { tokens, source, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Spanned<Token>> {
        self.tokens.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n).map(|t| &t.node)
    }

    fn at(&self, kind: &Token) -> bool {
        self.peek().is_some_and(|t| same_kind(&t.node, kind))
    }

    fn advance(&mut self) -> Option<&'a Spanned<Token>> {
        if self.pos < self.tokens.len() {
            let tok = &self.tokens[self.pos];
            self.pos += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn eat(&mut self, kind: &Token) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<Span, Error> {
        match self.tokens.get(self.pos) {
            Some(tok) if same_kind(&tok.node, expected) => {
                self.pos += 1;
                Ok(tok.span)
            }
            Some(tok) => Err(Error::syntax(
                format!("expected {expected}, found {}", tok.node),
                tok.span,
            )),
            None => Err(Error::syntax(
                format!("expected {expected}, found end of file"),
                self.eof_span(),
            )),
        }
    }

    fn expect_ident(&mut self) -> Result<Spanned<String>, Error> {
        match self.tokens.get(self.pos) {
            Some(tok) if matches!(tok.node, Token::Ident) => {
                let name = self.source[tok.span.start..tok.span.end].to_string();
                self.pos += 1;
                Ok(Spanned::new(name, tok.span))
            }
            Some(tok) => Err(Error::syntax(
                format!("expected identifier, found {}", tok.node),
                tok.span,
            )),
            None => Err(Error::syntax(
                "expected identifier, found end of file",
                self.eof_span(),
            )),
        }
    }

    fn expect_string(&mut self) -> Result<Spanned<String>, Error> {
        match self.tokens.get(self.pos) {
            Some(Spanned { node: Token::StringLit(s) | Token::RawStringLit(s), span }) => {
                self.pos += 1;
                Ok(Spanned::new(s.clone(), *span))
            }
            Some(tok) => Err(Error::syntax(
                format!("expected string literal, found {}", tok.node),
                tok.span,
            )),
            None => Err(Error::syntax(
                "expected string literal, found end of file",
                self.eof_span(),
            )),
        }
    }

    /// A `;` ends every declaration, except right before a closing `)` or `}`.
    fn expect_semi(&mut self) -> Result<(), Error> {
        match self.peek() {
            None => Ok(()),
            Some(tok) if matches!(tok.node, Token::Semi) => {
                self.pos += 1;
                Ok(())
            }
            Some(tok) if matches!(tok.node, Token::RParen | Token::RBrace) => Ok(()),
            Some(tok) => Err(Error::syntax(
                format!("expected ';', found {}", tok.node),
                tok.span,
            )),
        }
    }

    fn current_span(&self) -> Span {
        self.peek().map_or_else(|| self.eof_span(), |t| t.span)
    }

    fn prev_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or_else(|| self.eof_span(), |t| t.span)
    }

    fn eof_span(&self) -> Span {
        if let Some(last) = self.tokens.last() {
            Span::with_file(last.span.end, last.span.end, last.span.file_id)
        } else {
            Span::dummy()
        }
    }

    // ── File ─────────────────────────────────────────────────────────

    pub fn parse_source_file(&mut self) -> Result<SourceFile, Error> {
        self.expect(&Token::Package)?;
        let package = self.expect_ident()?;
        self.expect_semi()?;

        let mut imports = Vec::new();
        while self.eat(&Token::Import) {
            imports.extend(self.parse_group(Self::parse_import_spec)?);
            self.expect_semi()?;
        }

        let mut decls = Vec::new();
        while let Some(tok) = self.peek() {
            match tok.node {
                Token::Type => {
                    self.advance();
                    decls.push(Decl::Type(self.parse_group(Self::parse_type_spec)?));
                }
                Token::Var => {
                    self.advance();
                    decls.push(Decl::Var(self.parse_group(Self::parse_var_spec)?));
                }
                Token::Func | Token::Const => {
                    self.advance();
                    self.skip_to_decl_end()?;
                }
                Token::Import => {
                    return Err(Error::syntax(
                        "imports must appear before other declarations",
                        tok.span,
                    ));
                }
                Token::Semi => {
                    self.advance();
                    continue;
                }
                _ => {
                    return Err(Error::syntax(
                        format!("non-declaration statement outside function body: found {}", tok.node),
                        tok.span,
                    ));
                }
            }
            self.expect_semi()?;
        }

        Ok(SourceFile { package, imports, decls })
    }

    /// `spec` or `( spec; spec; ... )`
    fn parse_group<T>(&mut self, parse_spec: fn(&mut Self) -> Result<T, Error>) -> Result<Vec<T>, Error> {
        if !self.eat(&Token::LParen) {
            return Ok(vec![parse_spec(self)?]);
        }
        let mut specs = Vec::new();
        loop {
            if self.eat(&Token::RParen) {
                break;
            }
            if self.eat(&Token::Semi) {
                continue;
            }
            specs.push(parse_spec(self)?);
            if !self.at(&Token::RParen) {
                self.expect(&Token::Semi)?;
            }
        }
        Ok(specs)
    }

    /// Skip a declaration this parser does not model (`func`, `const`, or a
    /// `var` initializer), stopping before the `;` or closer that ends it.
    fn skip_to_decl_end(&mut self) -> Result<(), Error> {
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            match tok.node {
                Token::Semi if depth == 0 => return Ok(()),
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.advance();
        }
        if depth > 0 {
            return Err(Error::syntax("unexpected end of file in declaration", self.eof_span()));
        }
        Ok(())
    }

    fn parse_import_spec(&mut self) -> Result<Spanned<ImportSpec>, Error> {
        let start = self.current_span();
        let name = if self.at(&Token::Ident) {
            Some(self.expect_ident()?)
        } else if self.at(&Token::Dot) {
            let span = self.expect(&Token::Dot)?;
            Some(Spanned::new(".".to_string(), span))
        } else {
            None
        };
        let path = self.expect_string()?;
        if path.node.is_empty() {
            return Err(Error::syntax("invalid import path: empty string", path.span));
        }
        let span = start.to(path.span);
        Ok(Spanned::new(ImportSpec { name, path }, span))
    }

    fn parse_type_spec(&mut self) -> Result<Spanned<TypeSpec>, Error> {
        let name = self.expect_ident()?;
        let mut type_params = Vec::new();
        if self.at(&Token::LBracket) && self.bracket_opens_type_params() {
            self.advance();
            type_params = self.parse_param_list(&Token::RBracket, true)?;
            if type_params.is_empty() {
                return Err(Error::syntax("empty type parameter list", self.prev_span()));
            }
        }
        let is_alias = self.eat(&Token::Eq);
        let ty = self.parse_type()?;
        let span = name.span.to(ty.span);
        Ok(Spanned::new(TypeSpec { name, type_params, is_alias, ty }, span))
    }

    /// After `type Name`, decide whether `[` opens a type parameter list or an
    /// array length: `[T any]`, `[K, V any]`, `[T ~int]` versus `[N]T`.
    ///
    /// `[P *C]` and `[P (C)]` are ambiguous and read as the lengths `P * C`
    /// and `P(C)`, unless the operand can only be a type or a comma follows
    /// inside the brackets: `[P *[]int]`, `[P *C,]`.
    fn bracket_opens_type_params(&self) -> bool {
        if !matches!(self.peek_nth(1), Some(Token::Ident)) {
            return false;
        }
        match self.peek_nth(2) {
            Some(Token::Comma | Token::Tilde) => true,
            Some(Token::Star | Token::LParen) => {
                let type_only = matches!(
                    self.peek_nth(3),
                    Some(Token::LBracket | Token::Struct | Token::Func | Token::Interface | Token::Map | Token::Chan | Token::Arrow)
                );
                type_only || self.comma_before_close()
            }
            Some(tok) => tok.starts_type(),
            None => false,
        }
    }

    /// Whether a `,` appears at the top level of the bracket opened at the
    /// current token.
    fn comma_before_close(&self) -> bool {
        let mut depth = 0usize;
        let mut i = 0;
        while let Some(tok) = self.peek_nth(i) {
            match tok {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return false;
                    }
                }
                Token::Comma if depth == 1 => return true,
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn parse_var_spec(&mut self) -> Result<Spanned<VarSpec>, Error> {
        let first = self.expect_ident()?;
        let start = first.span;
        let mut names = vec![first];
        while self.eat(&Token::Comma) {
            names.push(self.expect_ident()?);
        }
        let ty = match self.peek() {
            Some(tok) if tok.node.starts_type() => Some(self.parse_type()?),
            _ => None,
        };
        if self.eat(&Token::Eq) {
            self.skip_to_decl_end()?;
        } else if ty.is_none() {
            return Err(Error::syntax("missing variable type or initialization", self.current_span()));
        }
        let span = start.to(self.prev_span());
        Ok(Spanned::new(VarSpec { names, ty }, span))
    }

    // ── Types ────────────────────────────────────────────────────────

    pub fn parse_type(&mut self) -> Result<Spanned<TypeExpr>, Error> {
        let Some(tok) = self.peek() else {
            return Err(Error::syntax("expected type, found end of file", self.eof_span()));
        };
        let start = tok.span;
        let node = match &tok.node {
            Token::Ident => return self.parse_type_name(),
            Token::Star => {
                self.advance();
                TypeExpr::Pointer(Box::new(self.parse_type()?))
            }
            Token::LBracket => {
                self.advance();
                if self.eat(&Token::RBracket) {
                    TypeExpr::Slice(Box::new(self.parse_type()?))
                } else if self.eat(&Token::Ellipsis) {
                    self.expect(&Token::RBracket)?;
                    TypeExpr::Array { len: None, elem: Box::new(self.parse_type()?) }
                } else {
                    let len = self.parse_expr()?;
                    self.expect(&Token::RBracket)?;
                    TypeExpr::Array { len: Some(len), elem: Box::new(self.parse_type()?) }
                }
            }
            Token::Map => {
                self.advance();
                self.expect(&Token::LBracket)?;
                let key = self.parse_type()?;
                self.expect(&Token::RBracket)?;
                let value = self.parse_type()?;
                TypeExpr::Map { key: Box::new(key), value: Box::new(value) }
            }
            Token::Chan => {
                self.advance();
                let dir = if self.eat(&Token::Arrow) { ChanDir::Send } else { ChanDir::Both };
                TypeExpr::Chan { dir, elem: Box::new(self.parse_type()?) }
            }
            Token::Arrow => {
                self.advance();
                self.expect(&Token::Chan)?;
                TypeExpr::Chan { dir: ChanDir::Recv, elem: Box::new(self.parse_type()?) }
            }
            Token::Func => {
                self.advance();
                TypeExpr::Func(self.parse_signature()?)
            }
            Token::Interface => TypeExpr::Interface(self.parse_interface()?),
            Token::Struct => TypeExpr::Struct(self.parse_struct()?),
            Token::LParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(&Token::RParen)?;
                TypeExpr::Paren(Box::new(inner))
            }
            other => {
                return Err(Error::syntax(format!("expected type, found {other}"), start));
            }
        };
        Ok(Spanned::new(node, start.to(self.prev_span())))
    }

    // ── Constant expressions ─────────────────────────────────────────

    /// Array length: a constant expression built from names, literals,
    /// operators, parentheses and calls.
    fn parse_expr(&mut self) -> Result<Expr, Error> {
        self.parse_binary_expr(1)
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Expr, Error> {
        let mut lhs = self.parse_unary_expr()?;
        while let Some(op) = self.peek().and_then(|t| binary_op(&t.node)) {
            let prec = precedence(op);
            if prec < min_prec {
                break;
            }
            self.advance();
            let rhs = self.parse_binary_expr(prec + 1)?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, Error> {
        let op = match self.peek().map(|t| &t.node) {
            Some(Token::Plus) => "+",
            Some(Token::Minus) => "-",
            Some(Token::Bang) => "!",
            Some(Token::Caret) => "^",
            _ => return self.parse_primary_expr(),
        };
        self.advance();
        let operand = self.parse_unary_expr()?;
        Ok(Expr::Unary { op, operand: Box::new(operand) })
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, Error> {
        let Some(tok) = self.advance() else {
            return Err(Error::syntax("expected expression, found end of file", self.eof_span()));
        };
        let mut expr = match &tok.node {
            Token::Ident => {
                let name = self.source[tok.span.start..tok.span.end].to_string();
                if self.eat(&Token::Dot) {
                    Expr::Selector { package: name, name: self.expect_ident()?.node }
                } else {
                    Expr::Ident(name)
                }
            }
            Token::Number | Token::Rune | Token::StringLit(_) | Token::RawStringLit(_) => {
                Expr::BasicLit(self.source[tok.span.start..tok.span.end].to_string())
            }
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Expr::Paren(Box::new(inner))
            }
            other => {
                return Err(Error::syntax(format!("expected expression, found {other}"), tok.span));
            }
        };
        while self.eat(&Token::LParen) {
            let mut args = Vec::new();
            loop {
                if self.eat(&Token::RParen) {
                    break;
                }
                args.push(self.parse_expr()?);
                if !self.eat(&Token::Comma) {
                    self.expect(&Token::RParen)?;
                    break;
                }
            }
            expr = Expr::Call { func: Box::new(expr), args };
        }
        Ok(expr)
    }

    /// `Name`, `pkg.Name`, optionally instantiated: `Name[A, B]`.
    fn parse_type_name(&mut self) -> Result<Spanned<TypeExpr>, Error> {
        let first = self.expect_ident()?;
        let start = first.span;
        let mut base = if self.eat(&Token::Dot) {
            let name = self.expect_ident()?;
            let span = start.to(name.span);
            Spanned::new(TypeExpr::Selector { package: first, name }, span)
        } else {
            Spanned::new(TypeExpr::Ident(first.node), first.span)
        };
        if self.eat(&Token::LBracket) {
            let mut args = Vec::new();
            loop {
                if self.eat(&Token::RBracket) {
                    break;
                }
                args.push(self.parse_type()?);
                if !self.eat(&Token::Comma) {
                    self.expect(&Token::RBracket)?;
                    break;
                }
            }
            if args.is_empty() {
                return Err(Error::syntax("expected type argument list", self.prev_span()));
            }
            let span = start.to(self.prev_span());
            base = Spanned::new(TypeExpr::Instance { base: Box::new(base), args }, span);
        }
        Ok(base)
    }

    /// A type-set term list as found in interfaces and constraints: `~int | string`.
    fn parse_constraint(&mut self) -> Result<Spanned<TypeExpr>, Error> {
        let first = self.parse_term()?;
        if !self.at(&Token::Pipe) {
            return Ok(first);
        }
        let start = first.span;
        let mut terms = vec![first];
        while self.eat(&Token::Pipe) {
            terms.push(self.parse_term()?);
        }
        Ok(Spanned::new(TypeExpr::Union(terms), start.to(self.prev_span())))
    }

    fn parse_term(&mut self) -> Result<Spanned<TypeExpr>, Error> {
        if self.at(&Token::Tilde) {
            let start = self.expect(&Token::Tilde)?;
            let inner = self.parse_type()?;
            let span = start.to(inner.span);
            return Ok(Spanned::new(TypeExpr::Tilde(Box::new(inner)), span));
        }
        self.parse_type()
    }

    /// Parameters and results following a method name or `func`.
    fn parse_signature(&mut self) -> Result<FuncType, Error> {
        self.expect(&Token::LParen)?;
        let params = self.parse_param_list(&Token::RParen, false)?;
        let results = if self.eat(&Token::LParen) {
            self.parse_param_list(&Token::RParen, false)?
        } else if self.peek().is_some_and(|t| t.node.starts_type()) {
            vec![ParamGroup { names: Vec::new(), ty: self.parse_type()? }]
        } else {
            Vec::new()
        };
        Ok(FuncType { params, results })
    }

    /// Parse entries up to and including `close`, then group them the way Go
    /// does: either every entry is a type, or every entry has a name and
    /// consecutive names share the next type.
    fn parse_param_list(&mut self, close: &Token, constraint: bool) -> Result<Vec<ParamGroup>, Error> {
        let mut entries = Vec::new();
        loop {
            if self.eat(close) {
                break;
            }
            entries.push(self.parse_param_entry(close, constraint)?);
            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                break;
            }
        }

        let mut groups = Vec::new();
        if entries.iter().any(|e| matches!(e, Entry::Named(..))) {
            let mut pending: Vec<Spanned<String>> = Vec::new();
            for entry in entries {
                match entry {
                    Entry::Name(name) => pending.push(name),
                    Entry::Named(name, ty) => {
                        pending.push(name);
                        groups.push(ParamGroup { names: std::mem::take(&mut pending), ty });
                    }
                    Entry::Type(ty) => {
                        return Err(Error::syntax("mixed named and unnamed parameters", ty.span));
                    }
                }
            }
            if let Some(name) = pending.first() {
                return Err(Error::syntax(format!("missing type for parameter {}", name.node), name.span));
            }
        } else {
            for entry in entries {
                let ty = match entry {
                    Entry::Name(name) => Spanned::new(TypeExpr::Ident(name.node), name.span),
                    Entry::Named(_, ty) | Entry::Type(ty) => ty,
                };
                groups.push(ParamGroup { names: Vec::new(), ty });
            }
        }
        Ok(groups)
    }

    fn parse_param_entry(&mut self, close: &Token, constraint: bool) -> Result<Entry, Error> {
        if !self.at(&Token::Ident) {
            return Ok(Entry::Type(self.parse_param_type(constraint)?));
        }
        match self.peek_nth(1) {
            Some(Token::Dot) => Ok(Entry::Type(self.parse_param_type(constraint)?)),
            Some(Token::Comma) => Ok(Entry::Name(self.expect_ident()?)),
            Some(tok) if same_kind(tok, close) => Ok(Entry::Name(self.expect_ident()?)),
            Some(Token::LBracket) if !self.bracket_follows_name(1) => {
                Ok(Entry::Type(self.parse_param_type(constraint)?))
            }
            Some(tok) if tok.starts_type() || matches!(tok, Token::Ellipsis | Token::Tilde) => {
                let name = self.expect_ident()?;
                let ty = self.parse_param_type(constraint)?;
                Ok(Entry::Named(name, ty))
            }
            _ => Ok(Entry::Type(self.parse_param_type(constraint)?)),
        }
    }

    fn parse_param_type(&mut self, constraint: bool) -> Result<Spanned<TypeExpr>, Error> {
        if self.at(&Token::Ellipsis) {
            let start = self.expect(&Token::Ellipsis)?;
            let elem = self.parse_type()?;
            let span = start.to(elem.span);
            return Ok(Spanned::new(TypeExpr::Ellipsis(Box::new(elem)), span));
        }
        if constraint {
            self.parse_constraint()
        } else {
            self.parse_type()
        }
    }

    /// With `[` at `offset`, decide whether it starts a slice/array type
    /// belonging to a preceding name (`p []byte`, `buf [4]byte`) rather than
    /// the type arguments of an instantiation (`List[int]`).
    fn bracket_follows_name(&self, offset: usize) -> bool {
        match self.peek_nth(offset + 1) {
            Some(Token::RBracket | Token::Ellipsis) => return true,
            None => return false,
            _ => {}
        }
        let mut depth = 0usize;
        let mut i = offset;
        while let Some(tok) = self.peek_nth(i) {
            match tok {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.peek_nth(i + 1).is_some_and(Token::starts_type);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn parse_interface(&mut self) -> Result<InterfaceType, Error> {
        self.expect(&Token::Interface)?;
        self.expect(&Token::LBrace)?;
        let mut elems = Vec::new();
        loop {
            if self.eat(&Token::RBrace) {
                break;
            }
            if self.eat(&Token::Semi) {
                continue;
            }
            let is_method = self.at(&Token::Ident) && matches!(self.peek_nth(1), Some(Token::LParen));
            if is_method {
                let name = self.expect_ident()?;
                let sig = self.parse_signature()?;
                elems.push(InterfaceElem::Method(MethodSpec { name, sig }));
            } else {
                elems.push(InterfaceElem::Embed(self.parse_constraint()?));
            }
            if !self.at(&Token::RBrace) {
                self.expect(&Token::Semi)?;
            }
        }
        Ok(InterfaceType { methods: Some(elems) })
    }

    fn parse_struct(&mut self) -> Result<StructType, Error> {
        self.expect(&Token::Struct)?;
        self.expect(&Token::LBrace)?;
        let mut fields = Vec::new();
        loop {
            if self.eat(&Token::RBrace) {
                break;
            }
            if self.eat(&Token::Semi) {
                continue;
            }
            fields.push(self.parse_field_decl()?);
            if !self.at(&Token::RBrace) {
                self.expect(&Token::Semi)?;
            }
        }
        Ok(StructType { fields })
    }

    fn parse_field_decl(&mut self) -> Result<FieldDecl, Error> {
        let embedded = match self.peek().map(|t| &t.node) {
            Some(Token::Star) => true,
            Some(Token::Ident) => match self.peek_nth(1) {
                Some(Token::Dot | Token::Semi | Token::RBrace | Token::StringLit(_) | Token::RawStringLit(_)) => true,
                Some(Token::LBracket) => !self.bracket_follows_name(1),
                _ => false,
            },
            _ => false,
        };

        let mut names = Vec::new();
        if !embedded {
            names.push(self.expect_ident()?);
            while self.eat(&Token::Comma) {
                names.push(self.expect_ident()?);
            }
        }
        let ty = self.parse_type()?;
        let tag = match self.peek().map(|t| &t.node) {
            Some(Token::StringLit(s) | Token::RawStringLit(s)) => {
                let tag = s.clone();
                self.advance();
                Some(tag)
            }
            _ => None,
        };
        Ok(FieldDecl { names, ty, tag })
    }
}

fn binary_op(tok: &Token) -> Option<&'static str> {
    Some(match tok {
        Token::Star => "*",
        Token::Slash => "/",
        Token::Percent => "%",
        Token::Shl => "<<",
        Token::Shr => ">>",
        Token::Amp => "&",
        Token::AmpCaret => "&^",
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Pipe => "|",
        Token::Caret => "^",
        Token::EqEq => "==",
        Token::BangEq => "!=",
        Token::Lt => "<",
        Token::LtEq => "<=",
        Token::Gt => ">",
        Token::GtEq => ">=",
        Token::AmpAmp => "&&",
        Token::PipePipe => "||",
        _ => return None,
    })
}

fn same_kind(a: &Token, b: &Token) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

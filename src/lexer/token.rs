use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // Keywords
    #[token("break")]
    Break,
    #[token("case")]
    Case,
    #[token("chan")]
    Chan,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("else")]
    Else,
    #[token("fallthrough")]
    Fallthrough,
    #[token("for")]
    For,
    #[token("func")]
    Func,
    #[token("go")]
    Go,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("package")]
    Package,
    #[token("range")]
    Range,
    #[token("return")]
    Return,
    #[token("select")]
    Select,
    #[token("struct")]
    Struct,
    #[token("switch")]
    Switch,
    #[token("type")]
    Type,
    #[token("var")]
    Var,

    // Literals. Numbers are only ever skipped, so one loose rule covers
    // decimal, hex, octal, binary, float and imaginary forms.
    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9A-Za-z_]*)?([eEpP][+-][0-9_]+)?i?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?i?")]
    Number,

    #[regex(r"'([^'\\\n]|\\[^\n]([^'\n])*)'")]
    Rune,

    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| unquote(lex.slice()))]
    StringLit(String),

    #[regex(r"`[^`]*`", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].replace('\r', "")
    })]
    RawStringLit(String),

    // Identifiers
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AmpCaret,
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    AssignOp,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("<-")]
    Arrow,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("==")]
    EqEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token(":=")]
    Define,
    #[token("...")]
    Ellipsis,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    // Dropped or rewritten to `;` by the lexer pass
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,
}

impl Token {
    /// Whether a newline directly after this token terminates the statement.
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            Token::Ident
                | Token::Number
                | Token::Rune
                | Token::StringLit(_)
                | Token::RawStringLit(_)
                | Token::Break
                | Token::Continue
                | Token::Fallthrough
                | Token::Return
                | Token::PlusPlus
                | Token::MinusMinus
                | Token::RParen
                | Token::RBracket
                | Token::RBrace
        )
    }

    /// Whether this token can begin a type expression.
    pub fn starts_type(&self) -> bool {
        matches!(
            self,
            Token::Ident
                | Token::Star
                | Token::LBracket
                | Token::LParen
                | Token::Func
                | Token::Map
                | Token::Chan
                | Token::Struct
                | Token::Interface
                | Token::Arrow
        )
    }
}

/// Decode an interpreted string literal, quotes included.
pub fn unquote(lit: &str) -> String {
    let raw = &lit[1..lit.len() - 1];
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('a') => result.push('\u{7}'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('v') => result.push('\u{b}'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Break => write!(f, "break"),
            Token::Case => write!(f, "case"),
            Token::Chan => write!(f, "chan"),
            Token::Const => write!(f, "const"),
            Token::Continue => write!(f, "continue"),
            Token::Default => write!(f, "default"),
            Token::Defer => write!(f, "defer"),
            Token::Else => write!(f, "else"),
            Token::Fallthrough => write!(f, "fallthrough"),
            Token::For => write!(f, "for"),
            Token::Func => write!(f, "func"),
            Token::Go => write!(f, "go"),
            Token::Goto => write!(f, "goto"),
            Token::If => write!(f, "if"),
            Token::Import => write!(f, "import"),
            Token::Interface => write!(f, "interface"),
            Token::Map => write!(f, "map"),
            Token::Package => write!(f, "package"),
            Token::Range => write!(f, "range"),
            Token::Return => write!(f, "return"),
            Token::Select => write!(f, "select"),
            Token::Struct => write!(f, "struct"),
            Token::Switch => write!(f, "switch"),
            Token::Type => write!(f, "type"),
            Token::Var => write!(f, "var"),
            Token::Number => write!(f, "number"),
            Token::Rune => write!(f, "rune literal"),
            Token::StringLit(s) => write!(f, "\"{s}\""),
            Token::RawStringLit(s) => write!(f, "`{s}`"),
            Token::Ident => write!(f, "identifier"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Amp => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Caret => write!(f, "^"),
            Token::Shl => write!(f, "<<"),
            Token::Shr => write!(f, ">>"),
            Token::AmpCaret => write!(f, "&^"),
            Token::AssignOp => write!(f, "assignment operator"),
            Token::AmpAmp => write!(f, "&&"),
            Token::PipePipe => write!(f, "||"),
            Token::Arrow => write!(f, "<-"),
            Token::PlusPlus => write!(f, "++"),
            Token::MinusMinus => write!(f, "--"),
            Token::EqEq => write!(f, "=="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Eq => write!(f, "="),
            Token::Bang => write!(f, "!"),
            Token::Tilde => write!(f, "~"),
            Token::BangEq => write!(f, "!="),
            Token::LtEq => write!(f, "<="),
            Token::GtEq => write!(f, ">="),
            Token::Define => write!(f, ":="),
            Token::Ellipsis => write!(f, "..."),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Semi => write!(f, "';'"),
            Token::Dot => write!(f, "."),
            Token::Colon => write!(f, ":"),
            Token::Newline => write!(f, "newline"),
            Token::LineComment | Token::BlockComment => write!(f, "comment"),
        }
    }
}

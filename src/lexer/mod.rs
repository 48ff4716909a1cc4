pub mod token;

use logos::Logos;
use crate::span::{Span, Spanned};
use crate::diagnostics::Error;
use token::Token;

/// Tokenize Go source, tagging spans with `file_id`. Comments are dropped and
/// line ends are turned into `;` tokens wherever Go's automatic semicolon
/// insertion would place one, so the token stream never contains `Newline`
/// or comment tokens.
pub fn lex_file(source: &str, file_id: u32) -> Result<Vec<Spanned<Token>>, Error> {
    let mut tokens: Vec<Spanned<Token>> = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let span = Span::with_file(span.start, span.end, file_id);
        match result {
            Ok(Token::LineComment) => {}
            Ok(Token::BlockComment) => {
                // A block comment spanning lines acts like a newline.
                if lexer.slice().contains('\n') {
                    insert_semi(&mut tokens, Span::with_file(span.start, span.start, file_id));
                }
            }
            Ok(Token::Newline) => {
                insert_semi(&mut tokens, span);
            }
            Ok(tok) => tokens.push(Spanned::new(tok, span)),
            Err(()) => {
                return Err(Error::syntax(
                    format!("unexpected character '{}'", &source[span.start..span.end]),
                    span,
                ));
            }
        }
    }

    let eof = Span::with_file(source.len(), source.len(), file_id);
    insert_semi(&mut tokens, eof);

    Ok(tokens)
}

fn insert_semi(tokens: &mut Vec<Spanned<Token>>, span: Span) {
    if tokens.last().is_some_and(|t| t.node.ends_statement()) {
        tokens.push(Spanned::new(Token::Semi, span));
    }
}

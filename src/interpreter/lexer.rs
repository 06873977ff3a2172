use logos::Logos;

/// Represents a lexical token in the expression text.
/// A token is a minimal but meaningful unit of text produced by the lexer.
///
/// The token set is deliberately wider than what the evaluator accepts:
/// strings, comparisons, keywords and brackets are recognized so that the
/// parser can build a tree for them and the validator can reject them by
/// name.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens in single or double quotes.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\.)*'", parse_string)]
    Str(String),
    /// Identifier tokens; names such as `pi` or `round`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `lambda`
    #[token("lambda")]
    Lambda,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `is`
    #[token("is")]
    Is,
    /// `not`
    #[token("not")]
    Not,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `/`
    #[token("/")]
    Slash,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `%`
    #[token("%")]
    Percent,
    /// `@`
    #[token("@")]
    At,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `:=`
    #[token(":=")]
    Walrus,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
}

impl Token {
    /// Returns `true` for tokens that open a bracketed group.
    #[must_use]
    pub const fn opens_group(&self) -> bool {
        matches!(self, Self::LParen | Self::LBracket | Self::LBrace)
    }

    /// Returns `true` for tokens that close a bracketed group.
    #[must_use]
    pub const fn closes_group(&self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::RBrace)
    }

    /// Returns the fixed spelling of operator, keyword and bracket tokens.
    ///
    /// Literal and identifier tokens have no fixed spelling and yield `None`.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        let text = match self {
            Self::Real(_) | Self::Integer(_) | Self::Str(_) | Self::Identifier(_) => return None,
            Self::Lambda => "lambda",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::In => "in",
            Self::Is => "is",
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::DoubleStar => "**",
            Self::Slash => "/",
            Self::DoubleSlash => "//",
            Self::Percent => "%",
            Self::At => "@",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Tilde => "~",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equals => "=",
            Self::Walrus => ":=",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Dot => ".",
        };
        Some(text)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "string '{s}'"),
            Self::Identifier(name) => write!(f, "{name}"),
            other => write!(f, "'{}'", other.symbol().unwrap_or_default()),
        }
    }
}

/// Parses a floating-point literal from the current token slice.
///
/// Literals that overflow to infinity are refused so that every `Real`
/// token carries a finite value.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice()
       .parse::<f64>()
       .ok()
       .filter(|value| value.is_finite())
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None` when the literal does not fit in an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a string literal. Escapes are kept verbatim since
/// string values never reach evaluation.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|t| t.expect("lexing failed")).collect()
    }

    #[test]
    fn numbers_split_into_integer_and_real() {
        assert_eq!(lex("42 3.5 .5 2. 1e3"),
                   vec![Token::Integer(42),
                        Token::Real(3.5),
                        Token::Real(0.5),
                        Token::Real(2.0),
                        Token::Real(1000.0)]);
    }

    #[test]
    fn multi_character_operators_win_over_prefixes() {
        assert_eq!(lex("2**3//4 << 1"),
                   vec![Token::Integer(2),
                        Token::DoubleStar,
                        Token::Integer(3),
                        Token::DoubleSlash,
                        Token::Integer(4),
                        Token::ShiftLeft,
                        Token::Integer(1)]);
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(lex("lambda x: not x"),
                   vec![Token::Lambda,
                        Token::Identifier("x".to_string()),
                        Token::Colon,
                        Token::Not,
                        Token::Identifier("x".to_string())]);
        assert_eq!(lex("iffy"), vec![Token::Identifier("iffy".to_string())]);
    }

    #[test]
    fn strings_lose_their_quotes() {
        assert_eq!(lex("'os' \"sys\""),
                   vec![Token::Str("os".to_string()), Token::Str("sys".to_string())]);
    }

    #[test]
    fn oversized_literals_are_lex_errors() {
        assert!(Token::lexer("99999999999999999999").any(|t| t.is_err()));
        assert!(Token::lexer("1e400").any(|t| t.is_err()));
    }

    #[test]
    fn unknown_characters_are_lex_errors() {
        assert!(Token::lexer("1 $ 2").any(|t| t.is_err()));
    }
}

use std::iter::Peekable;

use logos::Logos;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or,
            utils::{expect_token, parse_identifier, starts_expression},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum number of tokens in one expression.
pub const MAX_TOKENS: usize = 512;

/// Maximum nesting of brackets, lambdas and conditional expressions.
pub const MAX_NESTING: usize = 32;

/// Parses an expression text into a syntax tree.
///
/// The grammar is wider than what the evaluator accepts, so that constructs
/// like `os.system('x')` parse successfully and are rejected by name later.
///
/// # Parameters
/// - `source`: The expression text.
///
/// # Returns
/// The root of the syntax tree.
///
/// # Errors
/// - `EmptyExpression` for empty or whitespace-only text.
/// - `InvalidCharacter` or `LiteralTooLarge` for lexing failures.
/// - `TooManyTokens` or `NestingTooDeep` when a limit is exceeded.
/// - `UnexpectedToken`, `ExpectedClosing`, `UnexpectedEndOfInput` or
///   `UnexpectedTrailingTokens` for malformed text.
///
/// # Example
/// ```
/// use calcguard::{ast::Expr, interpreter::parser::core::parse};
///
/// let tree = parse("round(2.5)").unwrap();
/// assert!(matches!(tree, Expr::Call { .. }));
///
/// assert!(parse("   ").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    check_limits(&tokens)?;

    let end = source.chars().count() + 1;
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression_list(&mut iter).map_err(|e| match e {
                                                    ParseError::UnexpectedEndOfInput { .. } => {
                                                        ParseError::UnexpectedEndOfInput { column: end }
                                                    },
                                                    other => other,
                                                })?;

    if let Some((token, column)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token:  token.to_string(),
                                                          column: *column, });
    }

    Ok(expr)
}

/// Splits the source into tokens paired with their 1-based column.
///
/// Columns count characters, not bytes.
///
/// # Errors
/// `LiteralTooLarge` when a numeric literal does not fit its type,
/// `InvalidCharacter` for any other text the lexer does not recognize.
fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let (mut offset, mut column) = (0, 1);

    while let Some(token) = lexer.next() {
        let start = lexer.span().start;
        column += source[offset..start].chars().count();
        offset = start;
        match token {
            Ok(token) => tokens.push((token, column)),
            Err(()) => {
                let text = lexer.slice();
                if text.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                    return Err(ParseError::LiteralTooLarge { column });
                }
                return Err(ParseError::InvalidCharacter { text: text.to_string(),
                                                          column });
            },
        }
    }

    Ok(tokens)
}

/// Rejects token streams that are too long or too deeply nested.
///
/// Brackets, `lambda` and `if` each open a level of recursion in the parser.
/// Bracket levels close again; `lambda` and `if` levels are counted for the
/// whole expression.
fn check_limits(tokens: &[(Token, usize)]) -> ParseResult<()> {
    if tokens.len() > MAX_TOKENS {
        return Err(ParseError::TooManyTokens { limit: MAX_TOKENS });
    }

    let mut brackets = 0usize;
    let mut keywords = 0usize;
    for (token, column) in tokens {
        if token.opens_group() {
            brackets += 1;
        } else if token.closes_group() {
            brackets = brackets.saturating_sub(1);
        } else if matches!(token, Token::Lambda | Token::If) {
            keywords += 1;
        }

        if brackets + keywords > MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit:  MAX_NESTING,
                                                    column: *column, });
        }
    }

    Ok(())
}

/// Parses a comma-separated list of expressions.
///
/// A single expression without a comma is returned as-is; otherwise the
/// elements form an `Expr::Tuple`. A trailing comma is allowed.
///
/// Grammar: `expression_list := expression ("," expression)* ","?`
pub fn parse_expression_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_expression(tokens)?;
    if !matches!(tokens.peek(), Some((Token::Comma, _))) {
        return Ok(first);
    }

    let column = first.column();
    let mut elements = vec![first];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        match tokens.peek() {
            Some((token, _)) if starts_expression(token) => elements.push(parse_expression(tokens)?),
            _ => break,
        }
    }

    Ok(Expr::Tuple { elements, column })
}

/// Parses a full expression.
///
/// This is the entry point for a single expression. It dispatches to lambdas
/// and assignment expressions, and otherwise begins at the conditional
/// expression level, from which parsing descends through the precedence
/// hierarchy.
///
/// Grammar:
/// ```text
///     expression := lambda
///                 | IDENTIFIER ":=" expression
///                 | conditional
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, column)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if is_named_expression(tokens) {
        let column = tokens.peek().map_or(0, |(_, column)| *column);
        let target = parse_identifier(tokens)?;
        tokens.next();
        let value = parse_expression(tokens)?;
        return Ok(Expr::NamedExpr { target,
                                    value: Box::new(value),
                                    column });
    }

    match tokens.peek() {
        Some((Token::Lambda, column)) => {
            tokens.next();
            parse_lambda(tokens, *column)
        },
        _ => parse_conditional(tokens),
    }
}

/// Looks ahead for `IDENTIFIER ":="` without consuming anything.
fn is_named_expression<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut ahead = tokens.clone();
    matches!(ahead.next(), Some((Token::Identifier(_), _)))
    && matches!(ahead.next(), Some((Token::Walrus, _)))
}

/// Parses a conditional expression `body if condition else otherwise`.
///
/// The `else` branch is a full expression, so conditionals chain to the
/// right.
///
/// Grammar: `conditional := logical_or ("if" logical_or "else" expression)?`
///
/// # Errors
/// - `UnexpectedToken` if `else` is missing.
pub fn parse_conditional<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let body = parse_logical_or(tokens)?;

    let Some((Token::If, _)) = tokens.peek() else {
        return Ok(body);
    };
    tokens.next();

    let condition = parse_logical_or(tokens)?;
    expect_token(tokens, &Token::Else)?;
    let else_branch = parse_expression(tokens)?;

    let column = body.column();
    Ok(Expr::Conditional { condition: Box::new(condition),
                           then_branch: Box::new(body),
                           else_branch: Box::new(else_branch),
                           column })
}

/// Parses a lambda after its keyword.
///
/// Parameters may carry defaults; a bare `lambda: body` has none.
///
/// Grammar:
/// ```text
///     lambda := "lambda" (param ("," param)*)? ":" expression
///     param  := IDENTIFIER ("=" expression)?
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned after `lambda`.
/// - `column`: Column of the `lambda` keyword.
pub fn parse_lambda<'a, I>(tokens: &mut Peekable<I>, column: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();
    let mut defaults = Vec::new();

    while !matches!(tokens.peek(), Some((Token::Colon, _))) {
        params.push(parse_identifier(tokens)?);

        if let Some((Token::Equals, _)) = tokens.peek() {
            tokens.next();
            defaults.push(parse_expression(tokens)?);
        }

        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            _ => break,
        }
    }

    expect_token(tokens, &Token::Colon)?;
    let body = parse_expression(tokens)?;

    Ok(Expr::Lambda { params,
                      defaults,
                      body: Box::new(body),
                      column })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, ComprehensionKind, LiteralValue, NodeKind, UnaryOperator};

    fn kind_of(source: &str) -> NodeKind {
        parse(source).expect("parse failed").kind()
    }

    fn int(value: i64, column: usize) -> Expr {
        Expr::Literal { value: LiteralValue::Integer(value),
                        column }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let tree = parse("1 + 2 * 3").unwrap();
        let expected = Expr::BinaryOp { left:   Box::new(int(1, 1)),
                                        op:     BinaryOperator::Add,
                                        right:  Box::new(Expr::BinaryOp { left:   Box::new(int(2, 5)),
                                                                          op:     BinaryOperator::Mul,
                                                                          right:  Box::new(int(3, 9)),
                                                                          column: 7, }),
                                        column: 3, };
        assert_eq!(tree, expected);
    }

    #[test]
    fn power_is_right_associative_and_binds_looser_than_unary_minus() {
        let Expr::BinaryOp { left, op, right, .. } = parse("-2 ** 3 ** 2").unwrap() else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Pow);
        assert_eq!(left.kind(), NodeKind::UnaryOp(UnaryOperator::Minus));
        assert_eq!(right.kind(), NodeKind::BinaryOp(BinaryOperator::Pow));
    }

    #[test]
    fn disallowed_constructs_still_parse() {
        assert_eq!(kind_of("os.system('x')"), NodeKind::Call);
        assert_eq!(kind_of("a[1:2]"), NodeKind::Subscript);
        assert_eq!(kind_of("lambda x, y=2: x"), NodeKind::Lambda);
        assert_eq!(kind_of("(y := 3)"), NodeKind::NamedExpr);
        assert_eq!(kind_of("1 if 2 else 3"), NodeKind::Conditional);
        assert_eq!(kind_of("1 < 2 <= 3"), NodeKind::Compare);
        assert_eq!(kind_of("1 not in 2"), NodeKind::Compare);
        assert_eq!(kind_of("a or b and c"), NodeKind::BoolOp);
        assert_eq!(kind_of("not 1"), NodeKind::UnaryOp(UnaryOperator::Not));
        assert_eq!(kind_of("1 << 2"), NodeKind::BinaryOp(BinaryOperator::LShift));
        assert_eq!(kind_of("{1: 2}"), NodeKind::Dict);
        assert_eq!(kind_of("{1, 2}"), NodeKind::Set);
        assert_eq!(kind_of("[]"), NodeKind::List);
        assert_eq!(kind_of("()"), NodeKind::Tuple);
        assert_eq!(kind_of("1, 2"), NodeKind::Tuple);
    }

    #[test]
    fn comprehensions_record_their_display() {
        let cases = [("[x for x in y if x]", ComprehensionKind::List),
                     ("{x for x in y}", ComprehensionKind::Set),
                     ("{k: v for k, v in y}", ComprehensionKind::Dict),
                     ("(x for x in y)", ComprehensionKind::Generator)];
        for (source, expected) in cases {
            let Expr::Comprehension { kind, .. } = parse(source).unwrap() else {
                panic!("{source} did not parse as a comprehension");
            };
            assert_eq!(kind, expected, "{source}");
        }
    }

    #[test]
    fn call_arguments_keep_their_shape() {
        let Expr::Call { arguments, .. } = parse("f(1, *a, b=2, **c)").unwrap() else {
            panic!("expected a call");
        };
        let kinds: Vec<NodeKind> = arguments.iter().map(Expr::kind).collect();
        assert_eq!(kinds,
                   vec![NodeKind::Number, NodeKind::Starred, NodeKind::Keyword, NodeKind::Keyword]);

        assert_eq!(kind_of("sum(x for x in y)"), NodeKind::Call);
        assert_eq!(kind_of("max(1, 2,)"), NodeKind::Call);
    }

    #[test]
    fn empty_and_whitespace_input_is_rejected() {
        assert_eq!(parse(""), Err(ParseError::EmptyExpression));
        assert_eq!(parse(" \t\n"), Err(ParseError::EmptyExpression));
    }

    #[test]
    fn malformed_input_reports_a_column() {
        assert_eq!(parse("1 +"), Err(ParseError::UnexpectedEndOfInput { column: 4 }));
        assert_eq!(parse("(1 2)"),
                   Err(ParseError::ExpectedClosing { expected: ")",
                                                     column:   4, }));
        assert_eq!(parse("x = 1"),
                   Err(ParseError::UnexpectedTrailingTokens { token:  "'='".to_string(),
                                                              column: 3, }));
        assert_eq!(parse("1 $ 2"),
                   Err(ParseError::InvalidCharacter { text:   "$".to_string(),
                                                      column: 3, }));
        assert_eq!(parse("123456789012345678901234567890"),
                   Err(ParseError::LiteralTooLarge { column: 1 }));
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        assert_eq!(parse("'é' + $"),
                   Err(ParseError::InvalidCharacter { text:   "$".to_string(),
                                                      column: 7, }));
        assert_eq!(parse("'π' * (1"), Err(ParseError::UnexpectedEndOfInput { column: 9 }));
        assert_eq!(parse("'日本' 2"),
                   Err(ParseError::UnexpectedTrailingTokens { token:  "2".to_string(),
                                                              column: 6, }));
    }

    #[test]
    fn limits_are_enforced() {
        let long = vec!["1"; MAX_TOKENS].join("+");
        assert_eq!(parse(&long), Err(ParseError::TooManyTokens { limit: MAX_TOKENS }));

        let deep = format!("{}1{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert!(matches!(parse(&deep), Err(ParseError::NestingTooDeep { .. })));

        let fine = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse(&fine), Ok(int(1, MAX_NESTING + 1)));
    }
}

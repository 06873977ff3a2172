use std::iter::Peekable;

use crate::{
    ast::{ComprehensionKind, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_bitwise_or,
            core::{ParseResult, parse_expression},
            utils::{expect_token, parse_comma_separated, parse_generators, parse_identifier},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `+` (identity)
/// - `-` (numeric negation)
/// - `~` (bitwise inversion)
///
/// Unary operators are right-associative, so an input like `-+x` is parsed as
/// `-(+x)`. They bind tighter than `**`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("+" | "-" | "~") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression possibly followed by postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        Some((Token::Minus, _)) => UnaryOperator::Minus,
        Some((Token::Tilde, _)) => UnaryOperator::Invert,
        _ => {
            let primary = parse_primary(tokens)?;
            return parse_postfix(tokens, primary);
        },
    };

    let column = tokens.next().map_or(0, |(_, column)| *column);
    let expr = parse_unary(tokens)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       column })
}

/// Parses postfix operations applied to a primary expression.
///
/// Handles, in any order and repetition:
/// - calls: `f(...)`
/// - subscripts and slices: `a[i]`, `a[i:j:k]`
/// - attribute access: `a.b`
///
/// Grammar:
/// ```text
///     postfix := "(" arguments ")" | "[" subscript "]" | "." IDENTIFIER
/// ```
///
/// # Parameters
/// - `tokens`: Token stream after the primary expression.
/// - `node`: The expression the postfixes apply to.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::LParen, _)) => {
                tokens.next();
                let column = node.column();
                let arguments = parse_comma_separated(tokens, parse_argument, &Token::RParen)?;
                node = Expr::Call { function: Box::new(node),
                                    arguments,
                                    column };
            },
            Some((Token::LBracket, _)) => {
                tokens.next();
                let column = node.column();
                let index = parse_subscript(tokens)?;
                expect_token(tokens, &Token::RBracket)?;
                node = Expr::Subscript { object: Box::new(node),
                                         index: Box::new(index),
                                         column };
            },
            Some((Token::Dot, _)) => {
                tokens.next();
                let column = node.column();
                let attribute = parse_identifier(tokens)?;
                node = Expr::Attribute { object: Box::new(node),
                                         attribute,
                                         column };
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses one call argument.
///
/// Grammar:
/// ```text
///     argument := "*" bitwise_or
///               | "**" expression
///               | IDENTIFIER "=" expression
///               | expression generators?
/// ```
/// `**mapping` becomes an `Expr::Keyword` without a name. A generator
/// expression may appear without its own parentheses.
fn parse_argument<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if is_keyword_argument(tokens) {
        let column = tokens.peek().map_or(0, |(_, column)| *column);
        let name = parse_identifier(tokens)?;
        tokens.next();
        let value = parse_expression(tokens)?;
        return Ok(Expr::Keyword { name: Some(name),
                                  value: Box::new(value),
                                  column });
    }

    match tokens.peek() {
        Some((Token::Star, column)) => {
            tokens.next();
            let expr = parse_bitwise_or(tokens)?;
            return Ok(Expr::Starred { expr: Box::new(expr),
                                      column: *column });
        },
        Some((Token::DoubleStar, column)) => {
            tokens.next();
            let value = parse_expression(tokens)?;
            return Ok(Expr::Keyword { name: None,
                                      value: Box::new(value),
                                      column: *column });
        },
        _ => {},
    }

    let expr = parse_expression(tokens)?;
    parse_comprehension_tail(tokens, ComprehensionKind::Generator, expr, None)
}

fn is_keyword_argument<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut ahead = tokens.clone();
    matches!(ahead.next(), Some((Token::Identifier(_), _)))
    && matches!(ahead.next(), Some((Token::Equals, _)))
}

/// Parses the inside of `[...]` after a subscripted expression.
///
/// Grammar:
/// ```text
///     subscript := expression
///                | expression? ":" expression? (":" expression?)?
/// ```
fn parse_subscript<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let column = tokens.peek().map_or(0, |(_, column)| *column);

    let lower = match tokens.peek() {
        Some((Token::Colon, _)) => None,
        _ => Some(parse_expression(tokens)?),
    };

    let Some((Token::Colon, _)) = tokens.peek() else {
        return lower.ok_or(ParseError::UnexpectedEndOfInput { column: 0 });
    };
    tokens.next();

    let upper = parse_slice_bound(tokens)?;
    let step = match tokens.peek() {
        Some((Token::Colon, _)) => {
            tokens.next();
            parse_slice_bound(tokens)?
        },
        _ => None,
    };

    Ok(Expr::Slice { lower: lower.map(Box::new),
                     upper: upper.map(Box::new),
                     step: step.map(Box::new),
                     column })
}

fn parse_slice_bound<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Colon | Token::RBracket, _)) => Ok(None),
        _ => parse_expression(tokens).map(Some),
    }
}

/// Parses a primary expression.
///
/// Grammar:
/// ```text
///     primary := INTEGER | REAL | STRING | IDENTIFIER
///              | "(" ... ")" | "[" ... "]" | "{" ... "}"
/// ```
///
/// Keywords such as `True` or `None` are ordinary identifiers here; whether a
/// name means anything is decided after parsing.
///
/// # Errors
/// - `UnexpectedToken` for tokens that cannot start an expression.
/// - `UnexpectedEndOfInput` when no token is left.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(n), column)) => Ok(Expr::Literal { value:  LiteralValue::Integer(*n),
                                                                column: *column, }),
        Some((Token::Real(r), column)) => Ok(Expr::Literal { value:  LiteralValue::Real(*r),
                                                             column: *column, }),
        Some((Token::Str(s), column)) => Ok(Expr::Str { value:  s.clone(),
                                                        column: *column, }),
        Some((Token::Identifier(name), column)) => Ok(Expr::Name { name:   name.clone(),
                                                                   column: *column, }),
        Some((Token::LParen, column)) => parse_parenthesized(tokens, *column),
        Some((Token::LBracket, column)) => parse_list_display(tokens, *column),
        Some((Token::LBrace, column)) => parse_brace_display(tokens, *column),
        Some((tok, column)) => Err(ParseError::UnexpectedToken { token:  tok.to_string(),
                                                                 column: *column, }),
        None => Err(ParseError::UnexpectedEndOfInput { column: 0 }),
    }
}

/// Parses an element of a display, which may be starred.
fn parse_element<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Star, column)) = tokens.peek() {
        tokens.next();
        let expr = parse_bitwise_or(tokens)?;
        return Ok(Expr::Starred { expr: Box::new(expr),
                                  column: *column });
    }
    parse_expression(tokens)
}

/// Parses what follows `(`: a grouping, a tuple or a generator expression.
///
/// `()` is the empty tuple and `(x,)` a one-element tuple; `(x)` is just `x`.
fn parse_parenthesized<'a, I>(tokens: &mut Peekable<I>, column: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::Tuple { elements: Vec::new(),
                                column });
    }

    let first = parse_element(tokens)?;
    match tokens.peek() {
        Some((Token::For, _)) => {
            let comprehension =
                parse_comprehension_tail(tokens, ComprehensionKind::Generator, first, None)?;
            expect_token(tokens, &Token::RParen)?;
            Ok(comprehension)
        },
        Some((Token::Comma, _)) => {
            tokens.next();
            let mut elements = vec![first];
            elements.extend(parse_comma_separated(tokens, parse_element, &Token::RParen)?);
            Ok(Expr::Tuple { elements, column })
        },
        _ => {
            expect_token(tokens, &Token::RParen)?;
            Ok(first)
        },
    }
}

/// Parses what follows `[`: a list display or a list comprehension.
fn parse_list_display<'a, I>(tokens: &mut Peekable<I>, column: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::RBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::List { elements: Vec::new(),
                               column });
    }

    let first = parse_element(tokens)?;
    if let Some((Token::For, _)) = tokens.peek() {
        let mut comprehension =
            parse_comprehension_tail(tokens, ComprehensionKind::List, first, None)?;
        set_column(&mut comprehension, column);
        expect_token(tokens, &Token::RBracket)?;
        return Ok(comprehension);
    }

    let elements = continue_display(tokens, first, &Token::RBracket)?;
    Ok(Expr::List { elements, column })
}

/// Parses what follows `{`: a set, a dict, or a set or dict comprehension.
///
/// `{}` is an empty dict.
fn parse_brace_display<'a, I>(tokens: &mut Peekable<I>, column: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::RBrace, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::Dict { keys: Vec::new(),
                               values: Vec::new(),
                               column });
    }

    let first = parse_element(tokens)?;

    if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        let value = parse_expression(tokens)?;

        if let Some((Token::For, _)) = tokens.peek() {
            let mut comprehension =
                parse_comprehension_tail(tokens, ComprehensionKind::Dict, first, Some(value))?;
            set_column(&mut comprehension, column);
            expect_token(tokens, &Token::RBrace)?;
            return Ok(comprehension);
        }

        let mut keys = vec![first];
        let mut values = vec![value];
        if let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            let pairs = parse_comma_separated(tokens, parse_dict_pair, &Token::RBrace)?;
            for (key, value) in pairs {
                keys.push(key);
                values.push(value);
            }
        } else {
            expect_token(tokens, &Token::RBrace)?;
        }
        return Ok(Expr::Dict { keys,
                               values,
                               column });
    }

    if let Some((Token::For, _)) = tokens.peek() {
        let mut comprehension = parse_comprehension_tail(tokens, ComprehensionKind::Set, first, None)?;
        set_column(&mut comprehension, column);
        expect_token(tokens, &Token::RBrace)?;
        return Ok(comprehension);
    }

    let elements = continue_display(tokens, first, &Token::RBrace)?;
    Ok(Expr::Set { elements, column })
}

fn parse_dict_pair<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Expr, Expr)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let key = parse_expression(tokens)?;
    expect_token(tokens, &Token::Colon)?;
    let value = parse_expression(tokens)?;
    Ok((key, value))
}

/// Collects the remaining elements of a display whose first element has
/// already been parsed, up to and including `closing`.
fn continue_display<'a, I>(tokens: &mut Peekable<I>,
                           first: Expr,
                           closing: &Token)
                           -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut elements = vec![first];
    if let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        elements.extend(parse_comma_separated(tokens, parse_element, closing)?);
    } else {
        expect_token(tokens, closing)?;
    }
    Ok(elements)
}

/// Wraps `element` into a comprehension if `for` clauses follow; otherwise
/// returns it unchanged.
fn parse_comprehension_tail<'a, I>(tokens: &mut Peekable<I>,
                                   kind: ComprehensionKind,
                                   element: Expr,
                                   value: Option<Expr>)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if !matches!(tokens.peek(), Some((Token::For, _))) {
        return Ok(element);
    }

    let column = element.column();
    let generators = parse_generators(tokens)?;
    Ok(Expr::Comprehension { kind,
                             element: Box::new(element),
                             value: value.map(Box::new),
                             generators,
                             column })
}

/// Moves the column of a comprehension to its opening bracket.
fn set_column(expr: &mut Expr, bracket: usize) {
    if let Expr::Comprehension { column, .. } = expr {
        *column = bracket;
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Expr, NodeKind, UnaryOperator},
        interpreter::parser::core::parse,
    };

    #[test]
    fn unary_operators_nest() {
        let Expr::UnaryOp { op, expr, column } = parse("-+~1").unwrap() else {
            panic!("expected a unary operation");
        };
        assert_eq!((op, column), (UnaryOperator::Minus, 1));
        assert_eq!(expr.kind(), NodeKind::UnaryOp(UnaryOperator::Plus));
    }

    #[test]
    fn postfix_operations_chain_left_to_right() {
        let Expr::Call { function, .. } = parse("a.b[0](1)").unwrap() else {
            panic!("expected a call");
        };
        let Expr::Subscript { object, .. } = *function else {
            panic!("expected a subscript");
        };
        assert_eq!(object.kind(), NodeKind::Attribute);
    }

    #[test]
    fn slices_allow_missing_bounds() {
        for source in ["a[:]", "a[1:]", "a[:2]", "a[::3]", "a[1:2:3]"] {
            let Expr::Subscript { index, .. } = parse(source).unwrap() else {
                panic!("{source} did not parse as a subscript");
            };
            assert_eq!(index.kind(), NodeKind::Slice, "{source}");
        }
    }

    #[test]
    fn parentheses_group_without_a_node() {
        assert_eq!(parse("((7))").unwrap().kind(), NodeKind::Number);
        assert_eq!(parse("(7,)").unwrap().kind(), NodeKind::Tuple);
    }

    #[test]
    fn keywords_like_true_and_none_are_plain_names() {
        assert_eq!(parse("True").unwrap().kind(), NodeKind::Name);
        assert_eq!(parse("None").unwrap().kind(), NodeKind::Name);
    }

    #[test]
    fn unbalanced_brackets_are_errors() {
        assert!(parse("(1 + 2").is_err());
        assert!(parse("[1, 2").is_err());
        assert!(parse("{1: }").is_err());
        assert!(parse("a[]").is_err());
        assert!(parse("1)").is_err());
    }
}

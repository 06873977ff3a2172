use std::iter::Peekable;

use crate::{
    ast::{Expr, Generator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_bitwise_or, parse_logical_or},
            core::ParseResult,
        },
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by call argument lists and the bracketed displays. It repeatedly
/// calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list, and a
/// comma directly before the closing token is accepted.
///
/// Grammar (simplified): `list := item ("," item)* ","?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - something other than a comma or the closing token follows an item,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
                if let Some((tok, _)) = tokens.peek()
                   && tok == closing
                {
                    tokens.next();
                    break;
                }
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((_, column)) => {
                return Err(ParseError::ExpectedClosing { expected: closing.symbol().unwrap_or_default(),
                                                         column:   *column, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { column: 0 }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// A `String` containing the identifier.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, column)) => {
            Err(ParseError::UnexpectedToken { token:  format!("{tok} (expected a name)"),
                                              column: *column, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { column: 0 }),
    }
}

/// Consumes the next token, which must equal `expected`, and returns its
/// column.
///
/// # Errors
/// `ExpectedClosing` when `expected` is a closing bracket, `UnexpectedToken`
/// for any other mismatch, and `UnexpectedEndOfInput` when the stream is
/// exhausted.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          expected: &Token)
                                                          -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, column)) if tok == expected => Ok(*column),
        Some((_, column)) if expected.closes_group() => {
            Err(ParseError::ExpectedClosing { expected: expected.symbol().unwrap_or_default(),
                                              column:   *column, })
        },
        Some((tok, column)) => {
            Err(ParseError::UnexpectedToken { token:  format!("{tok} (expected {expected})"),
                                              column: *column, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { column: 0 }),
    }
}

/// Returns `true` if `token` can begin an expression.
pub(in crate::interpreter::parser) const fn starts_expression(token: &Token) -> bool {
    matches!(token,
             Token::Real(_)
             | Token::Integer(_)
             | Token::Str(_)
             | Token::Identifier(_)
             | Token::Lambda
             | Token::Not
             | Token::Plus
             | Token::Minus
             | Token::Tilde
             | Token::LParen
             | Token::LBracket
             | Token::LBrace)
}

/// Parses the `for ... in ... if ...` clauses of a comprehension.
///
/// Targets are parsed at the bitwise-or level so that `in` ends them; a
/// comma-separated target becomes a tuple. The iterable and each condition
/// are parsed at the `or` level so that a following `if` or `for` starts the
/// next clause.
///
/// Grammar:
/// ```text
///     generators := ("for" target "in" logical_or ("if" logical_or)*)+
///     target     := bitwise_or ("," bitwise_or)*
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first `for`.
pub(in crate::interpreter::parser) fn parse_generators<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<Vec<Generator>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut generators = Vec::new();

    while let Some((Token::For, _)) = tokens.peek() {
        tokens.next();

        let target = parse_target(tokens)?;
        expect_token(tokens, &Token::In)?;
        let iter = parse_logical_or(tokens)?;

        let mut conditions = Vec::new();
        while let Some((Token::If, _)) = tokens.peek() {
            tokens.next();
            conditions.push(parse_logical_or(tokens)?);
        }

        generators.push(Generator { target,
                                    iter,
                                    conditions });
    }

    Ok(generators)
}

fn parse_target<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_bitwise_or(tokens)?;
    if !matches!(tokens.peek(), Some((Token::Comma, _))) {
        return Ok(first);
    }

    let column = first.column();
    let mut elements = vec![first];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        if matches!(tokens.peek(), Some((Token::In, _))) {
            break;
        }
        elements.push(parse_bitwise_or(tokens)?);
    }

    Ok(Expr::Tuple { elements, column })
}

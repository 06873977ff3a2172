use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, BoolOperator, CompareOperator, Expr, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses logical OR expressions.
///
/// Operands of a chain of `or` are collected into one `Expr::BoolOp`.
///
/// Grammar: `logical_or := logical_and ("or" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, column)` pairs.
///
/// # Returns
/// The operand itself, or an `Expr::BoolOp` with `BoolOperator::Or`.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_bool_chain(tokens, &Token::Or, BoolOperator::Or, parse_logical_and)
}

/// Parses logical AND expressions.
///
/// Grammar: `logical_and := logical_not ("and" logical_not)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_bool_chain(tokens, &Token::And, BoolOperator::And, parse_logical_not)
}

fn parse_bool_chain<'a, I>(tokens: &mut Peekable<I>,
                           keyword: &Token,
                           op: BoolOperator,
                           parse_operand: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_operand(tokens)?;
    let column = first.column();
    let mut values = vec![first];

    while let Some((tok, _)) = tokens.peek()
          && tok == keyword
    {
        tokens.next();
        values.push(parse_operand(tokens)?);
    }

    if values.len() == 1 {
        return Ok(values.remove(0));
    }
    Ok(Expr::BoolOp { op,
                      values,
                      column })
}

/// Parses a prefix `not`.
///
/// `not` binds looser than comparisons, so `not a < b` negates the whole
/// comparison.
///
/// Grammar: `logical_not := "not" logical_not | comparison`
pub fn parse_logical_not<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, column)) = tokens.peek() {
        tokens.next();
        let expr = parse_logical_not(tokens)?;
        return Ok(Expr::UnaryOp { op:     UnaryOperator::Not,
                                  expr:   Box::new(expr),
                                  column: *column, });
    }
    parse_comparison(tokens)
}

/// Parses a possibly chained comparison such as `a < b <= c` or `a not in b`.
///
/// All operators of a chain are collected into a single `Expr::Compare`.
///
/// Grammar:
/// ```text
///     comparison := bitwise_or (comp_op bitwise_or)*
///     comp_op    := "<" | ">" | "<=" | ">=" | "==" | "!="
///                 | "in" | "not" "in" | "is" | "is" "not"
/// ```
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_bitwise_or(tokens)?;
    let mut operators = Vec::new();
    let mut comparators = Vec::new();

    while let Some(op) = next_compare_operator(tokens) {
        operators.push(op);
        comparators.push(parse_bitwise_or(tokens)?);
    }

    if operators.is_empty() {
        return Ok(left);
    }
    let column = left.column();
    Ok(Expr::Compare { left: Box::new(left),
                       operators,
                       comparators,
                       column })
}

/// Consumes a comparison operator if one follows.
///
/// `not` is only taken when it is directly followed by `in`.
fn next_compare_operator<'a, I>(tokens: &mut Peekable<I>) -> Option<CompareOperator>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek()? {
        (Token::EqualEqual, _) => CompareOperator::Equal,
        (Token::BangEqual, _) => CompareOperator::NotEqual,
        (Token::Less, _) => CompareOperator::Less,
        (Token::LessEqual, _) => CompareOperator::LessEqual,
        (Token::Greater, _) => CompareOperator::Greater,
        (Token::GreaterEqual, _) => CompareOperator::GreaterEqual,
        (Token::In, _) => CompareOperator::In,
        (Token::Is, _) => {
            tokens.next();
            if let Some((Token::Not, _)) = tokens.peek() {
                tokens.next();
                return Some(CompareOperator::IsNot);
            }
            return Some(CompareOperator::Is);
        },
        (Token::Not, _) => {
            let mut ahead = tokens.clone();
            ahead.next();
            if !matches!(ahead.peek(), Some((Token::In, _))) {
                return None;
            }
            tokens.next();
            tokens.next();
            return Some(CompareOperator::NotIn);
        },
        _ => return None,
    };
    tokens.next();
    Some(op)
}

/// Parses bitwise OR expressions.
///
/// Grammar: `bitwise_or := bitwise_xor ("|" bitwise_xor)*`
pub fn parse_bitwise_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, &[BinaryOperator::BitOr], parse_bitwise_xor)
}

/// Parses bitwise XOR expressions.
///
/// Grammar: `bitwise_xor := bitwise_and ("^" bitwise_and)*`
pub fn parse_bitwise_xor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, &[BinaryOperator::BitXor], parse_bitwise_and)
}

/// Parses bitwise AND expressions.
///
/// Grammar: `bitwise_and := shift ("&" shift)*`
pub fn parse_bitwise_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, &[BinaryOperator::BitAnd], parse_shift)
}

/// Parses shift expressions.
///
/// Grammar: `shift := additive (("<<" | ">>") additive)*`
pub fn parse_shift<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           &[BinaryOperator::LShift, BinaryOperator::RShift],
                           parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with column information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           &[BinaryOperator::Add, BinaryOperator::Sub],
                           parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/`, `//`, `%` and matrix
/// multiplication `@`.
///
/// The rule is: `multiplicative := power (("*" | "/" | "//" | "%" | "@")
/// power)*`
///
/// # Parameters
/// - `tokens`: Token stream with column information.
///
/// # Returns
/// A binary expression tree combining power-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens,
                           &[BinaryOperator::Mul,
                             BinaryOperator::Div,
                             BinaryOperator::FloorDiv,
                             BinaryOperator::Mod,
                             BinaryOperator::MatMul],
                           parse_power)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ** b ** c` parses as
/// `a ** (b ** c)`. Its operands are unary expressions, so `-2 ** 2` is
/// `(-2) ** 2` and `2 ** -1` is `2 ** (-1)`.
///
/// The rule is: `power := unary ("**" power)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_unary(tokens)?;

    if let Some((Token::DoubleStar, column)) = tokens.peek() {
        tokens.next();
        let exponent = parse_power(tokens)?;
        return Ok(Expr::BinaryOp { left:   Box::new(base),
                                   op:     BinaryOperator::Pow,
                                   right:  Box::new(exponent),
                                   column: *column, });
    }

    Ok(base)
}

/// Parses one left-associative precedence level.
///
/// Operators of the level are listed in `accepted`; operands come from
/// `parse_operand`. Each `Expr::BinaryOp` records its operator's column.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 accepted: &[BinaryOperator],
                                 parse_operand: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_operand(tokens)?;
    while let Some((token, column)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && accepted.contains(&op)
    {
        tokens.next();
        let right = parse_operand(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                column: *column };
    }
    Ok(left)
}

/// Converts a token to its corresponding binary operator, if any.
///
/// Returns `None` for tokens that are not binary operators.
///
/// # Example
/// ```
/// use calcguard::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::DoubleSlash), Some(BinaryOperator::FloorDiv));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::DoubleSlash => Some(BinaryOperator::FloorDiv),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::DoubleStar => Some(BinaryOperator::Pow),
        Token::At => Some(BinaryOperator::MatMul),
        Token::ShiftLeft => Some(BinaryOperator::LShift),
        Token::ShiftRight => Some(BinaryOperator::RShift),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Caret => Some(BinaryOperator::BitXor),
        _ => None,
    }
}

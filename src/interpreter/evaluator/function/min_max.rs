use std::cmp::Ordering;

use crate::{
    error::ArithmeticError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Returns the smallest of two or more values.
///
/// The first of several equal minima wins, and the result keeps its own type,
/// so `min(2, 2.0)` is the integer `2`.
///
/// # Example
/// ```
/// use calcguard::interpreter::{evaluator::function::min_max::min, value::core::Value};
///
/// let r = min(&[Value::Integer(3), Value::Real(1.5), Value::Integer(7)], 1).unwrap();
/// assert_eq!(r, Value::Real(1.5));
/// ```
pub fn min(args: &[Value], column: usize) -> EvalResult<Value> {
    extreme("min", args, Ordering::Less, column)
}

/// Returns the largest of two or more values.
///
/// The first of several equal maxima wins, and the result keeps its own type.
///
/// # Example
/// ```
/// use calcguard::interpreter::{evaluator::function::min_max::max, value::core::Value};
///
/// let r = max(&[Value::Real(2.0), Value::Integer(2)], 1).unwrap();
/// assert_eq!(r, Value::Real(2.0));
/// ```
pub fn max(args: &[Value], column: usize) -> EvalResult<Value> {
    extreme("max", args, Ordering::Greater, column)
}

/// Scans `args` for the first value that no later value beats in the
/// direction of `wanted`.
fn extreme(name: &str, args: &[Value], wanted: Ordering, column: usize) -> EvalResult<Value> {
    let Some((first, rest)) = args.split_first()
                                  .filter(|(_, rest)| !rest.is_empty())
    else {
        return Err(ArithmeticError::ArgumentCountMismatch { name: name.to_string(),
                                                            expected: "at least 2".to_string(),
                                                            found: args.len(),
                                                            column });
    };

    let mut best = *first;
    for candidate in rest {
        if candidate.compare(&best) == wanted {
            best = *candidate;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_the_first_argument() {
        let args = [Value::Integer(5), Value::Real(5.0)];
        assert_eq!(min(&args, 1).unwrap(), Value::Integer(5));
        assert_eq!(max(&args, 1).unwrap(), Value::Integer(5));
    }

    #[test]
    fn integers_compare_exactly_beyond_float_precision() {
        let big = Value::Integer(9_007_199_254_740_993);
        let bigger = Value::Integer(9_007_199_254_740_994);
        assert_eq!(max(&[big, bigger], 1).unwrap(), bigger);
    }

    #[test]
    fn a_single_argument_is_rejected() {
        assert!(matches!(min(&[Value::Integer(1)], 4),
                         Err(ArithmeticError::ArgumentCountMismatch { found: 1,
                                                                      column: 4,
                                                                      .. })));
    }
}

/// Numeric conversion helpers.
///
/// This module provides the conversions between integer and floating-point
/// types used by the evaluator. Lossy promotions are explicit, and every
/// narrowing conversion returns a `Result` carrying an `ArithmeticError` when
/// the value does not fit.
pub mod num;

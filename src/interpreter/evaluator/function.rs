/// The name table.
///
/// Declares every permitted name with its binding: a numeric constant, or a
/// function with its arity.
pub mod core;
/// The `abs` function implementation.
///
/// Computes the absolute value of an integer or real.
pub mod abs;
/// `min` and `max` function implementations.
///
/// Returns the first smallest or largest value from two or more arguments.
pub mod min_max;
/// The `round` function implementation.
///
/// Rounds half to even, to an integer or to a number of decimal digits.
pub mod round;

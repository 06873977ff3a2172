/// Dispatch of binary operators to their implementations.
pub mod core;

/// Addition, subtraction, multiplication and true division.
pub mod scalar;

/// Floor division and modulo.
///
/// Both round the quotient towards negative infinity, so the remainder takes
/// the sign of the divisor.
pub mod floor;

/// Exponentiation.
pub mod power;

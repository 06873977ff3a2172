/// Binary operator evaluation logic.
///
/// Handles the arithmetic operators `+ - * / // % **` on integers and reals.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements unary plus and arithmetic negation.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the main evaluation engine, which dispatches on the node kind and
/// resolves names and calls through the name table.
pub mod core;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// The static table of permitted names and the functions bound to them.
pub mod function;

use crate::interpreter::{
    evaluator::{
        core::EvalResult,
        function::{abs, min_max, round},
    },
    value::core::Value,
};

/// Type alias for function handlers.
///
/// A function receives a slice of evaluated argument values and the column of
/// the call. It returns the result wrapped in `EvalResult`.
pub type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `OneOf(slice)` means the function accepts any count listed in `slice`.
/// - `AtLeast(n)` means the function accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(counts) => counts.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "exactly {n}"),
            Self::OneOf(counts) => {
                let counts: Vec<String> = counts.iter().map(ToString::to_string).collect();
                write!(f, "{}", counts.join(" or "))
            },
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// What a permitted name stands for.
#[derive(Debug, Clone, Copy)]
pub enum Binding {
    /// A numeric constant such as `pi`.
    Constant(f64),
    /// A callable function with its accepted argument counts.
    Function {
        /// The accepted argument counts.
        arity: Arity,
        /// The implementation.
        func:  BuiltinFn,
    },
}

/// Defines the permitted names by generating a lookup table and a name list.
///
/// Each entry provides a string name and its [`Binding`].
///
/// The macro produces:
/// - `NameDef` (internal metadata),
/// - `NAME_TABLE` (static table for lookup),
/// - `ALLOWED_NAMES` (public list of every permitted name).
macro_rules! allowed_names {
    (
        $(
            $name:literal => $binding:expr
        ),* $(,)?
    ) => {
        struct NameDef {
            name:    &'static str,
            binding: Binding,
        }
        static NAME_TABLE: &[NameDef] = &[
            $(
                NameDef { name: $name, binding: $binding },
            )*
        ];
        /// Every name an expression may reference, in table order.
        pub const ALLOWED_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

allowed_names! {
    "pi"    => Binding::Constant(std::f64::consts::PI),
    "e"     => Binding::Constant(std::f64::consts::E),
    "abs"   => Binding::Function { arity: Arity::Exact(1), func: abs::abs },
    "max"   => Binding::Function { arity: Arity::AtLeast(2), func: min_max::max },
    "min"   => Binding::Function { arity: Arity::AtLeast(2), func: min_max::min },
    "round" => Binding::Function { arity: Arity::OneOf(&[1, 2]), func: round::round },
}

/// Looks up a name in the table.
///
/// # Example
/// ```
/// use calcguard::interpreter::evaluator::function::core::{Binding, lookup};
///
/// assert!(matches!(lookup("pi"), Some(Binding::Constant(_))));
/// assert!(matches!(lookup("round"), Some(Binding::Function { .. })));
/// assert!(lookup("__import__").is_none());
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Binding> {
    NAME_TABLE.iter()
              .find(|def| def.name == name)
              .map(|def| &def.binding)
}

/// Returns the names bound to functions, in table order.
#[must_use]
pub fn callable_names() -> Vec<&'static str> {
    NAME_TABLE.iter()
              .filter(|def| matches!(def.binding, Binding::Function { .. }))
              .map(|def| def.name)
              .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_permitted_name() {
        assert_eq!(ALLOWED_NAMES, &["pi", "e", "abs", "max", "min", "round"]);
        assert_eq!(callable_names(), vec!["abs", "max", "min", "round"]);
    }

    #[test]
    fn arity_describes_itself() {
        assert_eq!(Arity::Exact(1).to_string(), "exactly 1");
        assert_eq!(Arity::OneOf(&[1, 2]).to_string(), "1 or 2");
        assert_eq!(Arity::AtLeast(2).to_string(), "at least 2");
        assert!(Arity::AtLeast(2).accepts(5));
        assert!(!Arity::AtLeast(2).accepts(1));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("PI").is_none());
        assert!(lookup("Round").is_none());
    }
}

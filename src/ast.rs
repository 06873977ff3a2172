/// Represents a numeric literal value.
///
/// `LiteralValue` covers the raw constants that can appear directly in an
/// expression. Integer and real literals stay distinct so that integer
/// arithmetic can remain exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// The tree models a superset of what the evaluator accepts. Constructs such
/// as attribute access, subscripts or lambdas are parsed into their own
/// variants so the validator can name them when it rejects them. Every
/// variant records a 1-based column: binary operations record the column of
/// their operator, all other nodes the column where they start.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Literal {
        /// The constant value.
        value:  LiteralValue,
        /// Column in the source text.
        column: usize,
    },
    /// A string literal.
    Str {
        /// The literal contents without quotes.
        value:  String,
        /// Column in the source text.
        column: usize,
    },
    /// Reference to a constant or function by name.
    Name {
        /// The referenced name.
        name:   String,
        /// Column in the source text.
        column: usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:     UnaryOperator,
        /// The operand expression.
        expr:   Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// A binary operation (addition, subtraction, etc.).
    BinaryOp {
        /// Left operand.
        left:   Box<Self>,
        /// The operator.
        op:     BinaryOperator,
        /// Right operand.
        right:  Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// Function call expression (e.g. `round(x, 2)`).
    Call {
        /// The call target. Only a plain [`Expr::Name`] can pass validation.
        function:  Box<Self>,
        /// Positional, starred and keyword arguments in source order.
        arguments: Vec<Self>,
        /// Column in the source text.
        column:    usize,
    },
    /// A keyword argument inside a call (`f(x=1)`), or `**mapping` when
    /// `name` is `None`.
    Keyword {
        /// The keyword, if any.
        name:   Option<String>,
        /// The argument value.
        value:  Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// A starred argument or element (`*args`).
    Starred {
        /// The unpacked expression.
        expr:   Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// Attribute access (`object.attribute`).
    Attribute {
        /// The expression the attribute is read from.
        object:    Box<Self>,
        /// The attribute name.
        attribute: String,
        /// Column in the source text.
        column:    usize,
    },
    /// Subscript access (`object[index]`).
    Subscript {
        /// The subscripted expression.
        object: Box<Self>,
        /// The index or slice.
        index:  Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// A slice inside a subscript (`a[lower:upper:step]`).
    Slice {
        /// Optional lower bound.
        lower:  Option<Box<Self>>,
        /// Optional upper bound.
        upper:  Option<Box<Self>>,
        /// Optional step.
        step:   Option<Box<Self>>,
        /// Column in the source text.
        column: usize,
    },
    /// A possibly chained comparison (`a < b <= c`).
    Compare {
        /// The leftmost operand.
        left:        Box<Self>,
        /// Operators, one per comparator.
        operators:   Vec<CompareOperator>,
        /// Right-hand operands.
        comparators: Vec<Self>,
        /// Column in the source text.
        column:      usize,
    },
    /// A chain of `and` or `or`.
    BoolOp {
        /// The boolean operator.
        op:     BoolOperator,
        /// Operands in source order.
        values: Vec<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// Conditional expression (`a if condition else b`).
    Conditional {
        /// The condition.
        condition:   Box<Self>,
        /// Value when the condition holds.
        then_branch: Box<Self>,
        /// Value otherwise.
        else_branch: Box<Self>,
        /// Column in the source text.
        column:      usize,
    },
    /// Anonymous function (`lambda x: body`).
    Lambda {
        /// Parameter names.
        params:   Vec<String>,
        /// Default values of trailing parameters.
        defaults: Vec<Self>,
        /// The body expression.
        body:     Box<Self>,
        /// Column in the source text.
        column:   usize,
    },
    /// Assignment expression (`name := value`).
    NamedExpr {
        /// The assigned name.
        target: String,
        /// The assigned value.
        value:  Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// Tuple display (`(a, b)` or a bare `a, b`).
    Tuple {
        /// Elements of the tuple.
        elements: Vec<Self>,
        /// Column in the source text.
        column:   usize,
    },
    /// List display (`[a, b]`).
    List {
        /// Elements of the list.
        elements: Vec<Self>,
        /// Column in the source text.
        column:   usize,
    },
    /// Set display (`{a, b}`).
    Set {
        /// Elements of the set.
        elements: Vec<Self>,
        /// Column in the source text.
        column:   usize,
    },
    /// Dict display (`{k: v}`).
    Dict {
        /// Keys in source order.
        keys:   Vec<Self>,
        /// Values, parallel to `keys`.
        values: Vec<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// List, set, dict comprehension or generator expression.
    Comprehension {
        /// Which display the comprehension builds.
        kind:       ComprehensionKind,
        /// The produced element (the key for dict comprehensions).
        element:    Box<Self>,
        /// The produced value of a dict comprehension.
        value:      Option<Box<Self>>,
        /// The `for ... in ... if ...` clauses.
        generators: Vec<Generator>,
        /// Column in the source text.
        column:     usize,
    },
}

/// One `for target in iter if condition...` clause of a comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    /// The loop target.
    pub target:     Expr,
    /// The iterated expression.
    pub iter:       Expr,
    /// Filter conditions.
    pub conditions: Vec<Expr>,
}

/// The display a comprehension produces.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComprehensionKind {
    /// `[x for ...]`
    List,
    /// `{x for ...}`
    Set,
    /// `{k: v for ...}`
    Dict,
    /// `(x for ...)`
    Generator,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// True division (`/`)
    Div,
    /// Floor division (`//`)
    FloorDiv,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Matrix multiplication (`@`)
    MatMul,
    /// Left shift (`<<`)
    LShift,
    /// Right shift (`>>`)
    RShift,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Unary plus (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Minus,
    /// Bitwise inversion (`~x`).
    Invert,
    /// Logical not (`not x`).
    Not,
}

/// Represents a comparison operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompareOperator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `in`
    In,
    /// `not in`
    NotIn,
    /// `is`
    Is,
    /// `is not`
    IsNot,
}

/// Represents a short-circuit boolean operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoolOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

/// The category of a syntax-tree node.
///
/// Operators are part of the kind, so an allow-list of kinds can permit `+`
/// while refusing `<<`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Numeric literal.
    Number,
    /// String literal.
    String,
    /// Name reference.
    Name,
    /// Unary operation with its operator.
    UnaryOp(UnaryOperator),
    /// Binary operation with its operator.
    BinaryOp(BinaryOperator),
    /// Function call.
    Call,
    /// Keyword argument.
    Keyword,
    /// Starred argument.
    Starred,
    /// Attribute access.
    Attribute,
    /// Subscript.
    Subscript,
    /// Slice.
    Slice,
    /// Comparison.
    Compare,
    /// Boolean operation.
    BoolOp,
    /// Conditional expression.
    Conditional,
    /// Lambda.
    Lambda,
    /// Assignment expression.
    NamedExpr,
    /// Tuple display.
    Tuple,
    /// List display.
    List,
    /// Set display.
    Set,
    /// Dict display.
    Dict,
    /// Comprehension or generator expression.
    Comprehension,
}

impl Expr {
    /// Gets the column from `self`.
    /// ## Example
    /// ```
    /// use calcguard::ast::Expr;
    ///
    /// let expr = Expr::Name { name:   "pi".to_string(),
    ///                         column: 5, };
    ///
    /// assert_eq!(expr.column(), 5);
    /// ```
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Literal { column, .. }
            | Self::Str { column, .. }
            | Self::Name { column, .. }
            | Self::UnaryOp { column, .. }
            | Self::BinaryOp { column, .. }
            | Self::Call { column, .. }
            | Self::Keyword { column, .. }
            | Self::Starred { column, .. }
            | Self::Attribute { column, .. }
            | Self::Subscript { column, .. }
            | Self::Slice { column, .. }
            | Self::Compare { column, .. }
            | Self::BoolOp { column, .. }
            | Self::Conditional { column, .. }
            | Self::Lambda { column, .. }
            | Self::NamedExpr { column, .. }
            | Self::Tuple { column, .. }
            | Self::List { column, .. }
            | Self::Set { column, .. }
            | Self::Dict { column, .. }
            | Self::Comprehension { column, .. } => *column,
        }
    }

    /// Returns the node kind of `self`.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Literal { .. } => NodeKind::Number,
            Self::Str { .. } => NodeKind::String,
            Self::Name { .. } => NodeKind::Name,
            Self::UnaryOp { op, .. } => NodeKind::UnaryOp(*op),
            Self::BinaryOp { op, .. } => NodeKind::BinaryOp(*op),
            Self::Call { .. } => NodeKind::Call,
            Self::Keyword { .. } => NodeKind::Keyword,
            Self::Starred { .. } => NodeKind::Starred,
            Self::Attribute { .. } => NodeKind::Attribute,
            Self::Subscript { .. } => NodeKind::Subscript,
            Self::Slice { .. } => NodeKind::Slice,
            Self::Compare { .. } => NodeKind::Compare,
            Self::BoolOp { .. } => NodeKind::BoolOp,
            Self::Conditional { .. } => NodeKind::Conditional,
            Self::Lambda { .. } => NodeKind::Lambda,
            Self::NamedExpr { .. } => NodeKind::NamedExpr,
            Self::Tuple { .. } => NodeKind::Tuple,
            Self::List { .. } => NodeKind::List,
            Self::Set { .. } => NodeKind::Set,
            Self::Dict { .. } => NodeKind::Dict,
            Self::Comprehension { .. } => NodeKind::Comprehension,
        }
    }

    /// Returns the direct children of `self` in source order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Literal { .. } | Self::Str { .. } | Self::Name { .. } => Vec::new(),
            Self::UnaryOp { expr, .. } | Self::Starred { expr, .. } => vec![expr.as_ref()],
            Self::Keyword { value, .. } | Self::NamedExpr { value, .. } => vec![value.as_ref()],
            Self::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Self::Call { function,
                         arguments,
                         .. } => std::iter::once(function.as_ref()).chain(arguments)
                                                                  .collect(),
            Self::Attribute { object, .. } => vec![object.as_ref()],
            Self::Subscript { object, index, .. } => vec![object.as_ref(), index.as_ref()],
            Self::Slice { lower, upper, step, .. } => {
                [lower, upper, step].into_iter()
                                    .filter_map(|bound| bound.as_deref())
                                    .collect()
            },
            Self::Compare { left, comparators, .. } => {
                std::iter::once(left.as_ref()).chain(comparators).collect()
            },
            Self::BoolOp { values, .. } => values.iter().collect(),
            Self::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => vec![then_branch.as_ref(), condition.as_ref(), else_branch.as_ref()],
            Self::Lambda { defaults, body, .. } => {
                defaults.iter().chain(std::iter::once(body.as_ref())).collect()
            },
            Self::Tuple { elements, .. } | Self::List { elements, .. } | Self::Set { elements, .. } => {
                elements.iter().collect()
            },
            Self::Dict { keys, values, .. } => {
                keys.iter().zip(values).flat_map(|(k, v)| [k, v]).collect()
            },
            Self::Comprehension { element,
                                  value,
                                  generators,
                                  .. } => {
                let mut children = vec![element.as_ref()];
                children.extend(value.as_deref());
                for generator in generators {
                    children.push(&generator.target);
                    children.push(&generator.iter);
                    children.extend(&generator.conditions);
                }
                children
            },
        }
    }

    /// Iterates over `self` and all of its descendants in pre-order.
    ///
    /// ## Example
    /// ```
    /// use calcguard::ast::{BinaryOperator, Expr, LiteralValue, NodeKind};
    ///
    /// let tree = Expr::BinaryOp { left:   Box::new(Expr::Literal { value:  LiteralValue::Integer(1),
    ///                                                              column: 1, }),
    ///                             op:     BinaryOperator::Add,
    ///                             right:  Box::new(Expr::Name { name:   "pi".to_string(),
    ///                                                           column: 5, }),
    ///                             column: 1, };
    ///
    /// let kinds: Vec<NodeKind> = tree.walk().map(Expr::kind).collect();
    /// assert_eq!(kinds,
    ///            vec![NodeKind::BinaryOp(BinaryOperator::Add), NodeKind::Number, NodeKind::Name]);
    /// ```
    #[must_use]
    pub fn walk(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

/// Pre-order iterator over a syntax tree, created by [`Expr::walk`].
///
/// Uses an explicit stack, so walking a deep tree does not recurse.
pub struct PreOrder<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, BitAnd, BitOr, BitXor, Div, FloorDiv, LShift, MatMul, Mod, Mul, Pow, RShift, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            FloorDiv => "//",
            Mod => "%",
            Pow => "**",
            MatMul => "@",
            LShift => "<<",
            RShift => ">>",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Invert => "~",
            Self::Not => "not",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string literal"),
            Self::Name => write!(f, "name"),
            Self::UnaryOp(op) => write!(f, "unary operator '{op}'"),
            Self::BinaryOp(op) => write!(f, "operator '{op}'"),
            Self::Call => write!(f, "function call"),
            Self::Keyword => write!(f, "keyword argument"),
            Self::Starred => write!(f, "starred argument"),
            Self::Attribute => write!(f, "attribute access"),
            Self::Subscript => write!(f, "subscript"),
            Self::Slice => write!(f, "slice"),
            Self::Compare => write!(f, "comparison"),
            Self::BoolOp => write!(f, "boolean operator"),
            Self::Conditional => write!(f, "conditional expression"),
            Self::Lambda => write!(f, "lambda"),
            Self::NamedExpr => write!(f, "assignment expression"),
            Self::Tuple => write!(f, "tuple"),
            Self::List => write!(f, "list"),
            Self::Set => write!(f, "set"),
            Self::Dict => write!(f, "dict"),
            Self::Comprehension => write!(f, "comprehension"),
        }
    }
}

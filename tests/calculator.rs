use std::fs;

use calcguard::{
    ast::{BinaryOperator, NodeKind},
    calculator,
    error::{ArithmeticError, DisallowedConstruct, ParseError, Rejection},
    evaluate,
    interpreter::value::core::Value,
};

fn assert_renders(src: &str, expected: &str) {
    match evaluate(src) {
        Ok(value) => assert_eq!(value.to_string(), expected, "{src}"),
        Err(e) => panic!("{src} was rejected: {e}"),
    }
}

fn assert_parse_error(src: &str) {
    if !matches!(evaluate(src), Err(Rejection::Parse(_))) {
        panic!("{src} was expected to be a syntax error, got {:?}", evaluate(src))
    }
}

fn assert_disallowed(src: &str) {
    if !matches!(evaluate(src), Err(Rejection::Disallowed(_))) {
        panic!("{src} was expected to be disallowed, got {:?}", evaluate(src))
    }
}

fn assert_arithmetic_error(src: &str) {
    if !matches!(evaluate(src), Err(Rejection::Arithmetic(_))) {
        panic!("{src} was expected to fail arithmetically, got {:?}", evaluate(src))
    }
}

#[test]
fn readme_examples_work() {
    let readme = fs::read_to_string("README.md").unwrap_or_else(|e| panic!("Failed to read README.md: {e}"));
    let mut count = 0;

    for line in extract_example_lines(&readme) {
        let (expression, expected) =
            line.split_once("=>")
                .unwrap_or_else(|| panic!("README example without '=>': {line}"));
        count += 1;
        assert_eq!(calculator(expression.trim()), expected.trim(), "README example: {line}");
    }

    assert!(count > 0, "No calculator examples found in README.md");
}

fn extract_example_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```calc") {
            inside = true;
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            continue;
        }
        if inside && !trimmed.is_empty() {
            lines.push(line.to_string());
        }
    }

    lines
}

#[test]
fn arithmetic_follows_precedence() {
    assert_renders("(2+3*4)/5", "2.8");
    assert_renders("2 + 3 * 4", "14");
    assert_renders("2 ** 3 ** 2", "512");
    assert_renders("-2 ** 2", "4");
    assert_renders("2 ** -2", "0.25");
    assert_renders("10 - 4 - 3", "3");
    assert_renders("--+-3", "-3");
}

#[test]
fn integers_stay_exact_and_division_is_real() {
    assert_renders("7 // 2", "3");
    assert_renders("-7 // 2", "-4");
    assert_renders("-7 % 3", "2");
    assert_renders("7 % -3", "-2");
    assert_renders("7.5 // 2", "3.0");
    assert_renders("6 / 3", "2.0");
    assert_renders("1 / 3", "0.3333333333333333");
    assert_renders("9007199254740993 + 0", "9007199254740993");
    assert_renders("2 ** 62", "4611686018427387904");
}

#[test]
fn reals_render_like_a_calculator() {
    assert_renders("0.1 + 0.2", "0.30000000000000004");
    assert_renders("1e16", "1e+16");
    assert_renders("1e15", "1000000000000000.0");
    assert_renders("1 / 100000", "1e-05");
    assert_renders("-0.0", "-0.0");
    assert_renders("pi", "3.141592653589793");
    assert_renders("e", "2.718281828459045");
}

#[test]
fn functions_produce_correct_results() {
    assert_renders("round(1.005, 2)", "1.0");
    assert_renders("round(2.675, 2)", "2.67");
    assert_renders("round(0.125, 2)", "0.12");
    assert_renders("round(0.375, 2)", "0.38");
    assert_renders("round(1.234, 2)", "1.23");
    assert_renders("round(2.5)", "2");
    assert_renders("round(3.5)", "4");
    assert_renders("round(-2.5)", "-2");
    assert_renders("round(1234, -2)", "1200");
    assert_renders("round(1250, -2)", "1200");
    assert_renders("round(pi, 4)", "3.1416");
    assert_renders("abs(-7)", "7");
    assert_renders("abs(-7.25)", "7.25");
    assert_renders("min(3, 1.5, 2)", "1.5");
    assert_renders("max(1, 2.0, 2)", "2.0");
    assert_renders("max(-1, -2)", "-1");
    assert_renders("min(round(2.7), abs(-5))", "3");
}

#[test]
fn unknown_names_and_calls_are_disallowed() {
    assert_disallowed("os.system('x')");
    assert_disallowed("__import__('os')");
    assert_disallowed("open('/etc/passwd')");
    assert_disallowed("eval('1')");
    assert_disallowed("x + 1");
    assert_disallowed("True");
    assert_disallowed("None");
    assert_disallowed("pi(2)");
    assert_disallowed("(1).real");
}

#[test]
fn non_arithmetic_constructs_are_disallowed() {
    assert_disallowed("[1, 2][0]");
    assert_disallowed("[x for x in (1, 2)]");
    assert_disallowed("lambda: 1");
    assert_disallowed("(x := 5)");
    assert_disallowed("1 if 1 else 0");
    assert_disallowed("1 < 2");
    assert_disallowed("1 and 2");
    assert_disallowed("not 1");
    assert_disallowed("~1");
    assert_disallowed("1 << 4");
    assert_disallowed("6 & 3");
    assert_disallowed("'a' * 3");
    assert_disallowed("1, 2");
    assert_disallowed("{}");
    assert_disallowed("round(2.5, ndigits=1)");
    assert_disallowed("max(*[1, 2])");
}

#[test]
fn nested_violations_are_rejected_before_evaluation() {
    let result = evaluate("max(1/0, x.y)");
    assert_eq!(result,
               Err(Rejection::Disallowed(DisallowedConstruct::Node { kind:   NodeKind::Attribute,
                                                                     column: 10, })));
    assert_disallowed("1/0 + abs(y)");
    assert_disallowed("2 ** 100000 - (1 << 2)");
}

#[test]
fn arithmetic_failures_are_reported() {
    assert_eq!(evaluate("1/0"),
               Err(Rejection::Arithmetic(ArithmeticError::DivisionByZero { column: 2 })));
    assert_arithmetic_error("1 // 0");
    assert_arithmetic_error("1 % 0.0");
    assert_arithmetic_error("0 ** -1");
    assert_arithmetic_error("(-8) ** 0.5");
    assert_arithmetic_error("2 ** 64");
    assert_arithmetic_error("10.0 ** 400");
    assert_arithmetic_error("9223372036854775807 + 1");
    assert_arithmetic_error("round(1e300)");
    assert_arithmetic_error("round(1.5, 1.0)");
    assert_arithmetic_error("round + 1");
    assert_arithmetic_error("abs()");
    assert_arithmetic_error("abs(1, 2)");
    assert_arithmetic_error("max(1)");
    assert_arithmetic_error("round(1, 2, 3)");
}

#[test]
fn argument_count_errors_name_the_function() {
    let Err(Rejection::Arithmetic(ArithmeticError::ArgumentCountMismatch { name,
                                                                           expected,
                                                                           found,
                                                                           .. })) = evaluate("round(1, 2, 3)")
    else {
        panic!("expected an argument count mismatch");
    };
    assert_eq!((name.as_str(), expected.as_str(), found), ("round", "1 or 2", 3));
}

#[test]
fn malformed_text_is_a_syntax_error() {
    assert_eq!(evaluate(""), Err(Rejection::Parse(ParseError::EmptyExpression)));
    assert_eq!(evaluate("   \n\t"), Err(Rejection::Parse(ParseError::EmptyExpression)));
    assert_parse_error("1 +");
    assert_parse_error("(1 + 2");
    assert_parse_error("1 + 2)");
    assert_parse_error("2 3");
    assert_parse_error("x = 1");
    assert_parse_error("1 $ 2");
    assert_parse_error("99999999999999999999");
    assert_parse_error("1e999");
    assert_parse_error("round(1,,2)");
}

#[test]
fn oversized_input_is_refused_without_crashing() {
    let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_parse_error(&deep);

    let long = vec!["1"; 5_000].join(" + ");
    assert_parse_error(&long);

    let unary = format!("{}1", "-".repeat(400));
    assert_renders(&unary, "1");
}

#[test]
fn evaluation_is_idempotent() {
    for src in ["round(2.675, 2) * 3", "max(1/3, 0.3)", "1/0", "os.system('x')", ""] {
        assert_eq!(evaluate(src), evaluate(src), "{src}");
        assert_eq!(calculator(src), calculator(src), "{src}");
    }
}

#[test]
fn calculator_text_carries_the_reason() {
    assert_eq!(calculator("(2+3*4)/5"), "2.8");
    assert_eq!(calculator("1/0"), "Calculator error: division by zero at column 2");
    assert_eq!(calculator("os.system('x')"),
               "Calculator error: disallowed call at column 1: the call target is not a plain name \
                (attribute access); only safe functions are allowed: abs, max, min, round");
    assert_eq!(calculator("1 << 2"),
               "Calculator error: disallowed expression node at column 3: operator '<<'");
    assert_eq!(calculator(""), "Calculator error: invalid syntax: empty expression");
}

#[test]
fn values_keep_their_type() {
    assert_eq!(evaluate("3 * 4"), Ok(Value::Integer(12)));
    assert_eq!(evaluate("3 * 4.0"), Ok(Value::Real(12.0)));
    assert_eq!(evaluate("abs(-3)"), Ok(Value::Integer(3)));
    assert_eq!(evaluate("1 - 2 - 3 ** 2"), Ok(Value::Integer(-10)));
    assert_eq!(evaluate("2 ** -1"), Ok(Value::Real(0.5)));
    assert_eq!(evaluate("round(7.5, 0)"), Ok(Value::Real(8.0)));
    assert_eq!(evaluate("round(75, 0)"), Ok(Value::Integer(75)));
}

#[test]
fn disallowed_operators_are_named() {
    assert_eq!(evaluate("2 << 1"),
               Err(Rejection::Disallowed(DisallowedConstruct::Node { kind:   NodeKind::BinaryOp(BinaryOperator::LShift),
                                                                     column: 3, })));
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use calcguard::{
    error::ToolError,
    tools::{
        Tool, ToolCall, ToolRegistry,
        calculator::Calculator,
        faq::{FAQ_UNAVAILABLE, FaqBook, FaqLookup, NO_GOOD_MATCH},
    },
};
use tempfile::TempDir;

const FAQ: &str = r#"[
    {"q": "What is the refund policy", "a": "Refunds are accepted within 30 days of purchase."},
    {"q": "How long does shipping take", "a": "Standard shipping takes 3 to 5 business days."},
    {"q": "Do you ship internationally"},
    {"a": "Shipping is free for orders over 50 euros."}
]"#;

fn write_faq(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("faq.json");
    fs::write(&path, contents).unwrap_or_else(|e| panic!("Failed to write FAQ fixture: {e}"));
    path
}

fn ask(path: &Path, question: &str) -> String {
    let arguments = serde_json::json!({ "question": question }).to_string();
    match FaqLookup::new(path).call(&arguments) {
        Ok(answer) => answer,
        Err(e) => panic!("faq_lookup failed: {e}"),
    }
}

#[test]
fn default_registry_lists_every_tool() {
    let registry = ToolRegistry::with_defaults("does/not/exist.json");
    assert_eq!(registry.names(),
               vec!["calculator",
                    "faq_lookup",
                    "retail_inventory_status",
                    "retail_price_optimize",
                    "retail_markdown_report"]);

    let definitions = registry.definitions();
    assert_eq!(definitions[0].parameters["required"], serde_json::json!(["expression"]));
    assert_eq!(definitions[1].parameters["required"], serde_json::json!(["question"]));

    let json = serde_json::to_value(&definitions).unwrap();
    assert_eq!(json[0]["name"], "calculator");
    assert_eq!(json[1]["name"], "faq_lookup");
}

#[test]
fn registering_a_tool_twice_replaces_it() {
    let mut registry = ToolRegistry::new();
    registry.register(Calculator).register(Calculator);
    assert_eq!(registry.names(), vec!["calculator"]);
    assert!(registry.get("faq_lookup").is_none());
}

#[test]
fn calculator_tool_answers_rejections_as_text() {
    let registry = ToolRegistry::with_defaults("does/not/exist.json");
    let invoke = |expression: &str| {
        let arguments = serde_json::json!({ "expression": expression }).to_string();
        registry.invoke(&ToolCall::new("calculator", arguments))
                .unwrap_or_else(|e| panic!("calculator failed: {e}"))
    };

    assert_eq!(invoke("(2+3*4)/5"), "2.8");
    assert_eq!(invoke("round(1.005, 2)"), "1.0");
    assert_eq!(invoke("1/0"), "Calculator error: division by zero at column 2");
    assert!(invoke("__import__('os')").starts_with("Calculator error: disallowed call"));
    assert!(invoke("").starts_with("Calculator error: invalid syntax"));
}

#[test]
fn unknown_tools_and_bad_arguments_are_errors() {
    let registry = ToolRegistry::with_defaults("does/not/exist.json");

    let unknown = registry.invoke(&ToolCall::new("python", r#"{"code": "1"}"#));
    assert!(matches!(unknown, Err(ToolError::UnknownTool { ref name }) if name == "python"));

    for arguments in ["", "{}", r#"{"expr": "1"}"#, "not json", r#"{"expression": 1}"#] {
        let result = registry.invoke(&ToolCall::new("calculator", arguments));
        assert!(matches!(result, Err(ToolError::InvalidArguments { tool: "calculator", .. })),
                "{arguments:?}");
    }
}

#[test]
fn tool_calls_decode_typed_arguments() {
    #[derive(serde::Deserialize)]
    struct Args {
        expression: String,
    }

    let call = ToolCall::new("calculator", r#"{"expression": "pi"}"#);
    let args: Args = call.parse_arguments().unwrap();
    assert_eq!(args.expression, "pi");

    let blank = ToolCall::new("calculator", "   ");
    let value: serde_json::Value = blank.parse_arguments().unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[test]
fn faq_returns_the_best_match_with_its_score() {
    let dir = TempDir::new().unwrap();
    let path = write_faq(&dir, FAQ);

    assert_eq!(ask(&path, "what is the refund policy"),
               "MatchScore=1.00\nQ: What is the refund policy\nA: Refunds are accepted within 30 days of purchase.");
    assert_eq!(ask(&path, "shipping time"),
               "MatchScore=0.50\nQ: How long does shipping take\nA: Standard shipping takes 3 to 5 business days.");
}

#[test]
fn faq_entries_may_omit_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_faq(&dir, FAQ);

    assert_eq!(ask(&path, "ship internationally"), "MatchScore=1.00\nQ: Do you ship internationally\nA: ");
    assert_eq!(ask(&path, "free orders"), "MatchScore=1.00\nQ: \nA: Shipping is free for orders over 50 euros.");
}

#[test]
fn faq_match_threshold_is_inclusive() {
    let dir = TempDir::new().unwrap();
    let path = write_faq(&dir, FAQ);

    assert!(ask(&path, "refund weather today please tell").starts_with("MatchScore=0.20\n"));
    assert_eq!(ask(&path, "refund weather today please tell more"), NO_GOOD_MATCH);
    assert_eq!(ask(&path, "a b c"), NO_GOOD_MATCH);
}

#[test]
fn faq_ties_keep_the_earlier_entry() {
    let dir = TempDir::new().unwrap();
    let path = write_faq(&dir,
                         r#"[{"q": "opening hours", "a": "first"}, {"q": "opening hours", "a": "second"}]"#);

    assert!(ask(&path, "opening hours").ends_with("A: first"));
}

#[test]
fn missing_or_empty_faq_is_unavailable() {
    let dir = TempDir::new().unwrap();
    assert_eq!(ask(&dir.path().join("missing.json"), "refund policy"), FAQ_UNAVAILABLE);

    let empty = write_faq(&dir, "[]");
    assert_eq!(ask(&empty, "refund policy"), FAQ_UNAVAILABLE);
}

#[test]
fn broken_faq_files_are_errors() {
    let dir = TempDir::new().unwrap();

    let malformed = write_faq(&dir, r#"{"q": "not an array"}"#);
    assert!(matches!(FaqBook::load(&malformed), Err(ToolError::FaqMalformed { .. })));

    let directory = dir.path().to_path_buf();
    let result = FaqLookup::new(&directory).call(r#"{"question": "refund"}"#);
    assert!(matches!(result, Err(ToolError::FaqUnreadable { .. })));
}

#[test]
fn faq_edits_take_effect_on_the_next_call() {
    let dir = TempDir::new().unwrap();
    let path = write_faq(&dir, "[]");
    assert_eq!(ask(&path, "refund policy"), FAQ_UNAVAILABLE);

    write_faq(&dir, FAQ);
    assert!(ask(&path, "refund policy").starts_with("MatchScore=1.00\n"));
}

#[test]
fn retail_tools_chain_into_a_report() {
    let registry = ToolRegistry::with_defaults("does/not/exist.json");
    let invoke = |name: &str, arguments: &str| {
        registry.invoke(&ToolCall::new(name, arguments))
                .unwrap_or_else(|e| panic!("{name} failed: {e}"))
    };
    let items = r#"[
        {"sku": "SKU-1", "on_hand": 3, "reorder_point": 10, "unit_price": 20.0, "baseline_units": 5},
        {"sku": "SKU-2", "on_hand": 40, "reorder_point": 10, "unit_price": 40.0, "baseline_units": 8}
    ]"#;

    let status: serde_json::Value =
        serde_json::from_str(&invoke("retail_inventory_status", &format!(r#"{{"items": {items}}}"#))).unwrap();
    assert_eq!(status["low_count"], 1);

    let pricing: serde_json::Value =
        serde_json::from_str(&invoke("retail_price_optimize", &format!(r#"{{"items": {items}}}"#))).unwrap();
    assert_eq!(pricing["pricing"][1]["suggested_price"], 36.0);
    assert_eq!(pricing["pricing"][1]["revenue_suggested"], 326.81);

    let findings = serde_json::json!({
        "low_stock": status["low_stock"],
        "pricing": pricing["pricing"],
        "assumptions": pricing["assumptions"],
    });
    let report = invoke("retail_markdown_report", &findings.to_string());
    assert_eq!(report,
               "# Retail Summary Report\n\n\
                ## Low Stock Alerts\n- SKU-1 (on_hand=3, ROP=10)\n\n\
                ## Pricing Suggestions\n\
                - SKU-1: 20.0 -> 18.0 | ΔRev=$2.13\n\
                - SKU-2: 40.0 -> 36.0 | ΔRev=$6.81\n\
                Assumptions: elasticity=-1.2 within +/-10%\n");
}

#[test]
fn retail_tools_without_inventory_say_so() {
    let registry = ToolRegistry::with_defaults("does/not/exist.json");
    for name in ["retail_inventory_status", "retail_price_optimize"] {
        let reply = registry.invoke(&ToolCall::new(name, r#"{"items": []}"#)).unwrap();
        assert_eq!(reply, r#"{"error":"no_inventory_data"}"#, "{name}");
    }
}

//! Integration tests for formwatch-rules

use formwatch_core::{FieldRules, Schema, ValidationContext, ValidationOptions};
use formwatch_rules::*;
use regex::Regex;
use serde_json::{Value, json};

fn rules() -> FieldRules<Value> {
    FieldRules::new()
}

#[test]
fn test_required_messages() {
    let ctx = ValidationContext::new();
    ctx.validate(
        &json!({ "name": "", "title": "" }),
        &Schema::new()
            .field("name", rules().rule(required_with(RequiredRule::new().msg("yo"))))
            .field("title", rules().rule(required_with("Title plz"))),
    );

    assert_eq!(ctx.get_error("name").as_deref(), Some("yo"));
    assert_eq!(ctx.get_error("title").as_deref(), Some("Title plz"));
}

#[test]
fn test_required_can_be_disabled() {
    let ctx = ValidationContext::new();
    ctx.validate(
        &json!({ "name": "", "title": "" }),
        &Schema::new()
            .field(
                "name",
                rules().rule(required_with(RequiredRule::new().msg("yo").required(false))),
            )
            .field("title", rules().rule(required_with("Title plz"))),
    );

    assert!(!ctx.errors().contains("name"));
    assert_eq!(ctx.get_error("title").as_deref(), Some("Title plz"));
}

#[test]
fn test_required_presence() {
    let ctx = ValidationContext::new();
    let schema = Schema::new()
        .field("zero", rules().rule(required()))
        .field("empty", rules().rule(required()))
        .field("null", rules().rule(required()))
        .field("missing", rules().rule(required()))
        .field("no", rules().rule(required()));

    ctx.validate(
        &json!({ "zero": 0, "empty": "", "null": null, "no": false }),
        &schema,
    );

    assert_eq!(ctx.errors().len(), 4);
    assert!(!ctx.errors().contains("zero"));
    assert_eq!(ctx.get_error("missing").as_deref(), Some(REQUIRED_MESSAGE));
}

#[test]
fn test_pattern_email() {
    let ctx = ValidationContext::new();
    ctx.validate(
        &json!({ "email1": "", "email2": "", "email3": "test@test.com" }),
        &Schema::new()
            .field("email1", rules().rule(pattern(PatternKind::Email).message("yo")))
            .field("email2", rules().rule(pattern(PatternKind::Email)))
            .field("email3", rules().rule(pattern(PatternKind::Email))),
    );

    assert_eq!(ctx.get_error("email1").as_deref(), Some("yo"));
    assert_eq!(
        ctx.get_error("email2").as_deref(),
        Some("This is not a valid email")
    );
    assert!(!ctx.errors().contains("email3"));
}

#[test]
fn test_pattern_email_from_rule() {
    let ctx = ValidationContext::new();
    let email: PatternKind = "email".parse().unwrap();
    ctx.validate(
        &json!({ "email1": "", "email2": "", "email3": "test@test.com" }),
        &Schema::new()
            .field(
                "email1",
                rules().rule(pattern_with(PatternRule::new(email.clone()).msg("yo"))),
            )
            .field("email2", rules().rule(pattern_with(PatternRule::new(email.clone()))))
            .field("email3", rules().rule(pattern_with(PatternRule::new(email)))),
    );

    assert_eq!(ctx.get_error("email1").as_deref(), Some("yo"));
    assert_eq!(
        ctx.get_error("email2").as_deref(),
        Some("This is not a valid email")
    );
    assert!(!ctx.errors().contains("email3"));
}

#[test]
fn test_pattern_url() {
    let ctx = ValidationContext::new();
    ctx.validate(
        &json!({ "url1": "", "url2": "haha", "url3": "https://jeffijoe.com" }),
        &Schema::new()
            .field(
                "url1",
                rules().rule(pattern_with(PatternRule::new(PatternKind::Url).msg("yo"))),
            )
            .field("url2", rules().rule(pattern(PatternKind::Url)))
            .field("url3", rules().rule(pattern(PatternKind::Url))),
    );

    assert_eq!(ctx.get_error("url1").as_deref(), Some("yo"));
    assert_eq!(
        ctx.get_error("url2").as_deref(),
        Some("This is not a valid url")
    );
    assert!(!ctx.errors().contains("url3"));
}

#[test]
fn test_pattern_regex() {
    let ctx = ValidationContext::new();
    let lower = Regex::new("[a-z]").unwrap();
    ctx.validate(
        &json!({ "p1": "abcd", "p2": "1234", "p3": "hij" }),
        &Schema::new()
            .field(
                "p1",
                rules().rule(pattern_with(
                    PatternRule::new(Regex::new(r"\d").unwrap()).msg("yo"),
                )),
            )
            .field("p2", rules().rule(pattern(lower.clone())))
            .field("p3", rules().rule(pattern(lower))),
    );

    assert_eq!(ctx.get_error("p1").as_deref(), Some("yo"));
    let p2 = ctx.get_error("p2").unwrap_or_default();
    assert!(p2.to_lowercase().contains("invalid"));
    assert!(!ctx.errors().contains("p3"));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let result: Result<PatternKind> = "[a-z".parse();
    assert!(matches!(result, Err(RuleError::InvalidPattern(_))));
}

#[test]
fn test_func_messages() {
    let ctx = ValidationContext::new();
    ctx.validate(
        &json!({ "name": "", "title": "" }),
        &Schema::new()
            .field("name", rules().rule(func(|_| true).message("Haha")))
            .field("title", rules().rule(func(|_| false).message("Lol"))),
    );

    assert!(!ctx.errors().contains("name"));
    assert_eq!(ctx.get_error("title").as_deref(), Some("Lol"));
}

#[test]
fn test_func_accepts_a_rule() {
    let ctx = ValidationContext::new();
    ctx.validate(
        &json!({ "name": "", "title": "", "bare": "" }),
        &Schema::new()
            .field(
                "name",
                rules().rule(func_with(FuncRule::new(|_| false).msg("Haha")).unwrap()),
            )
            .field(
                "title",
                rules().rule(func_with(FuncRule::new(|_| false)).unwrap().message("Lol")),
            )
            .field(
                "bare",
                rules().rule(func_with(FuncRule::new(|_| false)).unwrap()),
            ),
    );

    assert_eq!(ctx.get_error("name").as_deref(), Some("Haha"));
    assert_eq!(ctx.get_error("title").as_deref(), Some("Lol"));
    assert_eq!(ctx.get_error("bare").as_deref(), Some(FUNC_MESSAGE));
}

#[test]
fn test_func_rule_message_beats_explicit_message() {
    let ctx = ValidationContext::new();
    ctx.validate(
        &json!({ "name": "" }),
        &Schema::new().field(
            "name",
            rules().rule(
                func_with(FuncRule::new(|_| false).msg("Haha"))
                    .unwrap()
                    .message("Lol"),
            ),
        ),
    );

    assert_eq!(ctx.get_errors("name"), vec!["Haha"]);
}

#[test]
fn test_func_without_predicate_is_rejected() {
    let rule = FuncRule::<Value>::empty().msg("Haha");
    assert!(matches!(func_with(rule), Err(RuleError::MissingFunction)));
}

fn passwords_match(opts: &ValidationOptions<'_, Value>) -> bool {
    opts.obj["password"] == *opts.value
}

#[test]
fn test_combinators_compose() {
    let ctx = ValidationContext::new();
    let schema = Schema::new()
        .field("password", rules().rule(required()))
        .field(
            "confirm",
            rules()
                .rule(required().message("Please confirm your password"))
                .rule(func(passwords_match).message("Passwords do not match")),
        );

    ctx.validate(&json!({ "password": "hunter2", "confirm": "" }), &schema);
    assert_eq!(
        ctx.get_errors("confirm"),
        vec!["Please confirm your password", "Passwords do not match"]
    );

    ctx.reset()
        .validate(&json!({ "password": "hunter2", "confirm": "hunter2" }), &schema);
    assert!(ctx.is_valid());
}

#[test]
fn test_rules_are_reusable() {
    let email = pattern(PatternKind::Email);
    let schema = Schema::new()
        .field("primary", rules().rule(email.clone()))
        .field("backup", rules().rule(email));

    let ctx = ValidationContext::new();
    ctx.validate(&json!({ "primary": "a@b.co", "backup": "nope" }), &schema);
    assert_eq!(ctx.errors().fields().collect::<Vec<_>>(), vec!["backup"]);
}

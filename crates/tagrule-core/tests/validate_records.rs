//! Integration tests: validate whole records through the public API.
//!
//! Covers the record shapes a caller typically declares (scalars, lists,
//! private fields, malformed tags) and checks the rendered output and the
//! isolation of concurrent calls.

use tagrule_core::{
    validate, Field, FieldValue, Record, RuleFailure, ValidationError, Violations,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// Fixture records
// ---------------------------------------------------------------------------

struct Account {
    id: String,
    age: i64,
    email: String,
    role: String,
    phones: Vec<String>,
    meta: i64,
}

impl Record for Account {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        Some(vec![
            Field::new("ID", &self.id).tag("len:36"),
            Field::new("Age", self.age).tag("range:18,50"),
            Field::new("Email", &self.email).tag("min:5"),
            Field::new("Role", &self.role).tag("in:admin,stuff"),
            Field::new("Phones", &self.phones).tag("len:11"),
            Field::new("meta", self.meta),
        ])
    }
}

fn valid_account() -> Account {
    Account {
        id: "4b1d9a0a-0f0b-4c3b-9a2d-6c0b5e1f2a3b".into(),
        age: 30,
        email: "user@example.com".into(),
        role: "admin".into(),
        phones: vec!["79991234567".into(), "79997654321".into()],
        meta: 0,
    }
}

struct Response {
    code: i64,
    body: String,
}

impl Record for Response {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        Some(vec![
            Field::new("Code", self.code).tag("in:200,404,500"),
            Field::new("Body", &self.body),
        ])
    }
}

struct Untagged {
    a: i64,
    b: String,
    c: Vec<i64>,
}

impl Record for Untagged {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        Some(vec![
            Field::new("A", self.a),
            Field::new("B", &self.b),
            Field::new("C", &self.c),
        ])
    }
}

struct Tagged<'t> {
    tag: &'t str,
    value: i64,
}

impl Record for Tagged<'_> {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        Some(vec![Field::new("Value", self.value).tag(self.tag)])
    }
}

fn constraint(field: &str, rule: RuleFailure) -> ValidationError {
    ValidationError::Constraint {
        field: field.to_string(),
        rule,
    }
}

// ---------------------------------------------------------------------------
// Whole-record behaviour
// ---------------------------------------------------------------------------

#[test]
fn test_valid_account_passes() {
    init_tracing();
    assert!(validate(&valid_account()).is_ok());
}

#[test]
fn test_every_failing_field_is_reported_in_order() {
    init_tracing();
    let account = Account {
        id: "short".into(),
        age: 17,
        email: "a@b".into(),
        role: "guest".into(),
        phones: vec!["123".into(), "79991234567".into(), "1".into()],
        meta: 42,
    };
    let err = validate(&account).unwrap_err();
    assert_eq!(
        err.to_string(),
        "wrong field ID: incorrect string len\n\
         wrong field Age: the number is not in range\n\
         wrong field Email: string len is less than the lower bound\n\
         wrong field Role: the string is not in the list\n\
         wrong field Phones: incorrect string len\n\
         wrong field Phones: incorrect string len"
    );
    assert!(err.contains(&constraint("Role", RuleFailure::StringNotInList)));
}

#[test]
fn test_role_membership_uses_substring_containment() {
    // "stu" is accepted because the allowed entry "stuff" contains it.
    let mut account = valid_account();
    account.role = "stu".into();
    assert!(validate(&account).is_ok());
}

#[test]
fn test_integer_membership() {
    assert!(validate(&Response { code: 404, body: String::new() }).is_ok());
    let err = validate(&Response { code: 201, body: String::new() }).unwrap_err();
    assert_eq!(err.len(), 1);
    assert!(err.contains(&constraint("Code", RuleFailure::NumberNotInList)));
}

#[test]
fn test_zero_tagged_fields_always_pass() {
    let record = Untagged {
        a: i64::MIN,
        b: "anything at all".into(),
        c: vec![i64::MAX, -1],
    };
    assert!(validate(&record).is_ok());
}

#[test]
fn test_syntax_errors_are_reported_per_field() {
    for tag in ["len:5", "in:abc,2", "range:1", "min:", "unknown:3", "max:x"] {
        let err = validate(&Tagged { tag, value: 3 }).unwrap_err();
        assert_eq!(err.len(), 1, "{tag}");
        assert!(err.contains(&ValidationError::InvalidSyntax), "{tag}");
        assert_eq!(err.to_string(), "invalid validator syntax");
    }
}

#[test]
fn test_inverted_range_rejects_every_value() {
    for value in [-100, 0, 5, 10, 100] {
        let err = validate(&Tagged { tag: "range:10,0", value }).unwrap_err();
        assert!(err.contains(&constraint("Value", RuleFailure::NumberOutOfRange)));
    }
}

// ---------------------------------------------------------------------------
// Structural and visibility errors
// ---------------------------------------------------------------------------

#[test]
fn test_non_record_inputs_yield_single_structural_violation() {
    let inputs: Vec<Box<dyn Record>> = vec![
        Box::new(42i64),
        Box::new(String::from("Account")),
        Box::new(vec![valid_account().age]),
        Box::new(Some(1i32)),
    ];
    for input in &inputs {
        let err = validate(input).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.contains(&ValidationError::NotRecord));
        assert_eq!(err.to_string(), "wrong argument given, should be a struct");
    }
}

#[test]
fn test_record_that_declines_introspection_is_not_a_record() {
    // Looks like a record (named fields), but reports no shape.
    struct Opaque {
        _age: i64,
    }
    impl Record for Opaque {
        fn fields(&self) -> Option<Vec<Field<'_>>> {
            None
        }
    }
    let err = validate(&Opaque { _age: -5 }).unwrap_err();
    assert_eq!(err.len(), 1);
    assert!(err.contains(&ValidationError::NotRecord));
}

#[test]
fn test_private_fields_are_reported_and_inspection_continues() {
    struct Mixed {
        internal: i64,
        visible: i64,
    }
    impl Record for Mixed {
        fn fields(&self) -> Option<Vec<Field<'_>>> {
            Some(vec![
                Field::new("internal", self.internal).tag("min:0").private(),
                Field::new("Visible", self.visible).tag("max:10"),
                Field::new("other", FieldValue::Integer(0)).tag("in:x").private(),
            ])
        }
    }
    let err = validate(&Mixed { internal: 5, visible: 11 }).unwrap_err();
    let errors: Vec<&ValidationError> = err.iter().map(|v| &v.error).collect();
    assert_eq!(
        errors,
        [
            &ValidationError::UnexportedField,
            &constraint("Visible", RuleFailure::NumberAboveMaximum),
            &ValidationError::UnexportedField,
        ]
    );
}

// ---------------------------------------------------------------------------
// Error surface
// ---------------------------------------------------------------------------

#[test]
fn test_violations_is_a_std_error() {
    fn run() -> Result<(), Box<dyn std::error::Error>> {
        validate(&Tagged { tag: "min:10", value: 1 })?;
        Ok(())
    }
    let err = run().unwrap_err();
    assert_eq!(err.to_string(), "wrong field Value: the number is less than the lower bound");
}

// ---------------------------------------------------------------------------
// Isolation of concurrent calls
// ---------------------------------------------------------------------------

#[test]
fn test_concurrent_calls_are_isolated() {
    init_tracing();
    let results: Vec<(i64, Violations)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16i64)
            .map(|i| {
                scope.spawn(move || {
                    let mut account = valid_account();
                    account.phones = (0..i).map(|n| "x".repeat(n as usize)).collect();
                    let violations = match validate(&account) {
                        Ok(()) => Violations::new(),
                        Err(v) => v,
                    };
                    (i, violations)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect()
    });

    for (i, violations) in results {
        // Thread i built phone numbers of lengths 0..i; only length 11 passes.
        let expected = (0..i).filter(|n| *n != 11).count();
        assert_eq!(violations.len(), expected, "thread {i}");
        assert!(violations.iter().all(|v| v.field == "Phones"));
    }
}

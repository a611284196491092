use errstack::{
    Error, ErrorExt, Fields, Stack, fields, json_stack, restore, restore_raw, wrap, wrap_with_fields,
};
use std::{fmt, io};

/// Compact a pretty printed fixture the same way the stack is encoded.
fn fixture(json: &str) -> Vec<u8> {
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    serde_json::to_vec(&value).unwrap()
}

fn f1() -> Fields {
    fields! { "f1" => "v1" }
}

#[derive(Debug)]
struct Builtin(&'static str);

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Builtin {}

#[test]
fn json_stack_only_native_simple() {
    let error = Error::new("1").wrap("2").wrap_with_fields("3", f1());
    assert_eq!(
        error.json_stack(),
        fixture(include_str!("testdata/Stack_OnlyPackageError_Simple.json")),
    );
}

#[test]
fn json_stack_only_native_start_with_fields() {
    let error = Error::with_fields("1", f1())
        .wrap_with_fields("2", f1())
        .wrap("3");
    assert_eq!(
        error.json_stack(),
        fixture(include_str!("testdata/Stack_OnlyPackageError_StartWithFields.json")),
    );
}

#[test]
fn json_stack_foreign_root() {
    let error = Builtin("1").wrap("2").wrap_with_fields("3", f1());
    assert_eq!(
        error.json_stack(),
        fixture(include_str!("testdata/Stack_ForeignErrors.json")),
    );
}

#[test]
fn json_stack_none() {
    let error = wrap(None::<Error>, "2");
    let error = wrap_with_fields(error, "3", f1());
    assert!(error.is_none());
    assert_eq!(
        json_stack(error.as_ref().map(|e| e as &(dyn std::error::Error + 'static))),
        fixture(include_str!("testdata/Stack_NoneError.json")),
    );
}

#[test]
fn restore_round_trips() {
    let cases = [
        Stack::new(),
        Error::with_fields("1", f1()).wrap_with_fields("2", f1()).stack(),
        Builtin("1").wrap_with_fields("2", f1()).stack(),
    ];

    for stack in cases {
        let restored = restore(stack.clone());
        let got = errstack::stack(restored.as_ref().map(|e| e as &(dyn std::error::Error + 'static)));
        assert_eq!(got, stack);
    }
}

#[test]
fn restore_raw_round_trips() {
    let cases = [
        b"[]".to_vec(),
        Error::with_fields("1", f1()).wrap_with_fields("2", f1()).json_stack(),
        Builtin("1").wrap_with_fields("2", f1()).json_stack(),
        io::Error::other("disk on fire")
            .wrap("write")
            .wrap_with_fields("save", fields! { "path" => "/tmp/x", "size" => 512, "sync" => true })
            .json_stack(),
    ];

    for raw in cases {
        let restored = restore_raw(&raw);
        let got = restored.map(|e| e.json_stack()).unwrap_or_else(|| b"[]".to_vec());
        assert_eq!(String::from_utf8(got).unwrap(), String::from_utf8(raw).unwrap());
    }
}

#[test]
fn restore_raw_renders_full_chain() {
    let error = Error::with_fields("1", f1()).wrap_with_fields("2", fields! { "f2" => "v2" });

    let raw = error.json_stack();
    assert_eq!(
        raw,
        br#"[{"fields":{"f2":"v2"},"message":"2"},{"fields":{"f1":"v1"},"message":"1"}]"#,
    );

    let restored = restore_raw(&raw).unwrap();
    assert_eq!(restored.to_string(), "2: 1");
}

#[test]
fn restore_raw_partial_chain() {
    let restored = restore_raw(br#"[{"message":"2","fields":"bad"},null,{"fields":{"k":1}}]"#).unwrap();
    assert_eq!(restored.to_string(), "2: ");
    assert!(restored.fields().is_none());

    let root = restored.root_cause().downcast_ref::<Error>().unwrap();
    assert_eq!(root.message(), "");
    assert_eq!(root.fields(), Some(&fields! { "k" => 1 }));
}

#[test]
fn restore_raw_garbage_is_none() {
    let cases: [&[u8]; 6] = [b"", b"{", b"null", b"42", br#"{"message":"m"}"#, b"[1, 2, 3]"];
    for raw in cases {
        assert!(restore_raw(raw).is_none());
    }
}

use hookjson::hooks::{self, Unknown};
use hookjson::{
    decode, decode_with_options, from_reader, from_str, to_string, to_string_pretty,
    to_string_with_options, to_value, to_writer_with_options, value, EncodeOptions, Error,
    KeyPolicy, Map, Number, Separators, Value,
};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

fn sample_order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
        note: None,
    }
}

#[test]
fn test_nested_user_with_four_space_indent() {
    let data = value!({
        "user": {
            "name": "William Williams",
            "age": 93
        }
    });

    let json = to_string_with_options(&data, &EncodeOptions::new().with_indent(4)).unwrap();
    assert_eq!(
        json,
        "{\n    \"user\": {\n        \"name\": \"William Williams\",\n        \"age\": 93\n    }\n}"
    );
    assert_eq!(decode(&json).unwrap(), data);
}

#[test]
fn test_tuple_encodes_as_array() {
    let options = EncodeOptions::new().with_separators(Separators::spaced());
    let json = to_string_with_options(&(8, "Q"), &options).unwrap();
    assert_eq!(json, r#"[8, "Q"]"#);

    let value = decode(&json).unwrap();
    assert_eq!(value, Value::from(vec![Value::from(8), Value::from("Q")]));

    // Fixed-size shape is not recorded, so a list reads it back just as well.
    let list: Vec<Value> = from_str(&json).unwrap();
    assert_eq!(list.len(), 2);
    let tuple: (i32, String) = from_str(&json).unwrap();
    assert_eq!(tuple, (8, "Q".to_string()));
}

#[test]
fn test_nested_struct_roundtrip() {
    let order = sample_order();
    let json = to_string_pretty(&order).unwrap();
    let back: Order = from_str(&json).unwrap();
    assert_eq!(back, order);
}

#[test]
fn test_invalid_input_is_parse_error() {
    let err = decode("{invalid").unwrap_err();
    assert_eq!(err.offset(), Some(1));
    assert!(matches!(err, Error::Parse { line: 1, column: 2, .. }));

    for bad in ["", "[1, 2", "{\"a\" 1}", "[1 2]", "tru", "\"\\q\"", "[01]", "{} {}"] {
        assert!(
            matches!(decode(bad), Err(Error::Parse { .. })),
            "{:?} should not parse",
            bad
        );
    }
}

struct Opaque;

impl Serialize for Opaque {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        hooks::serialize_opaque("Opaque", &(), serializer)
    }
}

#[test]
fn test_opaque_type_without_fallback() {
    let err = to_string(&vec![Opaque]).unwrap_err();
    assert_eq!(err, Error::unserializable("Opaque"));
    assert_eq!(err.to_string(), "Object of type Opaque is not JSON serializable");
}

#[test]
fn test_fallback_errors_reach_caller() {
    let fallback = hooks::fallback_fn(|unknown: &Unknown| {
        Err(Error::hook(format!("cannot encode {}", unknown.type_name())))
    });
    let options = EncodeOptions::new().with_hooks(&fallback);
    assert_eq!(
        to_string_with_options(&Opaque, &options),
        Err(Error::hook("cannot encode Opaque"))
    );
}

#[test]
fn test_non_finite_floats_through_fallback() {
    let fallback = hooks::fallback_fn(|unknown: &Unknown| match unknown.type_name() {
        "f64" => Ok(Value::Null),
        other => Err(Error::unserializable(other)),
    });
    let options = EncodeOptions::new().with_hooks(&fallback);
    let json = to_string_with_options(&[1.5, f64::NAN, f64::NEG_INFINITY], &options).unwrap();
    assert_eq!(json, "[1.5,null,null]");
}

#[test]
fn test_key_policy() {
    let mut scores = BTreeMap::new();
    scores.insert(1, "gold");
    scores.insert(2, "silver");

    assert_eq!(to_string(&scores), Err(Error::key_type("integer")));

    let options = EncodeOptions::new().with_key_policy(KeyPolicy::Stringify);
    let json = to_string_with_options(&scores, &options).unwrap();
    assert_eq!(json, r#"{"1":"gold","2":"silver"}"#);

    let back: BTreeMap<i32, String> = from_str(&json).unwrap();
    assert_eq!(back.get(&2).map(String::as_str), Some("silver"));
}

#[test]
fn test_sort_keys_and_separators() {
    let mut map = HashMap::new();
    map.insert("zeta".to_string(), 1);
    map.insert("alpha".to_string(), 2);
    map.insert("mid".to_string(), 3);

    let options = EncodeOptions::new()
        .with_sort_keys(true)
        .with_separators(Separators::spaced());
    assert_eq!(
        to_string_with_options(&map, &options).unwrap(),
        r#"{"alpha": 2, "mid": 3, "zeta": 1}"#
    );
}

#[test]
fn test_ascii_only() {
    let text = "naïve café ✓";
    assert_eq!(to_string(&text).unwrap(), "\"naïve café ✓\"");

    let options = EncodeOptions::new().with_ascii_only(true);
    let json = to_string_with_options(&text, &options).unwrap();
    assert_eq!(json, r#""na\u00efve caf\u00e9 \u2713""#);
    assert!(json.is_ascii());
    assert_eq!(from_str::<String>(&json).unwrap(), text);
}

#[test]
fn test_insertion_order_preserved() {
    let json = r#"{"b": 1, "a": 2, "c": 3}"#;
    let value = decode(json).unwrap();
    assert_eq!(to_string(&value).unwrap(), r#"{"b":1,"a":2,"c":3}"#);
}

#[test]
fn test_integer_precision() {
    let json = "[18446744073709551616, -170141183460469231731687303715884105729, 3.0e2]";
    let value = decode(json).unwrap();
    let items = value.as_array().unwrap();

    let expected: BigInt = "18446744073709551616".parse().unwrap();
    assert_eq!(items[0].as_bigint(), Some(&expected));
    assert!(items[1].as_bigint().is_some());
    assert_eq!(items[2], Value::Number(Number::Float(300.0)));

    assert_eq!(
        to_string(&value).unwrap(),
        "[18446744073709551616,-170141183460469231731687303715884105729,300.0]"
    );
}

#[test]
fn test_big_integers_across_serde_formats() {
    let digits = "123456789012345678901234567890123456789012345";
    let huge = decode(digits).unwrap();

    // Wider than u128: other formats see the decimal digits as a string.
    let via_json = serde_json::to_string(&huge).unwrap();
    assert_eq!(via_json, format!("\"{}\"", digits));

    let typed: Value = from_str(digits).unwrap();
    assert_eq!(typed, huge);

    let wide = decode("340282366920938463463374607431768211455").unwrap();
    assert_eq!(serde_json::to_string(&wide).unwrap(), "340282366920938463463374607431768211455");
}

#[test]
fn test_output_matches_serde_json() {
    let order = sample_order();
    assert_eq!(to_string(&order).unwrap(), serde_json::to_string(&order).unwrap());
    assert_eq!(
        to_string_pretty(&order).unwrap(),
        serde_json::to_string_pretty(&order).unwrap()
    );

    let tricky = "tab\tquote\"slash\\nul\u{0}del\u{7f}/";
    assert_eq!(to_string(&tricky).unwrap(), serde_json::to_string(&tricky).unwrap());
}

#[test]
fn test_reads_serde_json_output() {
    let order = sample_order();
    let json = serde_json::to_string_pretty(&order).unwrap();
    let back: Order = from_str(&json).unwrap();
    assert_eq!(back, order);

    let ours = to_value(&order).unwrap();
    assert_eq!(decode(&json).unwrap(), ours);
}

#[test]
fn test_writer_receives_full_document() {
    let mut buffer = Vec::new();
    to_writer_with_options(&mut buffer, &sample_order(), &EncodeOptions::pretty()).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text, to_string_pretty(&sample_order()).unwrap());
}

#[test]
fn test_enum_roundtrip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Event {
        Started,
        Progress(u8),
        Moved { x: i32, y: i32 },
    }

    let events = vec![Event::Started, Event::Progress(50), Event::Moved { x: -1, y: 2 }];
    let json = to_string(&events).unwrap();
    assert_eq!(json, r#"["Started",{"Progress":50},{"Moved":{"x":-1,"y":2}}]"#);
    assert_eq!(json, serde_json::to_string(&events).unwrap());
    let back: Vec<Event> = from_str(&json).unwrap();
    assert_eq!(back, events);
}

#[test]
fn test_type_mismatch_on_typed_decode() {
    let err = from_str::<User>(r#"{"id": "one", "name": "A", "active": true, "tags": []}"#)
        .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "{:?}", err);
}

#[test]
fn test_hook_replacement_can_be_any_value() {
    let hook = hooks::object_hook_fn(|map: Map| {
        Ok(match map.get("kind").and_then(Value::as_str) {
            Some("point") => Value::from("a point"),
            _ => Value::Object(map),
        })
    });
    let options = hookjson::DecodeOptions::new().with_hooks(&hook);
    let value = decode_with_options(
        r#"{"shapes": [{"kind": "point"}, {"kind": "line"}]}"#,
        &options,
    )
    .unwrap();
    let shapes = value.get("shapes").and_then(Value::as_array).unwrap();
    assert_eq!(shapes[0], Value::from("a point"));
    assert!(shapes[1].is_object());
}

#[test]
fn test_fixture_reads_from_file() {
    let file = std::fs::File::open("tests/fixtures/todos.json").unwrap();
    let todos: Vec<Value> = from_reader(file).unwrap();
    assert_eq!(todos.len(), 20);
    assert!(todos.iter().all(|t| t.get("userId").and_then(Value::as_u64).is_some()));
}

#[test]
fn test_deep_output_needs_larger_max_depth() {
    let mut deep = Value::Null;
    for _ in 0..200 {
        deep = Value::Array(vec![deep]);
    }
    let text = to_string(&deep).unwrap();

    match decode(&text) {
        Err(Error::Parse { msg, .. }) => assert_eq!(msg, "maximum nesting depth exceeded"),
        other => panic!("expected depth error, got {:?}", other),
    }

    let options = hookjson::DecodeOptions::new().with_max_depth(256);
    assert_eq!(decode_with_options(&text, &options).unwrap(), deep);
}

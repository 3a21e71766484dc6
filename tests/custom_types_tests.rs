//! Complex numbers through the fallback encoder and the object hook.

use hookjson::hooks::{self, Chain, Unknown};
use hookjson::{
    decode_with_options, from_str, from_str_with_options, from_value, to_string,
    to_string_with_options, DecodeOptions, EncodeOptions, Error, Hooks, Map, Value,
};
use serde::{Deserialize, Serialize, Serializer};

const COMPLEX_SENTINEL: &str = "__complex__";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
struct Complex {
    real: f64,
    imaginary: f64,
}

impl Serialize for Complex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        hooks::serialize_opaque("Complex", &(self.real, self.imaginary), serializer)
    }
}

/// Splits an opaque complex description into its two parts.
fn parts(unknown: &Unknown) -> hookjson::Result<(Value, Value)> {
    match (unknown.type_name(), unknown.repr().as_array().map(Vec::as_slice)) {
        ("Complex", Some([re, im])) => Ok((re.clone(), im.clone())),
        (other, _) => Err(Error::unserializable(other)),
    }
}

/// Encodes complex numbers as `[real, imaginary]`.
struct AsPair;

impl Hooks for AsPair {
    fn encode_unknown(&self, value: &Unknown) -> hookjson::Result<Value> {
        let (re, im) = parts(value)?;
        Ok(Value::from(vec![re, im]))
    }
}

/// Encodes complex numbers as tagged objects and rebuilds them on decode.
struct Tagged;

impl Hooks for Tagged {
    fn encode_unknown(&self, value: &Unknown) -> hookjson::Result<Value> {
        let (re, im) = parts(value)?;
        Ok(hooks::tagged(
            COMPLEX_SENTINEL,
            [("real".to_string(), re), ("imaginary".to_string(), im)],
        ))
    }

    fn post_decode_object(&self, map: Map) -> hookjson::Result<Value> {
        match hooks::untag(map, COMPLEX_SENTINEL) {
            Ok(fields) => {
                if fields.contains_key("real") && fields.contains_key("imaginary") {
                    Ok(Value::Object(fields))
                } else {
                    Err(Error::hook("complex object needs `real` and `imaginary`"))
                }
            }
            Err(map) => Ok(Value::Object(map)),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Circuit {
    name: String,
    impedance: Complex,
}

#[test]
fn test_complex_without_fallback_fails() {
    let err = to_string(&Complex {
        real: 3.0,
        imaginary: 5.0,
    })
    .unwrap_err();
    assert_eq!(err, Error::unserializable("Complex"));
}

#[test]
fn test_complex_as_pair() {
    let z = Complex {
        real: 3.0,
        imaginary: 5.0,
    };
    let json = to_string_with_options(&z, &EncodeOptions::new().with_hooks(&AsPair)).unwrap();
    assert_eq!(json, "[3.0,5.0]");

    let (real, imaginary): (f64, f64) = from_str(&json).unwrap();
    assert_eq!(Complex { real, imaginary }, z);
}

#[test]
fn test_complex_tagged_roundtrip() {
    let z = Complex {
        real: 3.0,
        imaginary: 5.0,
    };
    let json = to_string_with_options(&z, &EncodeOptions::new().with_hooks(&Tagged)).unwrap();
    assert_eq!(json, r#"{"__complex__":true,"real":3.0,"imaginary":5.0}"#);

    let options = DecodeOptions::new().with_hooks(&Tagged);
    let back: Complex = from_str_with_options(&json, &options).unwrap();
    assert_eq!(back, z);
}

#[test]
fn test_nested_complex_roundtrip() {
    let circuit = Circuit {
        name: "rc".to_string(),
        impedance: Complex {
            real: 50.0,
            imaginary: -12.5,
        },
    };
    let json = to_string_with_options(
        &circuit,
        &EncodeOptions::pretty().with_hooks(&Tagged),
    )
    .unwrap();
    assert!(json.contains("\"__complex__\": true"));

    let back: Circuit =
        from_str_with_options(&json, &DecodeOptions::new().with_hooks(&Tagged)).unwrap();
    assert_eq!(back, circuit);
}

#[test]
fn test_untagged_objects_pass_through() {
    let options = DecodeOptions::new().with_hooks(&Tagged);
    let value = decode_with_options(r#"{"__complex__": false, "real": 1}"#, &options).unwrap();
    assert_eq!(value.get("__complex__"), Some(&Value::Bool(false)));
}

#[test]
fn test_hook_error_aborts_decode() {
    let options = DecodeOptions::new().with_hooks(&Tagged);
    let err = decode_with_options(r#"[{"__complex__": true, "real": 1.0}]"#, &options).unwrap_err();
    assert_eq!(err, Error::hook("complex object needs `real` and `imaginary`"));
}

#[test]
fn test_chain_mixes_strategies() {
    // Pairs on the way out, tagged objects understood on the way in.
    let hooks = Chain {
        encode: AsPair,
        decode: Tagged,
    };
    let values = vec![Complex {
        real: 1.0,
        imaginary: 2.0,
    }];
    let json = to_string_with_options(&values, &EncodeOptions::new().with_hooks(&hooks)).unwrap();
    assert_eq!(json, "[[1.0,2.0]]");

    let tagged_text = r#"[{"__complex__": true, "real": 1.0, "imaginary": 2.0}]"#;
    let value = decode_with_options(tagged_text, &DecodeOptions::new().with_hooks(&hooks)).unwrap();
    let back: Vec<Complex> = from_value(value).unwrap();
    assert_eq!(back, values);
}

#[test]
fn test_fallback_sees_other_unknowns() {
    let options = EncodeOptions::new().with_hooks(&AsPair);
    assert_eq!(
        to_string_with_options(&f64::INFINITY, &options),
        Err(Error::unserializable("f64"))
    );
}

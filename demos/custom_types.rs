//! Complex numbers through a fallback encoder and an object hook.
//!
//! Run with: cargo run --example custom_types

use hookjson::hooks::{self, Unknown};
use hookjson::{
    from_str_with_options, to_string_with_options, DecodeOptions, EncodeOptions, Error, Hooks,
    Map, Value,
};
use serde::{Deserialize, Serialize, Serializer};

const SENTINEL: &str = "__complex__";

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

struct ComplexHooks;

impl Hooks for ComplexHooks {
    fn encode_unknown(&self, value: &Unknown) -> hookjson::Result<Value> {
        match (value.type_name(), value.repr().as_array().map(Vec::as_slice)) {
            ("Complex", Some([re, im])) => Ok(hooks::tagged(
                SENTINEL,
                [
                    ("real".to_string(), re.clone()),
                    ("imaginary".to_string(), im.clone()),
                ],
            )),
            (other, _) => Err(Error::unserializable(other)),
        }
    }

    fn post_decode_object(&self, map: Map) -> hookjson::Result<Value> {
        Ok(match hooks::untag(map, SENTINEL) {
            Ok(fields) => Value::Object(fields),
            Err(map) => Value::Object(map),
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let z = Complex {
        real: 3.0,
        imaginary: 5.0,
    };

    if let Err(e) = hookjson::to_string(&z) {
        println!("Without hooks: {}\n", e);
    }

    let pair = hooks::fallback_fn(|unknown: &Unknown| Ok(unknown.repr().clone()));
    let as_pair = to_string_with_options(&z, &EncodeOptions::new().with_hooks(&pair))?;
    println!("As a pair: {}", as_pair);

    let tagged = to_string_with_options(&z, &EncodeOptions::new().with_hooks(&ComplexHooks))?;
    println!("Tagged:    {}", tagged);

    let back: Complex =
        from_str_with_options(&tagged, &DecodeOptions::new().with_hooks(&ComplexHooks))?;
    assert_eq!(back, z);
    println!("\n✓ Reconstructed {:?}", back);

    Ok(())
}

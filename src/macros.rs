/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Leaf expressions go through [`to_value`](crate::to_value); one that cannot
/// be represented becomes `null`.
///
/// ```rust
/// use hookjson::value;
///
/// let user = value!({
///     "name": "Alice",
///     "roles": ["admin", "dev"],
///     "manager": null
/// });
/// assert_eq!(user.to_string(), r#"{"name":"Alice","roles":["admin","dev"],"manager":null}"#);
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(42), Value::from(42));
        assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_nested() {
        assert_eq!(value!({}), Value::Object(Map::new()));

        let obj = value!({
            "id": 7,
            "tags": ["a", "b"],
            "meta": {"done": false}
        });
        assert_eq!(obj.get("id"), Some(&Value::from(7)));
        assert_eq!(obj.get("tags").and_then(Value::as_array).map(Vec::len), Some(2));
        assert_eq!(obj.get("meta").and_then(|m| m.get("done")), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_unrepresentable_leaf_becomes_null() {
        assert_eq!(value!(f64::NAN), Value::Null);
    }
}

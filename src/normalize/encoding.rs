//! Query-string building for `form_params` and `query`

use serde_json::Value;
use url::form_urlencoded;

use crate::options::Params;

/// Escaping flavour for [`build_query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEncoding {
    /// `application/x-www-form-urlencoded`: space becomes `+`.
    FormUrlEncoded,
    /// RFC 3986: space becomes `%20`, `~` stays literal.
    Rfc3986,
}

/// Encode `params` as `key=value` pairs joined by `&`, in mapping order.
///
/// Nested arrays expand to `key[0]`, `key[1]`, ...; nested objects to
/// `key[name]`. Nulls are skipped and booleans become `1` / `0`.
pub fn build_query(params: &Params, encoding: QueryEncoding) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key.clone(), value, &mut pairs);
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key, encoding), encode(value, encoding)))
        .collect::<Vec<_>>()
        .join("&")
}

fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => out.push((prefix, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => out.push((prefix, number.to_string())),
        Value::String(text) => out.push((prefix, text.clone())),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                flatten(format!("{}[{}]", prefix, idx), item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten(format!("{}[{}]", prefix, key), item, out);
            }
        }
    }
}

fn encode(input: &str, encoding: QueryEncoding) -> String {
    // byte_serialize leaves alphanumerics and `*-._` alone and writes space
    // as `+`; a literal `+` always comes out as `%2B`.
    let form: String = form_urlencoded::byte_serialize(input.as_bytes()).collect();
    let form = form.replace('*', "%2A");
    match encoding {
        QueryEncoding::FormUrlEncoded => form,
        QueryEncoding::Rfc3986 => form.replace('+', "%20").replace("%7E", "~"),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_query, QueryEncoding};
    use crate::options::Params;
    use serde_json::json;

    fn params(value: serde_json::Value) -> Params {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn form_encoding_expands_arrays_with_indices() {
        let form = params(json!({"foo": "bar", "baz": ["hi", "there!"]}));
        assert_eq!(
            build_query(&form, QueryEncoding::FormUrlEncoded),
            "foo=bar&baz%5B0%5D=hi&baz%5B1%5D=there%21"
        );
    }

    #[test]
    fn nested_objects_use_named_brackets() {
        let form = params(json!({"user": {"name": "a b", "tags": ["x"]}}));
        assert_eq!(
            build_query(&form, QueryEncoding::FormUrlEncoded),
            "user%5Bname%5D=a+b&user%5Btags%5D%5B0%5D=x"
        );
    }

    #[test]
    fn rfc3986_differs_only_in_space_and_tilde() {
        let query = params(json!({"q": "a b~c*d+e"}));
        assert_eq!(
            build_query(&query, QueryEncoding::Rfc3986),
            "q=a%20b~c%2Ad%2Be"
        );
        assert_eq!(
            build_query(&query, QueryEncoding::FormUrlEncoded),
            "q=a+b%7Ec%2Ad%2Be"
        );
    }

    #[test]
    fn scalars_are_stringified_and_nulls_skipped() {
        let query = params(json!({"on": true, "off": false, "n": 3, "gone": null}));
        assert_eq!(build_query(&query, QueryEncoding::Rfc3986), "on=1&off=0&n=3");
    }

    #[test]
    fn keeps_insertion_order() {
        let query = params(json!({"z": "1", "a": "2", "m": "3"}));
        assert_eq!(build_query(&query, QueryEncoding::Rfc3986), "z=1&a=2&m=3");
    }

    #[test]
    fn empty_mapping_encodes_to_empty_string() {
        assert_eq!(build_query(&Params::new(), QueryEncoding::Rfc3986), "");
    }
}

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Accept ids sent either as JSON strings or numbers
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or integer id")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::string_or_number")]
        id: String,
    }

    #[test]
    fn test_string_or_number() {
        let a: Row = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        let c: Row = serde_json::from_str(r#"{"id": -1}"#).unwrap();
        assert_eq!(a.id, "abc");
        assert_eq!(b.id, "42");
        assert_eq!(c.id, "-1");
        assert!(serde_json::from_str::<Row>(r#"{"id": true}"#).is_err());
    }
}

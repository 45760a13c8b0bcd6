use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Treats a missing or empty query value as `None`, otherwise parses a UUID.
///
/// `?authorId=` arrives as an empty string rather than an absent key.
pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        id: Option<Uuid>,
    }

    #[test]
    fn test_empty_and_missing_are_none() {
        let f: Filter = serde_json::from_str(r#"{"id":""}"#).unwrap();
        assert!(f.id.is_none());
        let f: Filter = serde_json::from_str("{}").unwrap();
        assert!(f.id.is_none());
    }

    #[test]
    fn test_parses_uuid() {
        let id = Uuid::new_v4();
        let f: Filter = serde_json::from_str(&format!(r#"{{"id":"{}"}}"#, id)).unwrap();
        assert_eq!(f.id, Some(id));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Filter>(r#"{"id":"42"}"#).is_err());
    }
}

//! Tri-state field values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that may be absent, explicitly null, or set.
///
/// `Absent` leaves the server-side value untouched, `Null` clears it.
/// Struct fields of this type need `#[serde(default)]` so a missing key
/// deserializes as `Absent`, and `skip_serializing_if = "Patch::is_absent"`
/// so it is omitted again on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    /// Returns the value if set.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the patch, returning the value if set.
    pub fn into_value(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }

    /// `Some(v)` becomes `Value(v)`, `None` becomes `Null`.
    pub fn nullable(value: Option<T>) -> Self {
        value.map_or(Patch::Null, Patch::Value)
    }

    /// `Some(v)` becomes `Value(v)`, `None` becomes `Absent`.
    pub fn optional(value: Option<T>) -> Self {
        value.map_or(Patch::Absent, Patch::Value)
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Value(value)
    }
}

impl From<&str> for Patch<String> {
    fn from(value: &str) -> Self {
        Patch::Value(value.to_string())
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Value(v) => v.serialize(serializer),
            Patch::Absent | Patch::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Patch::nullable(Option::<T>::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Form {
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        expires_at: Patch<String>,
    }

    #[test]
    fn distinguishes_null_from_absent() {
        let absent: Form = serde_json::from_value(json!({})).unwrap();
        let null: Form = serde_json::from_value(json!({"expires_at": null})).unwrap();
        let set: Form = serde_json::from_value(json!({"expires_at": "x"})).unwrap();
        assert!(absent.expires_at.is_absent());
        assert!(null.expires_at.is_null());
        assert_eq!(set.expires_at.value().map(String::as_str), Some("x"));
    }

    #[test]
    fn serializes_back_to_same_shape() {
        assert_eq!(serde_json::to_value(Form::default()).unwrap(), json!({}));
        let null = Form {
            expires_at: Patch::Null,
        };
        assert_eq!(serde_json::to_value(null).unwrap(), json!({"expires_at": null}));
    }
}

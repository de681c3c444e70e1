use serde_derive::Serialize;
use std::collections::BTreeMap;

/// The comparable form of a value, on either side of a check.
///
/// Scalars are reduced to their string form so that `1`, `"1"` and a live `1` all compare
/// equal. A missing attribute and a `null` are both `Absent`.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    Absent,
    Scalar(String),
    List(Vec<Resolved>),
    Map(BTreeMap<String, Resolved>),
}

impl Resolved {
    pub fn scalar<S: Into<String>>(s: S) -> Self {
        Self::Scalar(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Read `key` out of a live attribute map. A missing key is `Absent`.
    pub fn lookup(attributes: &serde_json::Map<String, serde_json::Value>, key: &str) -> Self {
        attributes.get(key).map(Self::from).unwrap_or(Self::Absent)
    }
}

impl From<&serde_json::Value> for Resolved {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::Bool(b) => Self::Scalar(b.to_string()),
            serde_json::Value::Number(n) => Self::Scalar(n.to_string()),
            serde_json::Value::String(s) => Self::Scalar(s.clone()),
            serde_json::Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Resolved {
    fn from(value: serde_json::Value) -> Self {
        (&value).into()
    }
}

impl std::fmt::Display for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolved::Absent => write!(f, "<absent>"),
            Resolved::Scalar(s) => write!(f, "{}", s),
            composite => {
                let json = serde_json::to_string(composite).map_err(|_| std::fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

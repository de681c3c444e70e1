use super::SymbolicRef;
use serde_derive::Deserialize;
use std::collections::BTreeMap;
use thiserror::*;

pub const REF_KEY: &str = "Ref";
pub const GET_ATT_KEY: &str = "Fn::GetAtt";
static INTRINSIC_PREFIX: &str = "Fn::";

/// A value as it was written in a template, before any reference has been resolved.
///
/// Templates in their JSON form spell `!Ref X` as `{"Ref": "X"}` and `!GetAtt X.Y` as
/// `{"Fn::GetAtt": ["X", "Y"]}`. Both become a `Reference`. Every other `Fn::*` function is kept
/// as an opaque `Intrinsic` so that resolving it can fail with a precise error.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum DeclaredValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<DeclaredValue>),
    Map(BTreeMap<String, DeclaredValue>),
    Reference(SymbolicRef),
    Intrinsic {
        name: String,
        args: serde_json::Value,
    },
}

impl DeclaredValue {
    pub fn as_list(&self) -> Option<&[DeclaredValue]> {
        match self {
            DeclaredValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, DeclaredValue>> {
        match self {
            DeclaredValue::Map(map) => Some(map),
            _ => None,
        }
    }

    fn decode_get_att(args: serde_json::Value) -> Result<SymbolicRef, DeclaredValueError> {
        match args {
            serde_json::Value::Array(parts) => match parts.as_slice() {
                [serde_json::Value::String(id), serde_json::Value::String(attr)] => {
                    Ok(SymbolicRef::get_att(id.as_str(), attr.as_str()))
                }
                _ => Err(DeclaredValueError::MalformedGetAtt {
                    args: serde_json::Value::Array(parts),
                }),
            },
            serde_json::Value::String(dotted) => match dotted.split_once('.') {
                Some((id, attr)) if !id.is_empty() && !attr.is_empty() => {
                    Ok(SymbolicRef::get_att(id, attr))
                }
                _ => Err(DeclaredValueError::MalformedGetAtt {
                    args: serde_json::Value::String(dotted),
                }),
            },
            args => Err(DeclaredValueError::MalformedGetAtt { args }),
        }
    }

    fn decode_object(
        mut map: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, DeclaredValueError> {
        if map.len() == 1 {
            // NOTE: single-key objects are the only place intrinsics can show up, so a map with
            // a `Ref` key and anything else is plain data.
            let key = map.keys().next().cloned().unwrap_or_default();
            if key == REF_KEY {
                return match map.remove(REF_KEY) {
                    Some(serde_json::Value::String(id)) => {
                        Ok(Self::Reference(SymbolicRef::reference(id)))
                    }
                    other => Err(DeclaredValueError::MalformedRef {
                        args: other.unwrap_or_default(),
                    }),
                };
            }
            if key == GET_ATT_KEY {
                let args = map.remove(GET_ATT_KEY).unwrap_or_default();
                return Self::decode_get_att(args).map(Self::Reference);
            }
            if key.starts_with(INTRINSIC_PREFIX) {
                let args = map.remove(&key).unwrap_or_default();
                return Ok(Self::Intrinsic { name: key, args });
            }
        }

        let mut out = BTreeMap::new();
        for (k, v) in map {
            out.insert(k, v.try_into()?);
        }
        Ok(Self::Map(out))
    }
}

impl TryFrom<serde_json::Value> for DeclaredValue {
    type Error = DeclaredValueError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => Ok(Self::Number(n)),
            serde_json::Value::String(s) => Ok(Self::String(s)),
            serde_json::Value::Array(items) => Ok(Self::List(
                items
                    .into_iter()
                    .map(DeclaredValue::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            serde_json::Value::Object(map) => Self::decode_object(map),
        }
    }
}

impl From<SymbolicRef> for DeclaredValue {
    fn from(value: SymbolicRef) -> Self {
        Self::Reference(value)
    }
}

impl From<&str> for DeclaredValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DeclaredValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for DeclaredValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl std::fmt::Display for DeclaredValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclaredValue::Null => write!(f, "null"),
            DeclaredValue::Bool(b) => write!(f, "{}", b),
            DeclaredValue::Number(n) => write!(f, "{}", n),
            DeclaredValue::String(s) => write!(f, "{}", s),
            DeclaredValue::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            DeclaredValue::Map(map) => {
                write!(f, "{{")?;
                for (idx, (k, v)) in map.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            DeclaredValue::Reference(r) => write!(f, "{}", r),
            DeclaredValue::Intrinsic { name, args } => write!(f, "{{{}: {}}}", name, args),
        }
    }
}

#[derive(Error, Debug)]
pub enum DeclaredValueError {
    #[error("Expected `Ref` to name a logical id, but found {args}")]
    MalformedRef { args: serde_json::Value },

    #[error("Expected `Fn::GetAtt` to be `[LogicalId, Attribute]` or \"LogicalId.Attribute\", but found {args}")]
    MalformedGetAtt { args: serde_json::Value },
}

use serde_derive::{Deserialize, Serialize};

/// A pointer from one declared resource to another resource in the same deployment.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymbolicRef {
    /// Points at the physical identifier of another resource.
    Ref { logical_id: String },

    /// Points at a named attribute of another resource.
    GetAtt {
        logical_id: String,
        attribute: String,
    },
}

impl SymbolicRef {
    pub fn reference<S: Into<String>>(logical_id: S) -> Self {
        Self::Ref {
            logical_id: logical_id.into(),
        }
    }

    pub fn get_att<L, A>(logical_id: L, attribute: A) -> Self
    where
        L: Into<String>,
        A: Into<String>,
    {
        Self::GetAtt {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }

    pub fn logical_id(&self) -> &str {
        match self {
            SymbolicRef::Ref { logical_id } => logical_id,
            SymbolicRef::GetAtt { logical_id, .. } => logical_id,
        }
    }
}

impl std::fmt::Display for SymbolicRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolicRef::Ref { logical_id } => write!(f, "!Ref {}", logical_id),
            SymbolicRef::GetAtt {
                logical_id,
                attribute,
            } => write!(f, "!GetAtt {}.{}", logical_id, attribute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::Arbitrary;

    impl Arbitrary for SymbolicRef {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            if bool::arbitrary(g) {
                Self::reference(String::arbitrary(g))
            } else {
                Self::get_att(String::arbitrary(g), String::arbitrary(g))
            }
        }
    }

    #[test]
    fn displays_like_the_yaml_short_form() {
        assert_eq!(SymbolicRef::reference("Sg").to_string(), "!Ref Sg");
        assert_eq!(
            SymbolicRef::get_att("Lb", "DNSName").to_string(),
            "!GetAtt Lb.DNSName"
        );
    }

    #[quickcheck]
    fn logical_id_is_shared_by_both_variants(id: String, attr: String) {
        assert_eq!(SymbolicRef::reference(id.clone()).logical_id(), id);
        assert_eq!(SymbolicRef::get_att(id.clone(), attr).logical_id(), id);
    }
}

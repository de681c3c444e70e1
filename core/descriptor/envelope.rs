use super::DescriptorError;
use fxhash::FxHashMap;
use serde_derive::Deserialize;

static ROOT: &str = "$";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    pub fn key<S: Into<String>>(key: S) -> Self {
        Self::Key(key.into())
    }
}

/// A dotted path into a describe response, e.g. `Reservations.0.Instances.0`.
///
/// Numeric segments index into lists, anything else is an object key. `$` is the whole
/// response.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct EnvelopePath {
    segments: Vec<Segment>,
}

impl EnvelopePath {
    pub fn root() -> Self {
        Self { segments: vec![] }
    }

    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn select<'a>(&self, response: &'a serde_json::Value) -> Option<&'a serde_json::Value> {
        let mut cur = response;
        for segment in &self.segments {
            cur = match (segment, cur) {
                (Segment::Key(key), serde_json::Value::Object(map)) => map.get(key)?,
                (Segment::Index(idx), serde_json::Value::Array(items)) => items.get(*idx)?,
                _ => return None,
            };
        }
        Some(cur)
    }
}

impl std::str::FromStr for EnvelopePath {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ROOT {
            return Ok(Self::root());
        }

        let mut segments = vec![];
        for part in s.split('.') {
            if part.is_empty() {
                return Err(DescriptorError::InvalidPath {
                    path: s.to_string(),
                });
            }
            let segment = match part.parse::<usize>() {
                Ok(idx) => Segment::Index(idx),
                Err(_) => Segment::key(part),
            };
            segments.push(segment);
        }
        Ok(Self { segments })
    }
}

impl TryFrom<String> for EnvelopePath {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for EnvelopePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{}", ROOT);
        }
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                write!(f, ".")?;
            }
            match segment {
                Segment::Key(key) => write!(f, "{}", key)?,
                Segment::Index(i) => write!(f, "{}", i)?,
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUnwrapRule {
    One(EnvelopePath),
    Many(Vec<EnvelopePath>),
}

/// The candidate paths where a service keeps the described resource. The first path that
/// exists in a response wins.
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawUnwrapRule")]
pub struct UnwrapRule {
    paths: Vec<EnvelopePath>,
}

impl UnwrapRule {
    pub fn new(paths: Vec<EnvelopePath>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[EnvelopePath] {
        self.paths.as_ref()
    }

    pub fn select<'a>(&self, response: &'a serde_json::Value) -> Option<&'a serde_json::Value> {
        self.paths.iter().find_map(|path| path.select(response))
    }
}

impl From<RawUnwrapRule> for UnwrapRule {
    fn from(value: RawUnwrapRule) -> Self {
        match value {
            RawUnwrapRule::One(path) => Self::new(vec![path]),
            RawUnwrapRule::Many(paths) => Self::new(paths),
        }
    }
}

impl From<EnvelopePath> for UnwrapRule {
    fn from(value: EnvelopePath) -> Self {
        Self::new(vec![value])
    }
}

impl std::fmt::Display for UnwrapRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let paths: Vec<String> = self.paths.iter().map(ToString::to_string).collect();
        write!(f, "{}", paths.join(" | "))
    }
}

/// Service name to the rule that unwraps that service's describe responses.
///
/// Adding support for a new service is a new entry here, never a new branch in the resolver.
///
#[derive(Debug, Clone)]
pub struct EnvelopeRegistry {
    rules: FxHashMap<String, UnwrapRule>,
}

impl Default for EnvelopeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EnvelopeRegistry {
    pub fn empty() -> Self {
        Self {
            rules: FxHashMap::default(),
        }
    }

    /// The services we know how to unwrap out of the box.
    pub fn builtin() -> Self {
        let first_of = |key: &str| EnvelopePath::new(vec![Segment::key(key), Segment::Index(0)]);

        let mut registry = Self::empty();
        registry
            .register(
                "ec2",
                EnvelopePath::new(vec![
                    Segment::key("Reservations"),
                    Segment::Index(0),
                    Segment::key("Instances"),
                    Segment::Index(0),
                ]),
            )
            .register("autoscaling", first_of("AutoScalingGroups"))
            .register(
                "elbv2",
                UnwrapRule::new(vec![first_of("LoadBalancers"), first_of("Listeners")]),
            )
            .register("cloudformation", first_of("Stacks"))
            .register("rds", first_of("DBInstances"))
            .register("stepfunctions", EnvelopePath::root());
        registry
    }

    pub fn register<S, R>(&mut self, service: S, rule: R) -> &mut Self
    where
        S: Into<String>,
        R: Into<UnwrapRule>,
    {
        self.rules.insert(service.into(), rule.into());
        self
    }

    pub fn get(&self, service: &str) -> Option<&UnwrapRule> {
        self.rules.get(service)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_dotted_paths() {
        let path: EnvelopePath = "Reservations.0.Instances.0".parse().unwrap();
        assert_eq!(path.to_string(), "Reservations.0.Instances.0");
        assert_eq!("$".parse::<EnvelopePath>().unwrap(), EnvelopePath::root());
        assert_matches!(
            "Reservations..0".parse::<EnvelopePath>(),
            Err(DescriptorError::InvalidPath { .. })
        );
    }

    #[test]
    fn selects_the_sole_instance_out_of_an_ec2_response() {
        let response = json!({
            "Reservations": [{ "Instances": [{ "InstanceId": "i-1", "InstanceType": "t2.micro" }] }]
        });
        let rule = EnvelopeRegistry::builtin().get("ec2").cloned().unwrap();
        assert_eq!(
            rule.select(&response),
            Some(&json!({ "InstanceId": "i-1", "InstanceType": "t2.micro" }))
        );
    }

    #[test]
    fn falls_through_to_the_next_candidate_path() {
        let rule = EnvelopeRegistry::builtin().get("elbv2").cloned().unwrap();
        let listeners = json!({ "Listeners": [{ "Port": 443 }] });
        assert_eq!(rule.select(&listeners), Some(&json!({ "Port": 443 })));

        let balancers = json!({ "LoadBalancers": [{ "DNSName": "lb.example" }] });
        assert_eq!(
            rule.select(&balancers),
            Some(&json!({ "DNSName": "lb.example" }))
        );
    }

    #[test]
    fn empty_collections_do_not_match() {
        let rule = EnvelopeRegistry::builtin().get("autoscaling").cloned().unwrap();
        assert_eq!(rule.select(&json!({ "AutoScalingGroups": [] })), None);
    }

    #[test]
    fn rules_deserialize_from_a_single_path_or_a_list() {
        let one: UnwrapRule = serde_json::from_value(json!("SecurityGroups.0")).unwrap();
        assert_eq!(one.paths().len(), 1);
        let many: UnwrapRule = serde_json::from_value(json!(["A.0", "B.0"])).unwrap();
        assert_eq!(many.to_string(), "A.0 | B.0");
    }

    #[test]
    fn unknown_services_have_no_rule() {
        assert!(EnvelopeRegistry::builtin().get("sqs").is_none());
        assert!(EnvelopeRegistry::empty().is_empty());
    }
}

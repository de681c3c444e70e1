use super::TemplateError;
use crate::model::DeclaredValue;
use serde_derive::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::*;

static RESOURCES_KEY: &str = "Resources";
static TYPE_SEPARATOR: &str = "::";

pub type DeclaredProperties = BTreeMap<String, DeclaredValue>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ConfigurationOverride {
    #[serde(rename = "Properties", default)]
    properties: DeclaredProperties,
}

/// A resource as a template declares it.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeclaredResource {
    #[serde(rename = "Type")]
    resource_type: String,

    #[serde(rename = "Properties", default)]
    properties: DeclaredProperties,

    /// Per-type property overrides, keyed by the last segment of the type name
    /// (`Instance` for `AWS::EC2::Instance`).
    #[serde(rename = "Configuration", default)]
    configuration: BTreeMap<String, ConfigurationOverride>,
}

impl DeclaredResource {
    pub fn new<T: Into<String>>(resource_type: T, properties: DeclaredProperties) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties,
            configuration: BTreeMap::new(),
        }
    }

    pub fn resource_type(&self) -> &str {
        self.resource_type.as_ref()
    }

    pub fn properties(&self) -> &DeclaredProperties {
        &self.properties
    }

    /// `AWS::EC2::Instance` -> `Instance`
    pub fn type_suffix(&self) -> &str {
        self.resource_type
            .rsplit(TYPE_SEPARATOR)
            .next()
            .unwrap_or(&self.resource_type)
    }

    /// The declared properties with this type's configuration overrides laid on top.
    ///
    pub fn effective_properties(&self) -> DeclaredProperties {
        let mut properties = self.properties.clone();
        if let Some(overrides) = self.configuration.get(self.type_suffix()) {
            for (name, value) in &overrides.properties {
                properties.insert(name.clone(), value.clone());
            }
        }
        properties
    }
}

/// The declared resources of one template, keyed by logical id.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    resources: BTreeMap<String, DeclaredResource>,
}

impl Template {
    #[instrument(name = "Template::load")]
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| TemplateError::CouldNotReadTemplate {
                path: path.to_path_buf(),
                err,
            })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, TemplateError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// A full template has its resources under `Resources`; a bare object of resources is
    /// accepted too.
    ///
    pub fn from_value(value: serde_json::Value) -> Result<Self, TemplateError> {
        let resources = match value {
            serde_json::Value::Object(mut map) if map.contains_key(RESOURCES_KEY) => {
                map.remove(RESOURCES_KEY).unwrap_or_default()
            }
            serde_json::Value::Object(map) => serde_json::Value::Object(map),
            other => {
                return Err(TemplateError::NotAnObject {
                    found: other.to_string(),
                })
            }
        };
        let resources: BTreeMap<String, DeclaredResource> = serde_json::from_value(resources)?;
        debug!("Template declares {} resources", resources.len());
        Ok(Self { resources })
    }

    pub fn insert<S: Into<String>>(&mut self, logical_id: S, resource: DeclaredResource) -> &mut Self {
        self.resources.insert(logical_id.into(), resource);
        self
    }

    pub fn get(&self, logical_id: &str) -> Option<&DeclaredResource> {
        self.resources.get(logical_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DeclaredResource)> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolicRef;
    use serde_json::json;

    #[test]
    fn reads_resources_out_of_a_full_template() {
        let template = Template::from_value(json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Resources": {
                "WebServer": {
                    "Type": "AWS::EC2::Instance",
                    "DependsOn": "WebSg",
                    "Properties": {
                        "InstanceType": "t2.micro",
                        "SecurityGroupIds": [{ "Ref": "WebSg" }]
                    }
                },
                "WebSg": { "Type": "AWS::EC2::SecurityGroup" }
            }
        }))
        .unwrap();

        assert_eq!(template.len(), 2);
        let server = template.get("WebServer").unwrap();
        assert_eq!(server.resource_type(), "AWS::EC2::Instance");
        assert_eq!(
            server.properties().get("SecurityGroupIds"),
            Some(&DeclaredValue::List(vec![SymbolicRef::reference("WebSg").into()]))
        );
        assert!(template.get("WebSg").unwrap().properties().is_empty());
    }

    #[test]
    fn a_bare_resource_map_is_a_template() {
        let template = Template::from_json_str(
            r#"{ "Bucket": { "Type": "AWS::S3::Bucket", "Properties": { "BucketName": "b" } } }"#,
        )
        .unwrap();
        assert_eq!(template.get("Bucket").unwrap().type_suffix(), "Bucket");
    }

    #[test]
    fn configuration_overrides_replace_declared_properties() {
        let template = Template::from_value(json!({
            "WebServer": {
                "Type": "AWS::EC2::Instance",
                "Properties": { "InstanceType": "t2.micro", "KeyName": "dev" },
                "Configuration": {
                    "Instance": { "Properties": { "InstanceType": "t2.large" } },
                    "Bucket": { "Properties": { "KeyName": "ignored" } }
                }
            }
        }))
        .unwrap();

        let properties = template.get("WebServer").unwrap().effective_properties();
        assert_eq!(properties.get("InstanceType"), Some(&"t2.large".into()));
        assert_eq!(properties.get("KeyName"), Some(&"dev".into()));
    }

    #[test]
    fn non_objects_are_rejected() {
        assert_matches!(
            Template::from_value(json!(["not", "a", "template"])),
            Err(TemplateError::NotAnObject { .. })
        );
    }

    #[test]
    fn resources_without_a_type_fail_to_parse() {
        assert_matches!(
            Template::from_value(json!({ "Resources": { "A": { "Properties": {} } } })),
            Err(TemplateError::ParseError(_))
        );
    }
}

use super::{SchemaError, TypeSchema};
use fxhash::FxHashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::*;

/// All the known resource types, keyed by their type name.
///
/// Registration needs `&mut self`, so once the registry is behind an `Arc` it can no longer
/// change.
///
#[derive(Default, Debug, Clone)]
pub struct SchemaRegistry {
    schemas: FxHashMap<String, Arc<TypeSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(name = "SchemaRegistry::load")]
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| SchemaError::CouldNotReadRegistry {
                path: path.to_path_buf(),
                err,
            })?;
        let registry = Self::from_json_str(&contents)?;
        debug!("Loaded {} resource type schemas", registry.len());
        Ok(registry)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, SchemaError> {
        let schemas: FxHashMap<String, TypeSchema> = serde_json::from_str(contents)?;
        let mut registry = Self::new();
        for (resource_type, schema) in schemas {
            registry.register(resource_type, schema);
        }
        Ok(registry)
    }

    /// Register a schema under a resource type, replacing any previous one.
    ///
    pub fn register<S>(&mut self, resource_type: S, schema: TypeSchema) -> &mut Self
    where
        S: Into<String>,
    {
        self.schemas.insert(resource_type.into(), Arc::new(schema));
        self
    }

    pub fn get(&self, resource_type: &str) -> Option<Arc<TypeSchema>> {
        self.schemas.get(resource_type).cloned()
    }

    pub fn require(&self, resource_type: &str) -> Result<Arc<TypeSchema>, SchemaError> {
        self.get(resource_type)
            .ok_or_else(|| SchemaError::UnknownResourceType {
                resource_type: resource_type.to_string(),
            })
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.schemas.contains_key(resource_type)
    }

    /// The registered type names, sorted.
    pub fn resource_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    const REGISTRY: &str = r#"
    {
        "AWS::EC2::Instance": {
            "client": "ec2",
            "describe_method": "describe_instances",
            "id_param": "InstanceIds"
        },
        "AWS::AutoScaling::AutoScalingGroup": {
            "client": "autoscaling",
            "describe_method": "describe_auto_scaling_groups",
            "id_param": "AutoScalingGroupNames"
        }
    }
    "#;

    #[test]
    fn loads_a_registry_from_disk() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("resources.json");
        file.write_str(REGISTRY).unwrap();

        let registry = SchemaRegistry::load(file.path()).unwrap();
        assert_eq!(
            registry.resource_types(),
            vec!["AWS::AutoScaling::AutoScalingGroup", "AWS::EC2::Instance"]
        );
        assert_eq!(
            registry.require("AWS::EC2::Instance").unwrap().resolver(),
            "ec2"
        );
    }

    #[test]
    fn a_missing_file_is_reported_with_its_path() {
        let dir = assert_fs::TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        assert_matches!(
            SchemaRegistry::load(&path),
            Err(SchemaError::CouldNotReadRegistry { path: p, .. }) if p == path
        );
    }

    #[test]
    fn unknown_types_are_a_schema_error() {
        let registry = SchemaRegistry::from_json_str(REGISTRY).unwrap();
        assert!(!registry.contains("AWS::S3::Bucket"));
        assert_matches!(
            registry.require("AWS::S3::Bucket"),
            Err(SchemaError::UnknownResourceType { resource_type }) if resource_type == "AWS::S3::Bucket"
        );
    }

    #[test]
    fn malformed_registries_fail_to_parse() {
        assert_matches!(
            SchemaRegistry::from_json_str(r#"{ "AWS::EC2::Instance": { "client": "ec2" } }"#),
            Err(SchemaError::ParseError(_))
        );
    }
}

//! Shared fixtures for unit tests: a small deployment with an instance, its security group,
//! a load balancer, and a topic nobody wrote a schema for.
//!
use crate::descriptor::{
    DescribeRequest, DescriptorClient, DescriptorError, DescriptorResolver, EnvelopePath,
    LiveAttributes, SnapshotClient, UnwrapRule,
};
use crate::schema::{DefaultExpectation, SchemaRegistry, TypeSchema};
use crate::stack::{LiveResource, LiveResourceMap};
use crate::validator::ReferenceResolver;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const INSTANCE: &str = "AWS::EC2::Instance";
pub const SECURITY_GROUP: &str = "AWS::EC2::SecurityGroup";
pub const LOAD_BALANCER: &str = "AWS::ElasticLoadBalancingV2::LoadBalancer";
pub const TOPIC: &str = "AWS::SNS::Topic";

pub struct Fixture {
    pub schemas: SchemaRegistry,
    pub descriptors: DescriptorResolver,
    pub live: LiveResourceMap,
    pub snapshots: SnapshotClient,
}

impl Fixture {
    pub fn new() -> Self {
        let schemas = schemas();
        let snapshots = snapshots();
        let descriptors = DescriptorResolver::with_builtin_envelopes(Arc::new(snapshots.clone()));
        Self {
            schemas,
            descriptors,
            live: live_resources(),
            snapshots,
        }
    }

    pub fn resolver(&self) -> ReferenceResolver<'_> {
        ReferenceResolver::new(&self.schemas, &self.descriptors, &self.live)
    }

    /// The unwrapped live attributes of `WebServer`.
    pub fn instance_attributes(&self) -> LiveAttributes {
        let schema = self.schemas.require(INSTANCE).unwrap();
        self.descriptors.describe(&schema, "i-0abc").unwrap()
    }
}

fn schemas() -> SchemaRegistry {
    let mut schemas = SchemaRegistry::new();
    schemas
        .register(
            INSTANCE,
            TypeSchema::builder()
                .resolver("ec2")
                .lookup_method("describe_instances")
                .id_parameter("InstanceIds")
                .map_attribute("PublicIp", "PublicIpAddress")
                .map_attribute("PrivateIp", "PrivateIpAddress")
                .default_for(
                    "InstanceType",
                    DefaultExpectation::from(json!(["t2.micro", "t2.small"])),
                )
                .default_for(
                    "Monitoring",
                    DefaultExpectation::from(json!({ "State": "disabled" })),
                )
                .build()
                .unwrap(),
        )
        .register(
            SECURITY_GROUP,
            TypeSchema::builder()
                .resolver("ec2")
                .lookup_method("describe_security_groups")
                .id_parameter("GroupIds")
                .map_property("GroupDescription", "Description")
                .map_attribute("GroupId", "GroupId")
                .map_attribute("VpcId", "VpcId")
                .envelope(UnwrapRule::from(
                    "SecurityGroups.0".parse::<EnvelopePath>().unwrap(),
                ))
                .build()
                .unwrap(),
        )
        .register(
            LOAD_BALANCER,
            TypeSchema::builder()
                .resolver("elbv2")
                .lookup_method("describe_load_balancers")
                .id_parameter("LoadBalancerArns")
                .map_attribute("LoadBalancerName", "LoadBalancerName")
                .build()
                .unwrap(),
        );
    schemas
}

fn snapshots() -> SnapshotClient {
    let mut snapshots = SnapshotClient::new();
    snapshots.insert(
        "ec2",
        "describe_instances",
        "i-0abc",
        json!({
            "Reservations": [{
                "Instances": [{
                    "InstanceId": "i-0abc",
                    "InstanceType": "t2.micro",
                    "KeyName": "dev",
                    "SecurityGroupIds": ["sg-123"],
                    "SecurityGroups": [{ "GroupId": "sg-123", "GroupName": "web" }],
                    "PublicIpAddress": "203.0.113.7",
                    "PrivateIpAddress": "10.0.0.12",
                    "Monitoring": { "State": "disabled" },
                    "Tags": [
                        { "Key": "Name", "Value": "web" },
                        { "Key": "Env", "Value": "prod" }
                    ]
                }]
            }]
        }),
    );
    snapshots.insert(
        "ec2",
        "describe_security_groups",
        "sg-123",
        json!({
            "SecurityGroups": [{
                "GroupId": "sg-123",
                "Description": "web traffic",
                "VpcId": "vpc-1"
            }]
        }),
    );
    snapshots.insert(
        "elbv2",
        "describe_load_balancers",
        "arn:aws:elasticloadbalancing:lb/web",
        json!({
            "LoadBalancers": [{
                "LoadBalancerName": "web-lb",
                "DNSName": "web-lb-1.elb.amazonaws.com"
            }]
        }),
    );
    snapshots
}

fn live_resources() -> LiveResourceMap {
    let mut live = LiveResourceMap::new();
    live.insert("WebServer", LiveResource::new("i-0abc", INSTANCE))
        .insert("WebSg", LiveResource::new("sg-123", SECURITY_GROUP))
        .insert(
            "WebLb",
            LiveResource::new("arn:aws:elasticloadbalancing:lb/web", LOAD_BALANCER),
        )
        .insert(
            "Alerts",
            LiveResource::new("arn:aws:sns:us-east-1:1:alerts", TOPIC),
        );
    live
}

/// Wraps a client and counts how many describe calls went through it.
///
pub struct CountingClient<C> {
    inner: C,
    calls: Arc<AtomicUsize>,
}

impl<C: DescriptorClient> CountingClient<C> {
    pub fn wrap(inner: C) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl<C: DescriptorClient> DescriptorClient for CountingClient<C> {
    fn describe(&self, request: &DescribeRequest) -> Result<serde_json::Value, DescriptorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.describe(request)
    }
}

/// Panics when asked to describe one particular physical id.
///
pub struct PanickingClient<C> {
    inner: C,
    physical_id: String,
}

impl<C: DescriptorClient> PanickingClient<C> {
    pub fn on<S: Into<String>>(inner: C, physical_id: S) -> Self {
        Self {
            inner,
            physical_id: physical_id.into(),
        }
    }
}

impl<C: DescriptorClient> DescriptorClient for PanickingClient<C> {
    fn describe(&self, request: &DescribeRequest) -> Result<serde_json::Value, DescriptorError> {
        if request.physical_id == self.physical_id {
            panic!("describe blew up on {}", self.physical_id);
        }
        self.inner.describe(request)
    }
}

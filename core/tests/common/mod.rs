use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::path::PathBuf;

pub const SCHEMAS: &str = r#"
{
    "AWS::EC2::Instance": {
        "client": "ec2",
        "describe_method": "describe_instances",
        "id_param": "InstanceIds",
        "attribute_mapping": { "PublicIp": "PublicIpAddress" },
        "defaults": { "InstanceType": ["t2.micro", "t2.small"] }
    },
    "AWS::EC2::SecurityGroup": {
        "client": "ec2",
        "describe_method": "describe_security_groups",
        "id_param": "GroupIds",
        "property_mapping": { "GroupDescription": "Description" },
        "attribute_mapping": { "GroupId": "GroupId", "VpcId": "VpcId" },
        "envelope": "SecurityGroups.0"
    },
    "AWS::ElasticLoadBalancingV2::LoadBalancer": {
        "client": "elbv2",
        "describe_method": "describe_load_balancers",
        "id_param": "LoadBalancerArns",
        "attribute_mapping": { "LoadBalancerName": "LoadBalancerName" }
    }
}
"#;

pub const STACK_RESOURCES: &str = r#"
{
    "StackResources": [
        {
            "LogicalResourceId": "WebServer",
            "PhysicalResourceId": "i-0abc",
            "ResourceType": "AWS::EC2::Instance",
            "ResourceStatus": "CREATE_COMPLETE"
        },
        {
            "LogicalResourceId": "SGLogicalId",
            "PhysicalResourceId": "sg-123",
            "ResourceType": "AWS::EC2::SecurityGroup",
            "ResourceStatus": "CREATE_COMPLETE"
        },
        {
            "LogicalResourceId": "LBLogicalId",
            "PhysicalResourceId": "arn:aws:elasticloadbalancing:lb/web",
            "ResourceType": "AWS::ElasticLoadBalancingV2::LoadBalancer",
            "ResourceStatus": "CREATE_COMPLETE"
        },
        {
            "LogicalResourceId": "Alerts",
            "PhysicalResourceId": "arn:aws:sns:us-east-1:1:alerts",
            "ResourceType": "AWS::SNS::Topic",
            "ResourceStatus": "CREATE_COMPLETE"
        }
    ]
}
"#;

pub const SNAPSHOTS: &str = r#"
{
    "ec2": {
        "describe_instances": {
            "i-0abc": {
                "Reservations": [{
                    "Instances": [{
                        "InstanceId": "i-0abc",
                        "InstanceType": "t2.micro",
                        "SecurityGroupId": "sg-123",
                        "PublicIpAddress": "203.0.113.7",
                        "Tags": [
                            { "Key": "Name", "Value": "X" },
                            { "Key": "Env", "Value": "prod" }
                        ]
                    }]
                }]
            }
        },
        "describe_security_groups": {
            "sg-123": {
                "SecurityGroups": [{ "GroupId": "sg-123", "Description": "web", "VpcId": "vpc-1" }]
            }
        }
    },
    "elbv2": {
        "describe_load_balancers": {
            "arn:aws:elasticloadbalancing:lb/web": {
                "LoadBalancers": [{ "LoadBalancerName": "web", "DNSName": "web.elb.amazonaws.com" }]
            }
        }
    }
}
"#;

/// A temporary directory holding the four inputs of a validation run.
pub struct StackFiles {
    pub dir: TempDir,
}

impl StackFiles {
    pub fn new(template: &str) -> Self {
        let dir = TempDir::new().unwrap();
        dir.child("schemas.json").write_str(SCHEMAS).unwrap();
        dir.child("resources.json")
            .write_str(STACK_RESOURCES)
            .unwrap();
        dir.child("snapshots.json").write_str(SNAPSHOTS).unwrap();
        dir.child("template.json").write_str(template).unwrap();
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.child(name).path().to_path_buf()
    }
}

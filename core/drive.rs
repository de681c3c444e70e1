use crate::config::Config;
use crate::descriptor::DescriptorResolver;
use crate::events::{EventChannel, ResourceEvent, WorkflowEvent};
use crate::report::{Outcome, ResourceReport, StackReport};
use crate::schema::SchemaRegistry;
use crate::stack::LiveResourceMap;
use crate::template::{DeclaredResource, Template};
use crate::validator::{ReferenceResolver, ResourceValidator, ValidationError};
use crossbeam::deque::{Injector, Steal};
use std::sync::Arc;
use thiserror::*;
use tracing::*;

/// # Stack Validator
///
/// Walks every resource a template declares and checks it against its live counterpart.
///
/// Resources whose type has no schema are skipped. A declared resource that is missing from the
/// live stack fails with a reference error. Everything else is described through the
/// `DescriptorResolver` and handed to a `ResourceValidator`.
///
/// Progress is published on the `Config`'s `EventChannel`.
///
#[derive(Debug, Clone)]
pub struct StackValidator {
    config: Config,
    schemas: Arc<SchemaRegistry>,
    descriptors: DescriptorResolver,
}

impl StackValidator {
    pub fn new(config: Config, schemas: Arc<SchemaRegistry>, descriptors: DescriptorResolver) -> Self {
        Self {
            config,
            schemas,
            descriptors,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    fn event_channel(&self) -> Arc<EventChannel> {
        self.config.event_channel()
    }

    /// Validate every declared resource, one after the other.
    ///
    #[instrument(name = "StackValidator::validate_stack", skip_all)]
    pub fn validate_stack(&self, template: &Template, live: &LiveResourceMap) -> StackReport {
        self.started(template);
        let reports = template
            .iter()
            .map(|(logical_id, resource)| self.validate_resource(logical_id, resource, live))
            .collect();
        self.completed(StackReport::new(reports))
    }

    /// Validate declared resources on up to `max_workers` threads. The report is the same one
    /// `validate_stack` would produce.
    ///
    #[instrument(name = "StackValidator::validate_stack_parallel", skip_all)]
    pub fn validate_stack_parallel(
        &self,
        template: &Template,
        live: &LiveResourceMap,
    ) -> Result<StackReport, StackValidatorError> {
        self.started(template);

        let queue: Injector<(&String, &DeclaredResource)> = Injector::new();
        for entry in template.iter() {
            queue.push(entry);
        }

        let workers = self.config.max_workers().min(template.len()).max(1);
        debug!("Validating {} resources on {} workers", template.len(), workers);

        let reports = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let queue = &queue;
                    scope.spawn(move |_| {
                        let mut reports = vec![];
                        loop {
                            match queue.steal() {
                                Steal::Success((logical_id, resource)) => {
                                    reports.push(self.validate_resource(logical_id, resource, live))
                                }
                                Steal::Retry => continue,
                                Steal::Empty => break,
                            }
                        }
                        reports
                    })
                })
                .collect();

            let mut reports = vec![];
            for handle in handles {
                let batch = handle.join().map_err(|_| StackValidatorError::WorkerPanicked)?;
                reports.extend(batch);
            }
            Ok::<_, StackValidatorError>(reports)
        })
        .map_err(|_| StackValidatorError::WorkerPanicked)??;

        Ok(self.completed(StackReport::new(reports)))
    }

    /// Validate a single declared resource against the live stack.
    ///
    #[instrument(name = "StackValidator::validate_resource", skip(self, resource, live))]
    pub fn validate_resource(
        &self,
        logical_id: &str,
        resource: &DeclaredResource,
        live: &LiveResourceMap,
    ) -> ResourceReport {
        let resource_type = resource.resource_type();
        self.event_channel().send(ResourceEvent::ResourceStarted {
            logical_id: logical_id.to_string(),
            resource_type: resource_type.to_string(),
        });

        let outcome = self.check_resource(logical_id, resource, live);

        let event = match &outcome {
            Outcome::Passed => ResourceEvent::ResourcePassed {
                logical_id: logical_id.to_string(),
            },
            Outcome::Skipped { reason } => ResourceEvent::ResourceSkipped {
                logical_id: logical_id.to_string(),
                resource_type: resource_type.to_string(),
                reason: reason.clone(),
            },
            Outcome::Failed(errors) => ResourceEvent::ResourceFailed {
                logical_id: logical_id.to_string(),
                errors: errors.iter().map(ToString::to_string).collect(),
            },
        };
        self.event_channel().send(event);

        ResourceReport {
            logical_id: logical_id.to_string(),
            resource_type: resource_type.to_string(),
            outcome,
        }
    }

    fn check_resource(
        &self,
        logical_id: &str,
        resource: &DeclaredResource,
        live: &LiveResourceMap,
    ) -> Outcome {
        let schema = match self.schemas.get(resource.resource_type()) {
            Some(schema) => schema,
            None => {
                warn!(
                    "Skipping {}: no schema for {}",
                    logical_id,
                    resource.resource_type()
                );
                return Outcome::Skipped {
                    reason: format!("No schema registered for {}", resource.resource_type()),
                };
            }
        };

        let physical_id = match live.get(logical_id) {
            Some(live_resource) => live_resource.physical_resource_id(),
            None => {
                return Outcome::failed(ValidationError::Reference {
                    logical_id: logical_id.to_string(),
                })
            }
        };

        let actual = match self.descriptors.describe(&schema, physical_id) {
            Ok(actual) => actual,
            Err(err) => return Outcome::failed(err.into()),
        };

        let resolver = ReferenceResolver::new(&self.schemas, &self.descriptors, live);
        let validator = ResourceValidator::new(&schema, resolver)
            .with_tag_property(self.config.tag_property());
        let declared = resource.effective_properties();

        if self.config.fail_fast() {
            match validator.validate(&declared, &actual) {
                Ok(()) => Outcome::Passed,
                Err(err) => Outcome::failed(err),
            }
        } else {
            match validator.collect_mismatches(&declared, &actual) {
                Ok(mismatches) if mismatches.is_empty() => Outcome::Passed,
                Ok(mismatches) => Outcome::Failed(mismatches),
                Err(err) => Outcome::failed(err),
            }
        }
    }

    fn started(&self, template: &Template) {
        self.event_channel().send(WorkflowEvent::ValidationStarted {
            resource_count: template.len(),
        });
    }

    fn completed(&self, report: StackReport) -> StackReport {
        self.event_channel().send(WorkflowEvent::ValidationCompleted {
            passed: report.passed(),
            failed: report.failed(),
            skipped: report.skipped(),
        });
        report
    }
}

#[derive(Error, Debug)]
pub enum StackValidatorError {
    #[error("A validation worker panicked before finishing its resources")]
    WorkerPanicked,
}

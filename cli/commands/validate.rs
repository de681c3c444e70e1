use crate::flags::Flags;
use crate::reporter::StatusReporter;
use anyhow::{bail, Context};
use conform_core::descriptor::{DescriptorResolver, SnapshotClient};
use conform_core::events::WorkflowEvent;
use conform_core::schema::SchemaRegistry;
use conform_core::stack::LiveResourceMap;
use conform_core::template::Template;
use conform_core::{Config, StackValidator};
use std::path::PathBuf;
use std::sync::Arc;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "validate",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Validate a deployed stack against its template",
)]
pub struct ValidateCommand {
    #[structopt(
        help = r"The resource type registry, a JSON object keyed by resource type.",
        long = "schemas"
    )]
    schemas: PathBuf,

    #[structopt(
        help = r"The template that declares the expected resources.",
        long = "template"
    )]
    template: PathBuf,

    #[structopt(
        help = r"The live stack resources: a DescribeStackResources response, or an object
keyed by logical id.
",
        long = "resources"
    )]
    resources: PathBuf,

    #[structopt(
        help = r"Recorded describe responses, as { service: { method: { physical_id: response } } }.",
        long = "snapshots"
    )]
    snapshots: PathBuf,

    #[structopt(help = r"Print the report as JSON instead.", long = "json")]
    json: bool,

    #[structopt(flatten)]
    flags: Flags,
}

impl ValidateCommand {
    pub fn run(self) -> Result<(), anyhow::Error> {
        let config = Config::try_from(self.flags.clone())?;

        let schemas = SchemaRegistry::load(&self.schemas)?;
        let template = Template::load(&self.template)?;
        let live = LiveResourceMap::load(&self.resources)?;
        let snapshots = SnapshotClient::load(&self.snapshots)?;

        let event_channel = config.event_channel();
        let reporter = if self.json {
            None
        } else {
            Some(StatusReporter::new(event_channel.clone()).spawn())
        };

        let descriptors = DescriptorResolver::with_builtin_envelopes(Arc::new(snapshots));
        let validator = StackValidator::new(config, Arc::new(schemas), descriptors);
        let result = validator.validate_stack_parallel(&template, &live);

        event_channel.send(WorkflowEvent::Shutdown);
        if let Some(reporter) = reporter {
            reporter
                .join()
                .map_err(|_| anyhow::anyhow!("The status reporter panicked"))?;
        }

        let report = result?;

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .context("Could not serialize the validation report")?;
            println!("{}", json);
        }

        if !report.is_success() {
            bail!(
                "{} of {} resources failed validation",
                report.failed(),
                report.len()
            );
        }

        Ok(())
    }
}

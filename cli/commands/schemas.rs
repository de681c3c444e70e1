use conform_core::schema::SchemaRegistry;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "schemas",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "List the resource types a registry knows how to validate",
)]
pub struct SchemasCommand {
    #[structopt(help = r"The resource type registry to load.", long = "schemas")]
    schemas: PathBuf,
}

impl SchemasCommand {
    pub fn run(self) -> Result<(), anyhow::Error> {
        let registry = SchemaRegistry::load(&self.schemas)?;

        for resource_type in registry.resource_types() {
            let schema = registry.require(resource_type)?;
            println!(
                "{} => {}.{}({})",
                resource_type,
                schema.resolver(),
                schema.lookup_method(),
                schema.id_parameter()
            );
        }

        Ok(())
    }
}

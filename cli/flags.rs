use conform_core::{Config, ConfigError};
use structopt::StructOpt;

#[derive(Default, Debug, Clone, StructOpt)]
pub struct Flags {
    #[structopt(
        help = r"The amount of workers to use to validate resources in parallel.",
        short = "w",
        long = "max-workers"
    )]
    pub(crate) max_workers: Option<usize>,

    #[structopt(
        help = r"Keep checking a resource after its first mismatch and report all of them.",
        long = "collect"
    )]
    pub(crate) collect: bool,

    #[structopt(
        help = r"The declared property that holds a resource's tags.",
        long = "tag-property"
    )]
    pub(crate) tag_property: Option<String>,
}

impl TryFrom<Flags> for Config {
    type Error = ConfigError;

    fn try_from(flags: Flags) -> Result<Self, Self::Error> {
        let mut config = Config::builder();

        config
            .max_workers(flags.max_workers.unwrap_or_else(num_cpus::get))
            .fail_fast(!flags.collect);

        if let Some(tag_property) = flags.tag_property {
            config.tag_property(tag_property);
        }

        config.build()
    }
}

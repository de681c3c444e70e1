mod commands;
pub mod flags;
mod reporter;

use commands::*;
use structopt::StructOpt;
use tracing::{error, log};

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "conform",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Check that a deployed stack is what its template declares"
)]
struct Conform {
    #[structopt(subcommand, help = "the command to run")]
    cmd: Command,
}

impl Conform {
    fn run(self) -> Result<(), anyhow::Error> {
        human_panic::setup_panic!(Metadata {
            name: "conform".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            authors: "".into(),
            homepage: "".into(),
        });

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .format_timestamp_micros()
            .format_module_path(false)
            .parse_env("CONFORM_LOG")
            .try_init()?;

        let result = self.cmd.run();

        if let Err(ref err) = result {
            error!("{:?}", &err);
        };

        result
    }
}

#[derive(StructOpt, Debug, Clone)]
enum Command {
    Validate(ValidateCommand),
    Schemas(SchemasCommand),
    Health(HealthCommand),
}

impl Command {
    fn run(self) -> Result<(), anyhow::Error> {
        match self {
            Command::Validate(x) => x.run(),
            Command::Schemas(x) => x.run(),
            Command::Health(x) => x.run(),
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    Conform::from_args().run()
}

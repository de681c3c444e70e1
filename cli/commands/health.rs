use conform_core::stack::{check_stack_health, StackSnapshot};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "health",
    setting = structopt::clap::AppSettings::ColoredHelp,
    about = "Check that a stack settled without failed events",
)]
pub struct HealthCommand {
    #[structopt(
        help = r"A stack snapshot: { StackName, StackStatus, StackEvents: [...] }.",
        long = "stack"
    )]
    stack: PathBuf,
}

impl HealthCommand {
    pub fn run(self) -> Result<(), anyhow::Error> {
        let snapshot = StackSnapshot::load(&self.stack)?;
        check_stack_health(&snapshot)?;

        let green_bold = console::Style::new().green().bold();
        println!(
            "{:>12} {} ({}, {} events)",
            green_bold.apply_to("Healthy"),
            snapshot.stack_name(),
            snapshot.stack_status(),
            snapshot.stack_events().len()
        );

        Ok(())
    }
}

use crate::demo::{run_dashboard_snapshot, run_demo, run_incident_triage};
use crate::demo::{DashboardSnapshotArgs, DemoArgs, IncidentTriageArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use kitchen_compliance::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Kitchen Compliance",
    about = "HACCP/HMS compliance dashboard and incident triage for restaurant kitchens",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a day's checks from files
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },
    /// Classify incidents from the command line
    Incident {
        #[command(subcommand)]
        command: IncidentCommand,
    },
    /// Walk through a scripted kitchen day with in-memory data
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DashboardCommand {
    /// Compute a compliance snapshot from a counts file and/or temperature log
    Snapshot(DashboardSnapshotArgs),
}

#[derive(Subcommand, Debug)]
enum IncidentCommand {
    /// Classify one incident and print the playbook
    Triage(IncidentTriageArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard {
            command: DashboardCommand::Snapshot(args),
        } => run_dashboard_snapshot(args),
        Command::Incident {
            command: IncidentCommand::Triage(args),
        } => run_incident_triage(args),
        Command::Demo(args) => run_demo(args),
    }
}

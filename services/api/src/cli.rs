use crate::commands::{run_form, run_screen, run_wizard, ScreenArgs, WizardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Prediction App",
    about = "Serve or run the two-stage loan eligibility wizard from the command line",
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
    /// Check initial eligibility and, when eligible, confirm final eligibility
    Wizard(WizardArgs),
    /// Run the initial eligibility screen over a CSV of applicants
    Screen(ScreenArgs),
    /// Print the final form's organization and occupation options
    Form,
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
        Command::Wizard(args) => run_wizard(args),
        Command::Screen(args) => run_screen(args),
        Command::Form => {
            run_form();
            Ok(())
        }
    }
}

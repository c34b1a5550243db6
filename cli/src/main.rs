mod cli;
mod countdown;
mod log;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use solpot_client::{
    load_accounts, Config, Credential, Exit, HttpSessions, Pipeline, Report, Scheduler,
};

use cli::Cli;
use countdown::Countdown;
use crate::log::{ConsoleReporter, FailureLog};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    log::print_title("⊙⊙ SOLPOT");

    let mut reporter = ConsoleReporter::stdout(FailureLog::new(&cli.log_file));

    // Startup preconditions: nothing is processed if these fail.
    let (accounts, config) = match load_startup(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            reporter.error(&format!("{:#}", e));
            return ExitCode::from(1);
        }
    };

    let sessions = match HttpSessions::new(cli.base_url.as_str()) {
        Ok(sessions) => sessions,
        Err(e) => {
            reporter.error(&format!("fatal error: {:#}", e));
            return ExitCode::from(1);
        }
    };

    ::log::debug!("Using {} as API base", cli.base_url);
    ::log::debug!("Loaded {} accounts, config {:?}", accounts.len(), config);

    let pipeline = Pipeline::new(sessions, config.update_client_seed);
    let mut scheduler = Scheduler::new(accounts, config, pipeline, Countdown, reporter);

    // The countdown notices Ctrl-C by itself; this also covers an interrupt mid-request.
    let exit = tokio::select! {
        exit = scheduler.run() => exit,
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => Exit::Interrupted,
            Err(e) => Exit::Fatal(e.into()),
        },
    };

    let reporter = scheduler.reporter_mut();
    match &exit {
        Exit::Interrupted => reporter.warning("keyboard interrupted by user"),
        Exit::Fatal(e) => reporter.error(&format!("fatal error: {:#}", e)),
    }

    ExitCode::from(exit.code())
}

fn load_startup(cli: &Cli) -> Result<(Vec<Credential>, Config)> {
    let accounts = load_accounts(&cli.accounts)?;
    let config = Config::load(&cli.config)?;
    Ok((accounts, config))
}

fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

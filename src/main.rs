//! Physics Mentor CLI binary entry point.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use physics_mentor::agent::{Agent, AgentConfig};
use physics_mentor::bridge::SyncBridge;
use physics_mentor::cli::{Cli, Commands};
use physics_mentor::config::MentorConfig;
use physics_mentor::error::MentorError;
use physics_mentor::shell::{ChatShell, Diagnostics};
use physics_mentor::tools::{study_registry, StudyEnvironment, SystemBrowser};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "PHYSICS_MENTOR_LOG";
const INTERRUPT_GRACE: Duration = Duration::from_secs(2);

fn main() {
    init_tracing();
    let cli = Cli::parse_args();

    if let Err(e) = run(&cli) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), MentorError> {
    let settings = cli.layered_settings()?;

    if cli.command() == &Commands::Diagnostics {
        println!("{}", Diagnostics::from_settings(&settings));
        return Ok(());
    }

    let config = settings.resolve()?;
    let bridge = build_bridge(&config)?;
    watch_ctrl_c(bridge.cancellation_token());

    match cli.command() {
        Commands::Ask { prompt } => {
            println!("{}", bridge.ask(&prompt.join(" ")));
            Ok(())
        }
        _ => chat(&bridge, &config),
    }
}

fn build_bridge(config: &MentorConfig) -> Result<SyncBridge, MentorError> {
    let env = Arc::new(StudyEnvironment::new(
        config.output_dir.clone(),
        Arc::new(SystemBrowser),
    ));
    let agent_config = Arc::new(AgentConfig::physics_mentor(config, study_registry(env)));
    let agent = Agent::new(agent_config)?;
    info!(
        model = %config.endpoint.model,
        output_dir = %config.output_dir.display(),
        "physics mentor ready"
    );
    Ok(SyncBridge::new(agent, config.endpoint.request_timeout))
}

fn chat(bridge: &SyncBridge, config: &MentorConfig) -> Result<(), MentorError> {
    let stdin = io::stdin();
    let mut shell = ChatShell::new(
        bridge,
        Diagnostics::from_config(config),
        stdin.lock(),
        io::stdout(),
    );
    shell.run()?;
    io::stdout().flush()?;
    Ok(())
}

/// On Ctrl-C, cancel the in-flight answer, give it a moment to unwind, then exit.
fn watch_ctrl_c(token: CancellationToken) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                warn!(error = %e, "cannot install Ctrl-C handler");
                return;
            }
        };
        if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
            token.cancel();
            eprintln!("\n⏹️ Interrupted");
            std::thread::sleep(INTERRUPT_GRACE);
            std::process::exit(130);
        }
    });
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

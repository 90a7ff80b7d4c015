//! Voxpilot - Entry Point
//!
//! Wires configuration, the inference client, the platform surface and the
//! desktop collaborators into a session, then runs it either interactively
//! (one transcribed utterance per stdin line) or for a single utterance.

use voxpilot::core::config::AssistantConfig;
use voxpilot::core::error::Result;
use voxpilot::llm::client::{BlockingLlm, LlmClient};
use voxpilot::platform;
use voxpilot::services::{ConsoleSpeaker, LineListener, Listener, ShellDesktop};
use voxpilot::session::{Interrupt, Services, Session};

use clap::Parser;
use std::io;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Voice command assistant: utterance -> intent -> action
#[derive(Parser, Debug)]
#[command(name = "voxpilot")]
#[command(about = "Turn spoken commands into desktop actions and generated code")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Process a single utterance and exit
    #[arg(long)]
    once: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "voxpilot=debug"
    } else {
        "voxpilot=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = AssistantConfig::load(args.config.as_deref())?;
    tracing::info!(model = %config.llm.model, url = %config.llm.api_url, "voxpilot starting");

    // Runtime for the HTTP client and the Ctrl-C watcher
    let rt = Runtime::new()?;

    let interrupt = Interrupt::new();
    {
        let interrupt = interrupt.clone();
        rt.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received");
                interrupt.raise();
            }
        });
    }

    let client = {
        let _guard = rt.enter();
        LlmClient::from_config(&config.llm)?
    };
    let platform = platform::detect(&config.search);
    let family = platform.family();

    let services = Services {
        speaker: Box::new(ConsoleSpeaker::from_config(&config.speech)),
        inference: Box::new(BlockingLlm::new(client, rt.handle().clone())),
        desktop: Box::new(ShellDesktop::new(family)),
        platform,
    };

    let listener: Box<dyn Listener> = if args.once.is_some() {
        Box::new(LineListener::from_reader(io::empty(), interrupt.clone()))
    } else {
        Box::new(LineListener::stdin(interrupt.clone()))
    };

    let session = Session::new(
        listener,
        services,
        config.session,
        config.actions,
        interrupt,
    );

    if let Some(utterance) = args.once {
        if let Some(outcome) = session.run_once(&utterance) {
            tracing::info!(?outcome, "done");
        }
        return Ok(());
    }

    println!("Type a command per line (Ctrl-C or end of input to quit).");
    let summary = session.run();
    println!(
        "\nSession over: {} command(s), {} failure(s).",
        summary.cycles, summary.failures
    );
    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use triggerkit::config::Config;
use triggerkit::dispatch::{ActionDispatcher, ChannelSink};
use triggerkit::logging::init_tracing;
use triggerkit::manifest::Manifest;
use triggerkit::script::Session;
use triggerkit::trigger::Trigger;

#[derive(Parser, Debug)]
#[command(name = "triggerkit", version, about = "Replay component action manifests")]
struct Cli {
    /// Config file (default: ~/.config/triggerkit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount a manifest's components, replay its script, and print every
    /// dispatched message as a JSON line.
    Run {
        manifest: PathBuf,
        /// How long to keep polls running after the script ends.
        #[arg(long, default_value_t = 0)]
        settle_ms: u64,
    },
    /// Print the trigger → event vocabulary.
    Vocabulary,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;

    init_tracing(&config.logging.filter);

    match cli.command {
        Command::Run {
            manifest,
            settle_ms,
        } => run(config, manifest, Duration::from_millis(settle_ms)).await,
        Command::Vocabulary => {
            print_vocabulary();
            Ok(())
        }
    }
}

async fn run(config: Config, manifest_path: PathBuf, settle: Duration) -> anyhow::Result<()> {
    let manifest = Manifest::load_from(&manifest_path).context("loading manifest")?;

    let (sink, mut rx) = ChannelSink::new();
    let printer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            println!("{}", serde_json::to_string(&message)?);
        }
        Ok::<_, serde_json::Error>(())
    });

    let dispatcher = ActionDispatcher::from_config(Arc::new(sink), &config);
    let mut session = Session::new(&dispatcher, &manifest);

    let outcome = async {
        session.mount_all().await?;
        session.run(&manifest.script).await?;
        tokio::time::sleep(settle).await;
        Ok::<_, triggerkit::script::ScriptError>(())
    }
    .await;

    dispatcher.registry().shutdown().await;
    tracing::info!(
        components = manifest.components.len(),
        steps = manifest.script.len(),
        "Session finished"
    );

    // Dropping every sink handle closes the channel and lets the printer drain.
    drop(session);
    drop(dispatcher);
    printer.await.context("printer task")??;

    outcome.context("running script")
}

fn print_vocabulary() {
    for trigger in Trigger::KNOWN.iter() {
        let event = trigger
            .event()
            .map(|event| event.as_str().to_string())
            .unwrap_or_else(|| "(lifecycle)".to_string());
        println!("{:<20} {}", trigger.as_str(), event);
    }
}

use std::fs::File;
use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use postpilot::client::{ActionClient, PluginClient};
use postpilot::core::config::{self, CliOverrides, ResolvedConfig};
use postpilot::core::dispatcher::ActionDispatcher;
use postpilot::core::model::{PostAction, TargetMessage};
use postpilot::core::navigation::{NavigationState, NavigationStore};
use postpilot::core::notify::ConsoleNotifier;
use postpilot::core::viewport::ConsoleViewport;
use postpilot::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "postpilot", about = "AI actions for a chat post")]
struct Args {
    /// Chat server base URL
    #[arg(long, global = true)]
    server: Option<String>,

    /// Personal access token
    #[arg(long, global = true)]
    token: Option<String>,

    /// AI plugin id on the server
    #[arg(long, global = true)]
    plugin: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive AI actions menu for a post
    Menu { post_id: String },
    /// Summarize a post's thread and show where the summary landed
    Summarize { post_id: String },
    /// Summarize a post's meeting audio
    Transcribe { post_id: String },
    /// Let the bot react to a post for you
    React { post_id: String },
}

impl Command {
    fn post_id(&self) -> &str {
        match self {
            Command::Menu { post_id }
            | Command::Summarize { post_id }
            | Command::Transcribe { post_id }
            | Command::React { post_id } => post_id,
        }
    }
}

fn invalid_input(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.into())
}

fn build_client(config: &ResolvedConfig) -> io::Result<Arc<dyn ActionClient>> {
    let server_url = config.server_url.as_deref().ok_or_else(|| {
        invalid_input("server URL must be set (config file, POSTPILOT_SERVER_URL env var, or --server)")
    })?;
    let client = PluginClient::new(
        server_url,
        &config.plugin_id,
        config.token.clone(),
        config.request_timeout,
    )
    .map_err(|e| invalid_input(e.to_string()))?;
    Ok(Arc::new(client))
}

/// Runs a single action without the TUI and waits for it to finish.
async fn run_headless(
    config: &ResolvedConfig,
    target: TargetMessage,
    client: Arc<dyn ActionClient>,
    action: PostAction,
) -> io::Result<()> {
    let navigation = Arc::new(NavigationStore::new());
    let dispatcher = ActionDispatcher::new(
        target,
        client,
        navigation.clone(),
        Arc::new(ConsoleViewport),
        Arc::new(ConsoleNotifier),
    )
    .with_in_flight_guard(config.guard_in_flight_summaries);

    match action {
        PostAction::Summarize => {
            dispatcher
                .summarize_action()
                .await
                .map_err(|e| io::Error::other(e.to_string()))?;
            if let Some(selection) = navigation.current() {
                println!(
                    "Selected summary post {} in channel {}",
                    selection.message_id, selection.channel_id
                );
            }
        }
        PostAction::Transcribe | PostAction::ReactForMe => {
            dispatcher
                .dispatch(action)
                .await
                .map_err(|e| io::Error::other(e.to_string()))?
                .map_err(|e| io::Error::other(e.to_string()))?;
            println!("{} requested", action.label());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to postpilot.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("postpilot.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(|e| invalid_input(e.to_string()))?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            server_url: args.server.as_deref(),
            token: args.token.as_deref(),
            plugin_id: args.plugin.as_deref(),
        },
    );

    let target = TargetMessage::new(args.command.post_id())
        .ok_or_else(|| invalid_input("post id must not be empty"))?;
    let client = build_client(&resolved)?;

    log::info!("Postpilot starting for post {} via {}", target, client.name());

    match args.command {
        Command::Menu { .. } => tui::run(&resolved, target, client),
        Command::Summarize { .. } => {
            run_headless(&resolved, target, client, PostAction::Summarize).await
        }
        Command::Transcribe { .. } => {
            run_headless(&resolved, target, client, PostAction::Transcribe).await
        }
        Command::React { .. } => {
            run_headless(&resolved, target, client, PostAction::ReactForMe).await
        }
    }
}

// ABOUTME: Entry point for botchat — a terminal chat client with a simulated bot.
// ABOUTME: Parses CLI args, loads config, sets up logging, and dispatches the subcommand.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use botchat::app::App;
use botchat::config::Config;
use botchat::logging::{LogTarget, init_logging};
use botchat::reply::server;

#[derive(Debug, Parser)]
#[command(name = "botchat", version, about = "Chat with a simulated bot from the terminal")]
struct Cli {
    /// Email shown in the header and used by the greeting.
    #[arg(long, global = true)]
    user: Option<String>,

    /// Config file (defaults to ~/.botchat/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep history in memory only.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive chat (default).
    Chat,
    /// Send one message and print the reply.
    Send { text: String },
    /// Print the stored transcript.
    History,
    /// Export the stored transcript to a file.
    Export {
        /// Directory to write the export into.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Delete the stored chat history.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Run the stub reply endpoint.
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_path(Config::env_path());

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    if let Some(user) = cli.user {
        config.identity.email = Some(user);
    }

    let command = cli.command.unwrap_or(Command::Chat);
    let log_target = match command {
        Command::Chat => LogTarget::File(config.log_file()),
        _ => LogTarget::Stderr,
    };
    init_logging(&config.logging.filter, log_target)?;

    if let Command::Export { dir: Some(dir) } = &command {
        config.export.dir = Some(dir.clone());
    }

    let app = App::new(config, cli.ephemeral);
    match command {
        Command::Chat => app.run_chat().await?,
        Command::Send { text } => println!("{}", app.send_once(&text).await?),
        Command::History => {
            let transcript = app.history()?;
            if transcript.is_empty() {
                println!("No chat history yet.");
            } else {
                println!("{transcript}");
            }
        }
        Command::Export { .. } => println!("{}", app.export()?.notice()),
        Command::Clear { yes } => {
            let confirmed = yes
                || dialoguer::Confirm::new()
                    .with_prompt("This will delete your entire chat history. Are you sure?")
                    .default(false)
                    .interact()?;
            if app.clear(confirmed)? {
                println!("Chat history cleared.");
            } else {
                println!("Chat history kept.");
            }
        }
        Command::Serve { addr } => server::serve(addr).await?,
    }

    Ok(())
}

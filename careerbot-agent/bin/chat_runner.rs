use careerbot_agent::factory::{create_orchestrator_from_settings, NotifierKind};
use careerbot_agent::{Conversation, Settings};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chat with the career bot from a terminal", long_about = None)]
struct Args {
    /// Path to a TOML config file (environment variables override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Answer a single message and exit
    #[arg(short, long)]
    message: Option<String>,

    /// Log notifications instead of pushing them
    #[arg(long)]
    no_push: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let settings = Settings::load(args.config.as_deref())?;
    settings.log_credentials();

    let kind = if args.no_push {
        NotifierKind::LogOnly
    } else {
        NotifierKind::Pushover
    };
    let orchestrator = Arc::new(create_orchestrator_from_settings(&settings, kind)?);
    let mut conversation = Conversation::new(orchestrator);

    if let Some(message) = args.message {
        let reply = conversation.send(&message).await?;
        println!("{}", reply);
        return Ok(());
    }

    println!(
        "Chatting as {}. Type a question, or an empty line to quit.",
        settings.chat.persona_name
    );

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        match conversation.send(line).await {
            Ok(reply) => println!("{}\n", reply),
            Err(e) => eprintln!("Sorry, something went wrong: {}\n", e),
        }
    }

    Ok(())
}

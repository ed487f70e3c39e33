use actix_web::{web, App, HttpServer};
use careerbot_agent::factory::{create_orchestrator_from_settings, NotifierKind};
use careerbot_agent::Settings;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP chat endpoint for the career bot", long_about = None)]
struct Args {
    /// Path to a TOML config file (environment variables override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log notifications instead of pushing them
    #[arg(long)]
    no_push: bool,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;
    settings.log_credentials();

    let kind = if args.no_push {
        NotifierKind::LogOnly
    } else {
        NotifierKind::Pushover
    };
    let orchestrator = Arc::new(create_orchestrator_from_settings(&settings, kind)?);

    let bind_addr = (settings.server.host.clone(), settings.server.port);
    info!(
        "Starting careerbot-api server at http://{}:{}",
        bind_addr.0, bind_addr.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(orchestrator.clone()))
            .configure(careerbot_api::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}

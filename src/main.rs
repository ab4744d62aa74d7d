use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use oracle::banner::{BannerInfo, print_banner};
use oracle::config::{Config, Overrides};
use oracle::generator::gemini::GeminiGenerator;
use oracle::web::{self, AppState, page::Page};

#[derive(Parser)]
#[command(name = "oracle", version, about = "Ask a question, get an answer.")]
struct Cli {
    /// Address to listen on (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Gemini model name (overrides GEMINI_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Page template to render instead of the built-in one (overrides ORACLE_TEMPLATE)
    #[arg(short, long)]
    template: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let cli = Cli::parse();
    let config = Config::from_env(Overrides {
        host: cli.host,
        port: cli.port,
        model: cli.model,
        template: cli.template,
    })
    .context("invalid configuration")?;

    let page = Page::load(config.template.as_deref()).context("failed to load page template")?;

    let generator = GeminiGenerator::new(
        config.api_key.clone(),
        Some(config.model.clone()),
        Some(config.api_base.as_str()),
    );
    info!(model = generator.model(), endpoint = generator.endpoint(), "using Gemini");
    let model = generator.model().to_string();
    let state = AppState::new(Arc::new(generator), page);

    let listen = config.bind_addr();
    let template_label = config
        .template
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());

    print_banner(&BannerInfo {
        model: &model,
        listen: &listen,
        template: &template_label,
    });

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("failed to bind {listen}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    web::serve(listener, state, web::shutdown_signal(tokio::signal::ctrl_c())).await?;

    Ok(())
}

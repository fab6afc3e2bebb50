use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use truthlens_cli::{
    display_banner, handle_input_with_history, render_reply, render_verdict, Reply, Session,
};
use truthlens_client::{AnalysisClient, ApiConfig, Endpoint, HealthProber};
use truthlens_core::{ContentAnalyzer, HealthProbe};

#[derive(Parser)]
#[command(name = "truthlens")]
#[command(about = "Check text for factual accuracy, bias and emotional tone", long_about = None)]
struct Cli {
    /// Analyze this text once and exit
    #[arg(short, long)]
    text: Option<String>,

    /// Probe the analysis service and exit (status 0 when reachable)
    #[arg(long)]
    health: bool,

    /// Screen to start on
    #[arg(short, long, default_value = "/")]
    route: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "truthlens=debug,truthlens_client=debug,truthlens_cli=debug,truthlens_core=debug"
    } else {
        "truthlens=warn,truthlens_client=warn,truthlens_cli=warn,truthlens_core=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(
        environment = %config.environment,
        base_url = %config.base_url,
        health = %config.url(Endpoint::Health),
        analyze = %config.url(Endpoint::Analyze),
        chat = %config.url(Endpoint::Chat),
        is_local = config.is_local(),
        "API configuration"
    );

    let prober = HealthProber::new(config.clone())?;
    let client = AnalysisClient::new(config.clone())?;

    if cli.health {
        let up = prober.probe().await;
        render_reply(&Reply::Health(up));
        std::process::exit(if up { 0 } else { 1 });
    }

    // Handle direct analysis
    if let Some(text) = cli.text {
        let result = client.analyze(&text).await?;
        render_verdict(&result);
        return Ok(());
    }

    let mut session = Session::new(client, prober);
    if let Reply::UnknownRoute(path) = session.navigate(&cli.route) {
        println!("{} Unknown screen '{}', starting on /", "⚠️".yellow(), path);
    }
    session.check_health().await;

    display_banner(session.current_view(), &config.base_url, session.service_up());

    let mut history = Vec::new();

    loop {
        let prompt = session.current_view().name;
        let Some(input) = handle_input_with_history(prompt, &mut history).await? else {
            println!("{}", "👋 Goodbye!".green());
            break;
        };

        if input.is_empty() {
            continue;
        }

        if input.trim().eq_ignore_ascii_case("go") {
            println!("{}", "Usage: go <path>".dimmed());
            continue;
        }

        let analyzing = session.current_view().accepts_text;
        if analyzing && !session.is_command(&input) {
            println!("{} Analyzing...", "🔎".blue());
        }

        let reply = session.handle(&input).await;
        if reply == Reply::Exit {
            println!("{}", "👋 Goodbye!".green());
            break;
        }

        let navigated = matches!(reply, Reply::Navigated(_));
        render_reply(&reply);
        if navigated {
            display_banner(session.current_view(), &config.base_url, session.service_up());
        }
    }

    Ok(())
}

use std::sync::Arc;

use trip_planner::channels::{CliChannel, CliExit};
use trip_planner::config::PlannerConfig;
use trip_planner::error::Result;
use trip_planner::llm::{LlmConfig, create_provider};
use trip_planner::planner::{ItineraryGenerator, PlannerManager};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the conversation.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = PlannerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("🚨 No usable API key: {}", e);
        eprintln!("  export GEMINI_API_KEY=...");
        std::process::exit(1);
    });

    eprintln!("🗺️ Trip Planner v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);

    let llm = create_provider(&LlmConfig::from(&config))?;
    let manager = Arc::new(PlannerManager::new(
        ItineraryGenerator::new(llm),
        config.final_prompt.clone(),
    ));

    let server = config.http_port.map(|port| {
        eprintln!("   Session API: http://0.0.0.0:{}/api/session", port);
        let manager = Arc::clone(&manager);
        tokio::spawn(async move {
            if let Err(e) = trip_planner::channels::http::serve(port, manager).await {
                tracing::error!("HTTP server stopped: {}", e);
            }
        })
    });
    eprintln!();

    let exit = CliChannel::new(manager).run().await?;

    // Without a terminal, keep serving HTTP until interrupted.
    if exit == CliExit::Eof {
        if let Some(server) = server {
            tokio::select! {
                _ = server => {}
                _ = tokio::signal::ctrl_c() => {}
            }
        }
    }

    Ok(())
}

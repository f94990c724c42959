//! Scam honeypot. Engages scammers as a credulous victim and extracts
//! payment and contact intelligence from the conversation.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;
#[cfg(test)]
mod test_support;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                println!("Scam honeypot server");
                println!();
                println!("Usage: honeypot");
                println!();
                println!("Configuration comes from the environment (or a .env file):");
                println!("  HONEYPOT_API_KEY         shared secret for the x-api-key header (required)");
                println!("  PORT                     listen port (default 8000)");
                println!("  CALLBACK_URL             scoring endpoint");
                println!("  GROQ_API_KEY, CEREBRAS_API_KEY, OPENAI_API_KEY, GEMINI_API_KEY");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}. Use 'honeypot help' for usage.", other);
                std::process::exit(1);
            }
        }
    }

    let config = honeypot_core::HoneypotConfig::from_env()?;
    let llm_config = honeypot_chat::LLMConfig::from_env();
    let port = config.port;

    info!(
        callback_url = %config.callback_url,
        backends = llm_config.backends.len(),
        deep_conversation_turns = config.deep_conversation_turns,
        "Configuration loaded"
    );

    // Build application state
    let state = Arc::new(AppState::new(config, &llm_config));

    // Build router
    let app = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Honeypot server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

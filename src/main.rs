use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use wellness_coach::api::ApiClient;
use wellness_coach::config::CoachConfig;
use wellness_coach::profile::ProfileDraft;
use wellness_coach::session::SessionController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CoachConfig::from_env()?;

    eprintln!("🏃 Wellness Coach v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.base_url);
    eprintln!("   Type a message and press Enter. /quit to exit.\n");

    let client = Arc::new(ApiClient::new(&config)?);
    let mut session = SessionController::new(client);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // ── Onboarding form ─────────────────────────────────────────────
    eprintln!("Let's get to know you. Leave any field blank to skip it.");
    let draft = ProfileDraft {
        age: prompt_line(&mut lines, "Age: ").await?,
        fitness_level: prompt_line(
            &mut lines,
            "Fitness level (beginner/intermediate/advanced): ",
        )
        .await?,
        health_goals: prompt_line(&mut lines, "Health goals: ").await?,
        equipment: prompt_line(&mut lines, "Available equipment: ").await?,
    };
    session.submit_onboarding(&draft).await;
    if let Some(welcome) = session.state().last_message() {
        println!("\n{}\n", welcome.content);
    }

    // ── Chat loop ───────────────────────────────────────────────────
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let line = line.trim().to_string();
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        session.set_pending(line.clone());
        if session.submit_message(&line).await {
            if let Some(reply) = session.state().last_message() {
                println!("\n{}\n", reply.content);
            }
        }
    }

    Ok(())
}

async fn prompt_line(
    lines: &mut Lines<BufReader<Stdin>>,
    prompt: &str,
) -> anyhow::Result<String> {
    eprint!("{prompt}");
    Ok(lines.next_line().await?.unwrap_or_default())
}

//! Book Assistant terminal shell
//!
//! Stands in for the documentation page: reads lines from stdin, submits
//! them to a session and prints turns as they arrive.

use book_assistant::{start_session, AssistantConfig, Resolver, Sender, SessionEvent, Turn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_assistant=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = AssistantConfig::from_env()?;
    tracing::info!(
        reply_delay_ms = u64::try_from(config.reply_delay.as_millis()).unwrap_or(u64::MAX),
        "Configuration loaded"
    );

    let session = start_session(&config, Resolver::default());
    let mut updates = session.subscribe();

    for turn in &session.state().await?.turns {
        print_turn(turn);
    }

    // Render turns as they arrive
    let printer = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(SessionEvent::Turn { turn }) => print_turn(&turn),
                Ok(SessionEvent::PendingChanged { pending: true }) => println!("  ..."),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Renderer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        // Input stays disabled until the previous reply lands
        session.wait_idle().await?;
        session.set_draft(line.as_str()).await?;
        session.submit(line).await?;
    }

    session.wait_idle().await?;

    session.shutdown();
    session.closed().await;
    drop(session);
    printer.await?;

    Ok(())
}

fn print_turn(turn: &Turn) {
    let who = match turn.sender {
        Sender::User => "you",
        Sender::Bot => "assistant",
    };
    println!("[{}] {who}: {}", turn.clock_time(), turn.text);
}

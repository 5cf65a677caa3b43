use std::sync::Arc;

use anyhow::Context;
use showcase_client::{
    graceful_shutdown::shutdown_signal,
    settings::{AppConfig, LogFormat},
    views::{about::AboutView, auth_control::AuthControl, prototypes::PrototypeListView},
    AppState,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn render(state: &AppState) {
    match state.about() {
        AboutView::Loaded { title, content_html, .. } => {
            println!("# {title}\n{content_html}");
        }
        other => println!("{}", other.status_message().unwrap_or_default()),
    }

    match state.auth_control() {
        AuthControl::Login { href } => println!("[Login] {href}"),
        AuthControl::Account { name, .. } => println!("Signed in as {name} [Logout]"),
    }

    let list = state.prototype_list();
    if list.can_add() {
        println!("[+ Add Prototype]");
    }
    if let Some(status) = list.status_message() {
        println!("{status}");
    }

    if let PrototypeListView::Ready { cards, .. } = &list {
        for card in cards {
            println!("\n## {}", card.title);
            println!("{}", card.description);
            for link in [&card.play_url, &card.github_url].into_iter().flatten() {
                println!("  -> {link}");
            }
            if card.can_manage {
                println!("  [Edit] [Delete]");
            }

            let Some(id) = card.id else { continue };
            let thread = state.comment_thread(id);
            if let Some(status) = thread.status_message() {
                println!("  {status}");
            }
            for comment in thread.cards() {
                let edit = if comment.can_edit { " [Edit]" } else { "" };
                println!("  {} ({}): {}{}", comment.author_name, comment.posted_at, comment.content, edit);
            }
            println!("  [{}]", thread.add_control.label());
        }
    }
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;
    init_tracing(config.log_format());
    tracing::info!("Loaded configuration: {:?}", config);

    let state = Arc::new(AppState::from_config(&config).context("Failed to build HTTP client")?);
    state.mount().await;
    render(&state);

    tracing::info!(
        "Showcase v{} ready; press Enter to refocus, type `logout` to sign out",
        env!("CARGO_PKG_VERSION")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) if line.trim() == "logout" => {
                        if let Err(e) = state.logout().await {
                            println!("Logout failed: {e}");
                        }
                    }
                    Some(_) => state.refocus().await,
                    None => break,
                }
                render(&state);
            }
            reason = &mut shutdown => {
                tracing::info!(?reason, "shutting down");
                break;
            }
        }
    }

    Ok(())
}

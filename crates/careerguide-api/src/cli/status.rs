//! System status dashboard command.

use anyhow::Result;
use console::style;

use careerguide_core::chat::repository::ChatRepository;
use careerguide_core::user::repository::UserRepository;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows user/session/message counts, the configured advisor model, and
/// storage info.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    // Gather stats
    let users = state.chat_service.user_repo().count_users().await?;
    let sessions = state.chat_service.chat_repo().count_all_sessions().await?;
    let messages = state.chat_service.chat_repo().count_all_messages().await?;

    let advisor = &state.config.advisor;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "users": users,
            "sessions": sessions,
            "messages": messages,
            "advisor": {
                "provider": state.advisor.provider_name(),
                "model": advisor.model,
                "max_tokens": advisor.max_tokens,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} CareerGuide v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    // Conversation counts
    println!("  {}", style("── Conversations ──").dim());
    println!("  Users:    {}", style(users).bold());
    println!("  Sessions: {}", style(sessions).bold());
    println!("  Messages: {}", style(messages).bold());
    println!();

    // Advisor
    println!("  {}", style("── Advisor ──").dim());
    println!("  Provider:   {}", state.advisor.provider_name());
    println!("  Model:      {}", style(&advisor.model).cyan());
    println!("  Max tokens: {}", advisor.max_tokens);
    println!();

    // System
    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}

//! Database seeding command for local development.
//!
//! Creates a handful of users with realistic career-guidance sessions so
//! the API has data to serve straight away. Each run adds a fresh set of
//! sessions; existing rows are never touched.

use anyhow::Result;
use console::style;

use careerguide_types::chat::MessageRole;
use careerguide_types::user::UserProfile;

use crate::state::AppState;

struct SeedUser {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    sessions: &'static [SeedSession],
}

struct SeedSession {
    title: &'static str,
    turns: &'static [(&'static str, &'static str)],
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        id: "user_seed_alice",
        name: "Alice Johnson",
        email: "alice@example.com",
        sessions: &[
            SeedSession {
                title: "Switching into data science",
                turns: &[
                    (
                        "I've been a financial analyst for five years and want to move into data science. Where do I start?",
                        "Your analyst background is a real advantage. Start by auditing the overlap: you already work with data, metrics, and stakeholder reporting. The gap is usually programming depth and statistics. A practical first step is rebuilding one of your existing Excel analyses in Python.",
                    ),
                    (
                        "Should I do a bootcamp or a master's degree?",
                        "It depends on your timeline and budget. Bootcamps suit career changers who can show applied projects quickly; a master's carries more weight for research-heavy roles. Given you have domain experience in finance, a portfolio of finance-flavored projects may matter more than either credential.",
                    ),
                ],
            },
            SeedSession {
                title: "Negotiating a promotion",
                turns: &[(
                    "My manager hinted at a promotion but nothing has happened for six months. How do I bring it up?",
                    "Ask for a concrete conversation rather than waiting for one. Request a meeting specifically about your growth path, bring a short summary of what you've delivered since the hint, and ask what the remaining gap to the next level is. That turns a vague promise into a checklist.",
                )],
            },
        ],
    },
    SeedUser {
        id: "user_seed_bob",
        name: "Bob Smith",
        email: "bob@example.com",
        sessions: &[SeedSession {
            title: "First engineering management role",
            turns: &[(
                "I just became a team lead and I'm struggling to stop coding everything myself.",
                "That instinct is the most common trap for new leads. Your output is now the team's output. Pick one workstream this sprint to delegate completely, including the design decisions, and limit your own coding to unblocking work nobody else can do yet.",
            )],
        }],
    },
    SeedUser {
        id: "user_seed_carol",
        name: "Carol Davis",
        email: "carol@example.com",
        sessions: &[SeedSession {
            title: "Returning after a career break",
            turns: &[(
                "I took three years off to care for family. How do I explain the gap to employers?",
                "State it plainly and briefly, then redirect to what you bring now. A one-line explanation like 'I took a planned break for family care and am now fully returning' is enough. Spend your energy on evidence of current readiness, like recent courses or freelance work, rather than apologizing for the gap.",
            )],
        }],
    },
];

/// Seed the database with sample users and career-guidance sessions.
pub async fn seed(state: &AppState, json: bool) -> Result<()> {
    let mut users_seeded = 0usize;
    let mut sessions_created = 0usize;
    let mut messages_appended = 0usize;

    for user in SEED_USERS {
        let profile = UserProfile::new(
            user.id.to_string(),
            Some(user.name.to_string()),
            Some(user.email.to_string()),
        );
        users_seeded += 1;

        for session in user.sessions {
            let created = state
                .chat_service
                .create_session(&profile, Some(session.title.to_string()))
                .await?;
            sessions_created += 1;

            for (question, answer) in session.turns {
                state
                    .chat_service
                    .append_message(user.id, &created.session.id, MessageRole::User, question)
                    .await?;
                state
                    .chat_service
                    .append_message(user.id, &created.session.id, MessageRole::Assistant, answer)
                    .await?;
                messages_appended += 2;
            }
        }
    }

    if json {
        let summary = serde_json::json!({
            "users": users_seeded,
            "sessions": sessions_created,
            "messages": messages_appended,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("  {} Seed data created", style("✓").green().bold());
    println!();
    println!("  Users:    {}", style(users_seeded).bold());
    println!("  Sessions: {}", style(sessions_created).bold());
    println!("  Messages: {}", style(messages_appended).bold());
    println!();
    println!(
        "  {}",
        style("Mint a token with `cguide token --user user_seed_alice` to browse them.").dim()
    );
    println!();

    Ok(())
}

//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/provider traits, but AppState pins
//! them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use careerguide_core::advisor::gateway::AdvisorGateway;
use careerguide_core::chat::service::ChatService;
use careerguide_infra::config::{data_dir, database_url, load_app_config};
use careerguide_infra::identity::TokenVerifier;
use careerguide_infra::llm::cohere::CohereProvider;
use careerguide_infra::secret::env::EnvSecretProvider;
use careerguide_infra::secret::{AUTH_SECRET_VAR, COHERE_API_KEY_VAR};
use careerguide_infra::sqlite::chat::SqliteChatRepository;
use careerguide_infra::sqlite::pool::DatabasePool;
use careerguide_infra::sqlite::user::SqliteUserRepository;
use careerguide_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteChatRepository, SqliteUserRepository>;

pub type ConcreteAdvisorGateway = AdvisorGateway<CohereProvider>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub advisor: Arc<ConcreteAdvisorGateway>,
    pub verifier: Arc<TokenVerifier>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    ///
    /// Fails fast when either `COHERE_API_KEY` or `CAREERGUIDE_AUTH_SECRET`
    /// is missing from the environment. Neither has a fallback.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;

        // Initialize database
        let db_url = database_url(&data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        // External credentials, environment only
        let secrets = EnvSecretProvider::new();
        let api_key = secrets
            .get(COHERE_API_KEY_VAR)
            .with_context(|| format!("{COHERE_API_KEY_VAR} must be set"))?;
        let auth_secret = secrets
            .get(AUTH_SECRET_VAR)
            .with_context(|| format!("{AUTH_SECRET_VAR} must be set"))?;

        // Wire chat service with its repositories
        let chat_repo = SqliteChatRepository::new(db_pool.clone());
        let user_repo = SqliteUserRepository::new(db_pool.clone());
        let chat_service = ChatService::new(chat_repo, user_repo);

        // Wire the advisor gateway to the Cohere provider
        let provider = CohereProvider::new(
            api_key,
            Duration::from_secs(config.advisor.request_timeout_secs),
        );
        let advisor = AdvisorGateway::new(provider, config.advisor.clone());

        let verifier = TokenVerifier::new(auth_secret);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            advisor: Arc::new(advisor),
            verifier: Arc::new(verifier),
            config: Arc::new(config),
            data_dir,
            db_pool,
        })
    }
}

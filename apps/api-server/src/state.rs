//! Application state - shared across all handlers.

use std::sync::Arc;

use pluma_core::assets::AssetLifecycle;
use pluma_core::ports::{AssetStore, PasswordService, PostRepository, TokenService, UserRepository};
use pluma_core::service::{AccountService, FeedService};
use pluma_infra::assets::LocalAssetStore;
use pluma_infra::auth::Argon2PasswordService;
use pluma_infra::database::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use pluma_infra::database::{self, PostgresPostRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub feed: FeedService,
    pub asset_store: Arc<dyn AssetStore>,
    pub assets: AssetLifecycle,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig, tokens: Arc<dyn TokenService>) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let asset_store: Arc<dyn AssetStore> =
            Arc::new(LocalAssetStore::new(config.images_dir.clone()));

        #[cfg(feature = "postgres")]
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) =
            if let Some(db_config) = &config.database {
                match database::connect(db_config).await {
                    Ok(conn) => {
                        // Both repositories share the same underlying connection pool.
                        // `DatabaseConnection` is not `Clone` when sea-orm's `mock`
                        // feature is unified into this build (via pluma-infra's test
                        // deps), so re-wrap the shared sqlx pool instead of cloning.
                        let shared = database::SqlxPostgresConnector::from_sqlx_postgres_pool(
                            conn.get_postgres_connection_pool().clone(),
                        );
                        (
                            Arc::new(PostgresUserRepository::new(shared)),
                            Arc::new(PostgresPostRepository::new(conn)),
                        )
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Self::memory_repos()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::memory_repos()
            };

        #[cfg(not(feature = "postgres"))]
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::memory_repos()
        };

        let accounts = AccountService::new(users.clone(), passwords, tokens);
        let assets = AssetLifecycle::new(asset_store.clone());
        let feed = FeedService::new(users, posts, assets.clone());

        tracing::info!("Application state initialized");

        Self {
            accounts,
            feed,
            asset_store,
            assets,
        }
    }

    fn memory_repos() -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
        )
    }
}

//! Application state - shared across all handlers.

use std::sync::Arc;

use bloghub_core::error::RepoError;
use bloghub_core::ports::{
    CategoryRepository, CommentRepository, PostRepository, ProfileRepository, TagRepository,
    UserRepository,
};
use bloghub_infra::database::{
    DatabaseConfig, DatabaseConnections, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresPostRepository, PostgresProfileRepository, PostgresTagRepository,
    PostgresUserRepository,
};

/// Shared application state holding one repository per entity.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Connect to the database and build the repository set.
    pub async fn new(db_config: &DatabaseConfig) -> Result<Self, RepoError> {
        let connections = DatabaseConnections::init(db_config)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        let db = connections.main;

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db)),
        })
    }
}

//! Database connection management and repository implementations.

mod connections;
pub mod entity;
mod postgres_base;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresProfileRepository, PostgresTagRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;

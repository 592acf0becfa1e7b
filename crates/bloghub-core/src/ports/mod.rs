//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use repository::{
    BaseRepository, CategoryRepository, CommentRepository, FEATURED_LIMIT, POSTS_PER_PAGE, Page,
    PostRepository, ProfileRepository, RELATED_LIMIT, TagRepository, UserRepository,
};

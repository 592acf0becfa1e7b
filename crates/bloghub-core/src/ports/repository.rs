use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, Post, Tag, User, UserProfile};
use crate::error::RepoError;

/// Page size for public post listings.
pub const POSTS_PER_PAGE: u64 = 10;

/// Maximum number of posts on the featured listing.
pub const FEATURED_LIMIT: u64 = 6;

/// Maximum number of related posts shown on a detail view.
pub const RELATED_LIMIT: u64 = 3;

/// One page of a paginated result set.
///
/// `page` is 1-based and already clamped to the valid range; out-of-range
/// requests never fail.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Uniqueness violations surface as
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with account lookup methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address (exact match).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by username, case-insensitively.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Profile repository - one profile per user account.
#[async_trait]
pub trait ProfileRepository: BaseRepository<UserProfile, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<UserProfile>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// Find a category by name, case-insensitively.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    /// All categories, ordered by name.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

/// Tag repository. Tags are created and attached by ID; lookups beyond
/// the base CRUD operations have not been needed so far.
pub trait TagRepository: BaseRepository<Tag, Uuid> {}

/// Post repository - all public listings are scoped to published posts.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Single post by slug, regardless of status. Used for owner-gated
    /// update/delete operations.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Single published post by slug, for the public detail view.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Published posts, newest first, paginated.
    async fn list_published(&self, page: u64) -> Result<Page<Post>, RepoError>;

    /// Published posts in a category, newest first, paginated.
    async fn list_published_in_category(
        &self,
        category_id: Uuid,
        page: u64,
    ) -> Result<Page<Post>, RepoError>;

    /// Published posts by an author, newest first, paginated.
    async fn list_published_by_author(
        &self,
        author_id: Uuid,
        page: u64,
    ) -> Result<Page<Post>, RepoError>;

    /// Case-insensitive substring search over title, excerpt, and category
    /// name. An empty query matches every published post.
    async fn search_published(&self, query: &str, page: u64) -> Result<Page<Post>, RepoError>;

    /// Published featured posts, newest first, capped at [`FEATURED_LIMIT`].
    async fn list_featured(&self) -> Result<Vec<Post>, RepoError>;

    /// Up to [`RELATED_LIMIT`] other published posts sharing a category.
    async fn list_related(&self, category_id: Uuid, exclude: Uuid)
    -> Result<Vec<Post>, RepoError>;

    /// Atomically add 1 to the view counter of a post.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError>;

    /// Replace the tag set attached to a post.
    async fn set_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError>;

    /// Tags attached to a post.
    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Total number of posts, any status.
    async fn count_all(&self) -> Result<u64, RepoError>;

    /// Number of distinct authors with at least one post.
    async fn count_authors(&self) -> Result<u64, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Approved comments on a post, newest first.
    async fn list_approved_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Bulk approve or unapprove a set of comments, returning the number
    /// of rows mutated.
    async fn set_approved(&self, ids: &[Uuid], approved: bool) -> Result<u64, RepoError>;
}

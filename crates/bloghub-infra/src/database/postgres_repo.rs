//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, ItemsAndPagesNumber, JoinType, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use uuid::Uuid;

use bloghub_core::domain::{Category, Comment, Post, Tag, User, UserProfile};
use bloghub_core::error::RepoError;
use bloghub_core::ports::{
    CategoryRepository, CommentRepository, FEATURED_LIMIT, POSTS_PER_PAGE, Page, PostRepository,
    ProfileRepository, RELATED_LIMIT, TagRepository, UserRepository,
};

use super::entity::{category, comment, post, post_tag, profile, tag, user};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<user::Entity>;

/// PostgreSQL profile repository.
pub type PostgresProfileRepository = PostgresBaseRepository<profile::Entity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<category::Entity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<tag::Entity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<post::Entity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<comment::Entity>;

/// Published posts, newest first. Base query for every public listing.
pub(crate) fn published_posts() -> Select<post::Entity> {
    post::Entity::find()
        .filter(post::Column::Status.eq(post::PostStatus::Published))
        .order_by_desc(post::Column::PublishedAt)
}

/// Case-insensitive substring search over title, excerpt, and category
/// name. An empty query deliberately matches every published post.
pub(crate) fn search_published_posts(query: &str) -> Select<post::Entity> {
    let select = published_posts();
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return select;
    }

    let pattern = format!("%{}%", trimmed.to_lowercase());
    select
        .join(JoinType::LeftJoin, post::Relation::Category.def())
        .filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((post::Entity, post::Column::Title))))
                        .like(pattern.as_str()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((post::Entity, post::Column::Excerpt))))
                        .like(pattern.as_str()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        category::Entity,
                        category::Column::Name,
                    ))))
                    .like(pattern.as_str()),
                ),
        )
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(user::Column::Username)))
                    .eq(username.to_lowercase()),
            )
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<UserProfile>, RepoError> {
        let result = profile::Entity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = category::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(category::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

impl TagRepository for PostgresTagRepository {}

impl PostgresPostRepository {
    /// Run a post listing through the paginator, clamping out-of-range
    /// page numbers to the nearest valid page instead of failing.
    async fn paginate(
        &self,
        select: Select<post::Entity>,
        page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let paginator = select.paginate(&self.db, POSTS_PER_PAGE);
        let ItemsAndPagesNumber {
            number_of_items,
            number_of_pages,
        } = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let page = page.clamp(1, number_of_pages.max(1));
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page {
            items: items.into_iter().map(Into::into).collect(),
            page,
            total_pages: number_of_pages,
            total_items: number_of_items,
        })
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Status.eq(post::PostStatus::Published))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list_published(&self, page: u64) -> Result<Page<Post>, RepoError> {
        self.paginate(published_posts(), page).await
    }

    async fn list_published_in_category(
        &self,
        category_id: Uuid,
        page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let select = published_posts().filter(post::Column::CategoryId.eq(category_id));
        self.paginate(select, page).await
    }

    async fn list_published_by_author(
        &self,
        author_id: Uuid,
        page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let select = published_posts().filter(post::Column::AuthorId.eq(author_id));
        self.paginate(select, page).await
    }

    async fn search_published(&self, query: &str, page: u64) -> Result<Page<Post>, RepoError> {
        self.paginate(search_published_posts(query), page).await
    }

    async fn list_featured(&self) -> Result<Vec<Post>, RepoError> {
        let result = published_posts()
            .filter(post::Column::IsFeatured.eq(true))
            .limit(FEATURED_LIMIT)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_related(
        &self,
        category_id: Uuid,
        exclude: Uuid,
    ) -> Result<Vec<Post>, RepoError> {
        let result = published_posts()
            .filter(post::Column::CategoryId.eq(category_id))
            .filter(post::Column::Id.ne(exclude))
            .limit(RELATED_LIMIT)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        // Single-statement increment; concurrent detail views never lose
        // updates.
        let result = post::Entity::update_many()
            .col_expr(
                post::Column::ViewsCount,
                Expr::col(post::Column::ViewsCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn set_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError> {
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let rows = tag_ids.iter().map(|tag_id| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(*tag_id),
        });

        post_tag::Entity::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let Some(model) = post::Entity::find_by_id(post_id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        else {
            return Ok(Vec::new());
        };

        let tags = model
            .find_related(tag::Entity)
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(tags.into_iter().map(Into::into).collect())
    }

    async fn count_all(&self) -> Result<u64, RepoError> {
        post::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn count_authors(&self) -> Result<u64, RepoError> {
        post::Entity::find()
            .select_only()
            .column(post::Column::AuthorId)
            .distinct()
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_approved_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::IsApproved.eq(true))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn set_approved(&self, ids: &[Uuid], approved: bool) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = comment::Entity::update_many()
            .col_expr(comment::Column::IsApproved, Expr::value(approved))
            .filter(comment::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

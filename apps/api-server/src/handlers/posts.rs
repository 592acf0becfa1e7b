//! Post handlers: listing, detail, and the owner-gated write operations.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use bloghub_core::domain::{Comment, Post, PostStatus};
use bloghub_core::ports::Page;
use bloghub_shared::{
    ApiResponse, CategoryResponse, CommentResponse, CreateCommentRequest, CreatePostRequest,
    ErrorResponse, PostDetailResponse, PostListResponse, PostResponse, TagResponse,
    UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        category_id: post.category_id,
        title: post.title,
        slug: post.slug,
        excerpt: post.excerpt,
        content: post.content,
        status: post.status.as_str().to_string(),
        is_featured: post.is_featured,
        allow_comments: post.allow_comments,
        views_count: post.views_count,
        created_at: post.created_at,
        published_at: post.published_at,
    }
}

pub(crate) fn page_response(page: Page<Post>) -> PostListResponse {
    PostListResponse {
        posts: page.items.into_iter().map(post_response).collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    pub category: Option<String>,
}

fn default_page() -> u64 {
    1
}

/// List published posts, newest first, optionally filtered by category name.
///
/// An unknown category filter yields an empty listing rather than an error.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = match &query.category {
        Some(name) => match state.categories.find_by_name(name).await? {
            Some(category) => {
                state
                    .posts
                    .list_published_in_category(category.id, query.page)
                    .await?
            }
            None => Page {
                items: Vec::new(),
                page: 1,
                total_pages: 0,
                total_items: 0,
            },
        },
        None => state.posts.list_published(query.page).await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(page))))
}

/// Published post detail with author, category, tags, related posts, and
/// approved comments. Each successful view bumps the view counter.
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let Some(mut post) = state.posts.find_published_by_slug(&slug).await? else {
        return Err(AppError::NotFound(format!("No post found at '{}'", slug)));
    };

    state.posts.increment_views(post.id).await?;
    // Reflect the increment without a second read.
    post.views_count += 1;

    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();

    let category = match post.category_id {
        Some(id) => state.categories.find_by_id(id).await?.map(|c| CategoryResponse {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
        }),
        None => None,
    };

    let related = match post.category_id {
        Some(category_id) => state.posts.list_related(category_id, post.id).await?,
        None => Vec::new(),
    };

    let tags = state.posts.tags_of(post.id).await?;
    let comments = state.comments.list_approved_for_post(post.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetailResponse {
        post: post_response(post),
        author,
        category,
        tags: tags
            .into_iter()
            .map(|t| TagResponse {
                id: t.id,
                name: t.name,
                slug: t.slug,
            })
            .collect(),
        related: related.into_iter().map(post_response).collect(),
        comments: comments
            .into_iter()
            .map(|c| CommentResponse {
                id: c.id,
                post_id: c.post_id,
                author_id: c.author_id,
                content: c.content,
                created_at: c.created_at,
            })
            .collect(),
    })))
}

/// Create a post. Posts go live immediately.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    if body.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required.".to_string()));
    }
    if body.content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required.".to_string()));
    }

    let mut post = Post::new(
        identity.user_id,
        body.title,
        body.excerpt,
        body.content,
        body.category_id,
    );
    post.is_featured = body.is_featured;
    post.allow_comments = body.allow_comments;
    post.set_status(PostStatus::Published);

    let post = state.posts.insert(post).await.map_err(|e| match e {
        bloghub_core::error::RepoError::Constraint(_) => {
            AppError::Conflict("A post with this slug already exists.".to_string())
        }
        other => other.into(),
    })?;

    if !body.tag_ids.is_empty() {
        state.posts.set_tags(post.id, &body.tag_ids).await?;
    }

    tracing::info!(post_id = %post.id, slug = %post.slug, "Post created");

    let location = format!("/posts/{}/", post.slug);
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .json(ApiResponse::ok_with_message(
            post_response(post),
            "Your post has been created!",
        )))
}

fn owner_redirect(slug: &str, detail: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/posts/{}/", slug)))
        .json(ErrorResponse::new(403, "Forbidden").with_detail(detail))
}

/// Update a post. Only the author may edit; anyone else is redirected back
/// to the detail view. The slug is never regenerated.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let body = body.into_inner();

    let Some(mut post) = state.posts.find_by_slug(&slug).await? else {
        return Err(AppError::NotFound(format!("No post found at '{}'", slug)));
    };

    if post.author_id != identity.user_id {
        return Ok(owner_redirect(&slug, "You can only edit your own posts."));
    }

    if let Some(title) = body.title {
        post.title = title;
    }
    if let Some(excerpt) = body.excerpt {
        post.excerpt = excerpt;
    }
    if let Some(content) = body.content {
        post.content = content;
    }
    if let Some(category_id) = body.category_id {
        post.category_id = Some(category_id);
    }
    if let Some(status) = body.status {
        let Some(status) = PostStatus::parse(&status) else {
            return Err(AppError::BadRequest(format!(
                "'{}' is not a valid post status",
                status
            )));
        };
        post.set_status(status);
    }
    if let Some(is_featured) = body.is_featured {
        post.is_featured = is_featured;
    }
    if let Some(allow_comments) = body.allow_comments {
        post.allow_comments = allow_comments;
    }
    post.touch();

    let post = state.posts.update(post).await?;

    if let Some(tag_ids) = body.tag_ids {
        state.posts.set_tags(post.id, &tag_ids).await?;
    }

    tracing::debug!(post_id = %post.id, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_response(post),
        "Your post has been updated!",
    )))
}

/// Delete a post. Only the author may delete.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let Some(post) = state.posts.find_by_slug(&slug).await? else {
        return Err(AppError::NotFound(format!("No post found at '{}'", slug)));
    };

    if post.author_id != identity.user_id {
        return Ok(owner_redirect(&slug, "You can only delete your own posts."));
    }

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = %post.id, "Post deleted");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/posts/"))
        .json(ApiResponse::message("Your post has been deleted.")))
}

/// Comment on a published post. New comments await moderation before they
/// become publicly visible.
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let body = body.into_inner();

    let Some(post) = state.posts.find_published_by_slug(&slug).await? else {
        return Err(AppError::NotFound(format!("No post found at '{}'", slug)));
    };

    if !post.allow_comments {
        return Err(AppError::Forbidden);
    }

    if body.content.trim().is_empty() {
        return Err(AppError::BadRequest("Comment cannot be empty.".to_string()));
    }

    let comment = state
        .comments
        .insert(Comment::new(post.id, identity.user_id, body.content))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        CommentResponse {
            id: comment.id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            content: comment.content,
            created_at: comment.created_at,
        },
        "Your comment is awaiting approval.",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn non_owner_refusal_redirects_back_to_the_post() {
        let resp = owner_redirect("my-post", "You can only edit your own posts.");

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/posts/my-post/"
        );

        let body = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], 403);
        assert_eq!(body["detail"], "You can only edit your own posts.");
    }
}

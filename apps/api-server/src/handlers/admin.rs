//! Staff-only handlers: comment moderation, categories, tags.

use actix_web::{HttpResponse, web};

use bloghub_core::domain::{Category, Tag};
use bloghub_shared::{
    ApiResponse, CategoryResponse, CreateCategoryRequest, CreateTagRequest,
    ModerateCommentsRequest, ModerateCommentsResponse, TagResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn require_staff(identity: &Identity) -> Result<(), AppError> {
    if identity.is_staff() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Bulk approve or unapprove comments.
pub async fn moderate_comments(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ModerateCommentsRequest>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    let body = body.into_inner();

    let updated = state.comments.set_approved(&body.ids, body.approved).await?;

    tracing::info!(
        moderator = %identity.username,
        updated,
        approved = body.approved,
        "Comments moderated"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ModerateCommentsResponse { updated })))
}

/// Create a category.
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    let body = body.into_inner();

    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required.".to_string()));
    }

    let category = state
        .categories
        .insert(Category::new(body.name, body.description))
        .await
        .map_err(|e| match e {
            bloghub_core::error::RepoError::Constraint(_) => {
                AppError::Conflict("A category with this name already exists.".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CategoryResponse {
        id: category.id,
        name: category.name,
        slug: category.slug,
        description: category.description,
    })))
}

/// Create a tag.
pub async fn create_tag(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateTagRequest>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    let body = body.into_inner();

    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required.".to_string()));
    }

    let tag = state
        .tags
        .insert(Tag::new(body.name))
        .await
        .map_err(|e| match e {
            bloghub_core::error::RepoError::Constraint(_) => {
                AppError::Conflict("A tag with this name already exists.".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(TagResponse {
        id: tag.id,
        name: tag.name,
        slug: tag.slug,
    })))
}

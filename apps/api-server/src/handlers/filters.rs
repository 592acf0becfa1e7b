//! Listing handlers: category and author pages, search, and featured posts.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use bloghub_shared::ApiResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::posts::{page_response, post_response};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

/// Redirect mixed-case names to their canonical lowercase URL.
fn canonicalize(prefix: &str, name: &str, page: u64) -> Option<HttpResponse> {
    let lower = name.to_lowercase();
    if lower == name {
        return None;
    }
    let location = if page > 1 {
        format!("/{}/{}/?page={}", prefix, lower, page)
    } else {
        format!("/{}/{}/", prefix, lower)
    };
    Some(
        HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .finish(),
    )
}

/// Published posts in a category, addressed by category name.
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();
    if let Some(redirect) = canonicalize("category", &name, query.page) {
        return Ok(redirect);
    }

    let Some(category) = state.categories.find_by_name(&name).await? else {
        return Err(AppError::NotFound(format!("No category named '{}'", name)));
    };

    let page = state
        .posts
        .list_published_in_category(category.id, query.page)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(page))))
}

/// Published posts by an author, addressed by username.
pub async fn author_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();
    if let Some(redirect) = canonicalize("author", &name, query.page) {
        return Ok(redirect);
    }

    let Some(author) = state.users.find_by_username(&name).await? else {
        return Err(AppError::NotFound(format!("No author named '{}'", name)));
    };

    let page = state
        .posts
        .list_published_by_author(author.id, query.page)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(page))))
}

/// Search published posts by title, excerpt, or category name.
///
/// An empty query returns the full published listing.
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.search_published(&query.q, query.page).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(page))))
}

/// Featured published posts, newest first.
pub async fn featured_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_featured().await?;
    let posts: Vec<_> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn location(resp: &HttpResponse) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .expect("redirect must carry a Location header")
            .to_str()
            .unwrap()
    }

    #[test]
    fn mixed_case_category_name_redirects_to_lowercase() {
        let resp = canonicalize("category", "Technology", 1).expect("redirect expected");

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/category/technology/");
    }

    #[test]
    fn canonicalizing_redirect_preserves_the_page_number() {
        let resp = canonicalize("author", "Sarah", 3).expect("redirect expected");

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/author/sarah/?page=3");
    }

    #[test]
    fn lowercase_names_are_served_directly() {
        assert!(canonicalize("category", "technology", 1).is_none());
        assert!(canonicalize("author", "sarah", 2).is_none());
    }
}

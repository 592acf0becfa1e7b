//! Site pages: home, about, and the contact form.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use bloghub_shared::{ApiResponse, CategoryResponse, ContactRequest, PostResponse};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::posts::post_response;

#[derive(Serialize)]
pub struct HomeResponse {
    pub featured_posts: Vec<PostResponse>,
    pub categories: Vec<CategoryResponse>,
    pub total_posts: u64,
    pub total_authors: u64,
    pub current_user: Option<String>,
}

/// Home page data: featured posts, the category list, and site-wide counts.
pub async fn home(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let featured = state.posts.list_featured().await?;
    let categories = state.categories.list().await?;
    let total_posts = state.posts.count_all().await?;
    let total_authors = state.posts.count_authors().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(HomeResponse {
        featured_posts: featured.into_iter().map(post_response).collect(),
        categories: categories
            .into_iter()
            .map(|c| CategoryResponse {
                id: c.id,
                name: c.name,
                slug: c.slug,
                description: c.description,
            })
            .collect(),
        total_posts,
        total_authors,
        current_user: identity.0.map(|i| i.username),
    })))
}

#[derive(Serialize)]
struct AboutResponse {
    title: &'static str,
    description: &'static str,
}

/// Static about page data.
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(AboutResponse {
        title: "About BlogHub",
        description: "BlogHub is a community publishing platform where writers \
                      share posts across categories and readers join the \
                      conversation through comments.",
    }))
}

#[derive(Serialize)]
struct ContactInfo {
    email: &'static str,
    phone: &'static str,
    address: &'static str,
}

/// Contact details shown alongside the form.
pub async fn contact_info() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(ContactInfo {
        email: "contact@bloghub.example",
        phone: "+1 555 010 0100",
        address: "123 Publisher Lane",
    }))
}

/// Handle a contact form submission.
///
/// All fields are required and the email must look like an email address.
/// The message itself is only logged; there is no outbound mail delivery.
pub async fn submit_contact(form: web::Json<ContactRequest>) -> HttpResponse {
    let form = form.into_inner();

    if form.name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.subject.trim().is_empty()
        || form.message.trim().is_empty()
    {
        return HttpResponse::BadRequest().json(bloghub_shared::ErrorResponse::bad_request(
            "Please fill in all fields.",
        ));
    }

    if !form.email.contains('@') {
        return HttpResponse::BadRequest().json(bloghub_shared::ErrorResponse::bad_request(
            "Please enter a valid email address.",
        ));
    }

    tracing::info!(
        subject = %form.subject,
        from = %form.email,
        "Contact form submission received"
    );

    HttpResponse::Ok().json(ApiResponse::message(format!(
        "Thank you {}! We received your message and will respond soon.",
        form.name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    fn contact_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().route("/contact/", web::post().to(submit_contact))
    }

    #[actix_web::test]
    async fn contact_accepts_complete_submission() {
        let app = test::init_service(contact_app()).await;

        let req = test::TestRequest::post()
            .uri("/contact/")
            .set_json(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "subject": "Hello",
                "message": "Great site."
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            "Thank you Ada! We received your message and will respond soon."
        );
    }

    #[actix_web::test]
    async fn contact_rejects_missing_fields() {
        let app = test::init_service(contact_app()).await;

        let req = test::TestRequest::post()
            .uri("/contact/")
            .set_json(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Please fill in all fields.");
    }

    #[actix_web::test]
    async fn contact_rejects_invalid_email() {
        let app = test::init_service(contact_app()).await;

        let req = test::TestRequest::post()
            .uri("/contact/")
            .set_json(serde_json::json!({
                "name": "Ada",
                "email": "not-an-email",
                "subject": "Hello",
                "message": "Great site."
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Please enter a valid email address.");
    }
}

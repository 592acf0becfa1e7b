//! HTTP request handlers.

pub mod admin;
pub mod auth;
pub mod filters;
pub mod health;
pub mod pages;
pub mod posts;
pub mod profile;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::home))
        .route("/health", web::get().to(health::health_check))
        .route("/about/", web::get().to(pages::about))
        .route("/contact/", web::get().to(pages::contact_info))
        .route("/contact/", web::post().to(pages::submit_contact))
        // Accounts
        .route("/register/", web::post().to(auth::register))
        .route("/login/", web::post().to(auth::login))
        .route("/logout/", web::post().to(auth::logout))
        .route("/profile/update/", web::post().to(profile::update_profile))
        // Posts. The create route is registered before the slug routes so
        // that "create" is never captured as a slug.
        .route("/posts/", web::get().to(posts::list_posts))
        .route("/posts/create/", web::post().to(posts::create_post))
        .route("/posts/{slug}/", web::get().to(posts::post_detail))
        .route("/posts/{slug}/update/", web::post().to(posts::update_post))
        .route("/posts/{slug}/delete/", web::post().to(posts::delete_post))
        .route(
            "/posts/{slug}/comments/",
            web::post().to(posts::create_comment),
        )
        // Listings
        .route("/category/{name}/", web::get().to(filters::category_posts))
        .route("/author/{name}/", web::get().to(filters::author_posts))
        .route("/search/", web::get().to(filters::search_posts))
        .route("/featured-posts/", web::get().to(filters::featured_posts))
        // Staff-only operations
        .service(
            web::scope("/admin")
                .route(
                    "/comments/moderate/",
                    web::post().to(admin::moderate_comments),
                )
                .route("/categories/", web::post().to(admin::create_category))
                .route("/tags/", web::post().to(admin::create_tag)),
        );
}

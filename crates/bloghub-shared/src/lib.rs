//! # BlogHub Shared
//!
//! Request/response types shared between the API server and its clients.

pub mod dto;
pub mod response;

pub use dto::*;
pub use response::{ApiResponse, ErrorResponse};

#[cfg(test)]
mod tests {
    use crate::CreatePostRequest;

    #[test]
    fn create_post_request_fills_form_defaults() {
        // Minimal submission: only title, content, and category are given.
        let request: CreatePostRequest = serde_json::from_str(
            r#"{"title": "Hello", "content": "World", "category_id": null}"#,
        )
        .expect("minimal request must deserialize");

        assert!(request.excerpt.is_empty());
        assert!(request.tag_ids.is_empty());
        assert!(!request.is_featured);
        assert!(request.allow_comments);
    }
}

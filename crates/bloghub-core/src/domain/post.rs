use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::slugify;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            "archived" => Some(PostStatus::Archived),
            _ => None,
        }
    }
}

/// Post entity - the main unit of published content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub status: PostStatus,
    pub is_featured: bool,
    pub allow_comments: bool,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new draft post. The slug is derived from the title; slug
    /// uniqueness is enforced by the database.
    pub fn new(
        author_id: Uuid,
        title: String,
        excerpt: String,
        content: String,
        category_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        let slug = slugify(&title);
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id,
            title,
            slug,
            excerpt,
            content,
            status: PostStatus::Draft,
            is_featured: false,
            allow_comments: true,
            views_count: 0,
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }

    /// Change the publication status.
    ///
    /// The publish timestamp is stamped at the first transition into
    /// `Published` and never overwritten on later saves.
    pub fn set_status(&mut self, status: PostStatus) {
        if status == PostStatus::Published && self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
        self.status = status;
    }

    /// Refresh the modification timestamp before an update.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(title: &str) -> Post {
        Post::new(
            Uuid::new_v4(),
            title.to_string(),
            "excerpt".to_string(),
            "content".to_string(),
            None,
        )
    }

    #[test]
    fn new_post_derives_slug_from_title() {
        let post = sample_post("Hello World!!");
        assert_eq!(post.slug, "hello-world");
    }

    #[test]
    fn new_post_starts_as_unpublished_draft() {
        let post = sample_post("Draft");
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.published_at.is_none());
        assert_eq!(post.views_count, 0);
    }

    #[test]
    fn publishing_stamps_timestamp_once() {
        let mut post = sample_post("Stamped");

        post.set_status(PostStatus::Published);
        let first = post.published_at.expect("published_at must be set");

        // Re-saving while already published must not move the timestamp.
        post.set_status(PostStatus::Published);
        assert_eq!(post.published_at, Some(first));

        // Archiving and re-publishing keeps the original timestamp too.
        post.set_status(PostStatus::Archived);
        post.set_status(PostStatus::Published);
        assert_eq!(post.published_at, Some(first));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
            assert_eq!(PostStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PostStatus::parse("bogus"), None);
    }
}

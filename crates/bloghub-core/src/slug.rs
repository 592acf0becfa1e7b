//! Slug derivation for categories, tags, and posts.
//!
//! Slugs are lowercase, hyphen-separated, URL-safe transformations of a
//! name or title. Collisions are rejected by the database uniqueness
//! constraint rather than silently disambiguated.

/// Derive a URL-safe slug from arbitrary text.
pub fn slugify(text: &str) -> String {
    slug::slugify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("Hello World!!"), "hello-world");
        assert_eq!(slugify("Rust: 2024 & Beyond?"), "rust-2024-beyond");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("  a   b  "), "a-b");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(slugify("Getting Started"), slugify("Getting Started"));
    }
}

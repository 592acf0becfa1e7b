//! Domain entities - the core business objects.

mod category;
mod comment;
mod post;
mod profile;
mod tag;
mod user;

pub use category::Category;
pub use comment::Comment;
pub use post::{Post, PostStatus};
pub use profile::UserProfile;
pub use tag::Tag;
pub use user::User;

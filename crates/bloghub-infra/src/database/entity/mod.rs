//! SeaORM entities mirroring the relational schema.

pub mod category;
pub mod comment;
pub mod post;
pub mod post_tag;
pub mod profile;
pub mod tag;
pub mod user;

//! Content module - fetches and shapes posts from the content API

mod client;
pub mod document;
mod post;

pub use client::{public_cursor, ContentClient};
pub use post::{ContentBlock, PostDetail, PostPage, PostSummary};

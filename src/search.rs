//! In-memory post search: case-insensitive substring matching over title,
//! description, body, category and tags. No ranking; results keep the
//! input order.

use crate::model::Post;

/// Interactive searches shorter than this (after trimming) are not run.
/// That gate belongs to the route layer; [`search_posts`] itself applies
/// plain substring semantics, so an empty query matches everything.
pub const MIN_QUERY_LEN: usize = 2;

pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let query = query.to_lowercase();
    posts.iter().filter(|post| matches(post, &query)).collect()
}

fn matches(post: &Post, query: &str) -> bool {
    post.title.to_lowercase().contains(query)
        || post.description.to_lowercase().contains(query)
        || post.content.0.to_lowercase().contains(query)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(query))
        || post.category.to_lowercase().contains(query)
}

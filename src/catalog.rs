//! Pure helpers over the materialized post list: the flag filters, related
//! posts, and per-category rollups the pages are built from.

use crate::model::{Category, CategorySummary, Post};

pub const RELATED_LIMIT: usize = 3;

pub fn featured_posts<'a>(posts: &'a [Post]) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.featured).collect()
}

pub fn trending_posts<'a>(posts: &'a [Post]) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.trending).collect()
}

/// Posts whose category slugifies to `category_slug`, in input order.
pub fn posts_by_category<'a>(posts: &'a [Post], category_slug: &str) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| slug::slugify(&p.category) == category_slug)
        .collect()
}

/// Same category or at least one shared tag, excluding the post itself.
pub fn related_posts<'a>(posts: &'a [Post], current: &Post, limit: usize) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| {
            p.slug != current.slug
                && (p.category == current.category
                    || p.tags.iter().any(|tag| current.tags.contains(tag)))
        })
        .take(limit)
        .collect()
}

/// Rollups for every known category, busiest first.
pub fn categories(posts: &[Post]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Category::all()
        .iter()
        .map(|category| CategorySummary {
            slug: category.slug(),
            name: category.name().to_string(),
            description: category.description(),
            post_count: posts.iter().filter(|p| p.category == category.name()).count(),
        })
        .collect();
    summaries.sort_by(|a, b| b.post_count.cmp(&a.post_count));
    summaries
}

//! Shared fixtures for unit tests.

use crate::model::{Html, Post, PostStatus};
use time::OffsetDateTime;

pub fn make_post(id: i64, title: &str, category: &str, tags: &[&str]) -> Post {
    let published = OffsetDateTime::from_unix_timestamp(1_700_000_000 + id * 86_400)
        .expect("fixture timestamp");
    Post {
        id,
        slug: format!("post-{}", id),
        title: title.to_string(),
        description: format!("About {}", title),
        content: Html(format!("<p>{}</p>", title)),
        excerpt: format!("About {}", title),
        author: "Newsroom".to_string(),
        created_at: published,
        published_at: Some(published),
        updated_at: None,
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        keywords: Vec::new(),
        featured_image: None,
        featured: false,
        trending: false,
        reading_time: "1 min read".to_string(),
        seo_title: None,
        seo_description: None,
        status: PostStatus::Published,
        views: 0,
        shares: 0,
        likes: 0,
    }
}

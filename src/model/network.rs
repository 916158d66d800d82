use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::Error;
use crate::model::database::{DashboardStats, NewPost};
use crate::model::{Category, Post, PostStatus};
use crate::tags;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_KEYWORDS: usize = 10;

fn default_status() -> PostStatus {
    PostStatus::Draft
}

/// Admin editor payload for creating or updating a post. Tags and keywords
/// arrive as comma-separated text, the shape of the editor's input fields.
#[derive(Deserialize, Debug)]
pub struct PostForm {
    pub title: String,
    pub description: String,
    pub markdown_content: String,
    pub category: Category,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub trending: bool,
    #[serde(default = "default_status")]
    pub status: PostStatus,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".to_string()));
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(Error::Validation(format!(
                "title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Error::Validation(format!(
                "description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
        Ok(())
    }

    fn tag_list(&self) -> Vec<String> {
        match &self.tags {
            Some(raw) => tags::clean_tags(raw.split(',')),
            None => Vec::new(),
        }
    }

    fn keyword_list(&self) -> Vec<String> {
        match &self.keywords {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .take(MAX_KEYWORDS)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn into_new_post(self, default_author: &str) -> NewPost {
        let tags = self.tag_list();
        let keywords = self.keyword_list();
        let author = match self.author {
            Some(author) if !author.trim().is_empty() => author,
            _ => default_author.to_string(),
        };

        NewPost {
            slug: slug::slugify(&self.title),
            title: self.title,
            description: self.description,
            markdown_content: self.markdown_content,
            excerpt: self.excerpt.filter(|e| !e.trim().is_empty()),
            author,
            category: self.category.name().to_string(),
            tags,
            keywords,
            featured_image: self.featured_image.filter(|f| !f.trim().is_empty()),
            featured: self.featured,
            trending: self.trending,
            status: self.status,
            seo_title: self.seo_title.filter(|t| !t.trim().is_empty()),
            seo_description: self.seo_description.filter(|d| !d.trim().is_empty()),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

/// Draft text sent by the editor's "generate" button. Category is a free
/// string here on purpose: generation degrades gracefully on unknown input.
#[derive(Deserialize, Debug)]
pub struct GenerateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Serialize, Debug)]
pub struct GenerateResponse {
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub suggested_tags: Vec<String>,
    pub suggested_keywords: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct NewsletterForm {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "website".to_string()
}

#[derive(Serialize, Debug)]
pub struct NewsletterResponse {
    pub success: bool,
    pub message: &'static str,
    pub email: String,
    #[serde(with = "time::serde::iso8601")]
    pub subscribed_at: OffsetDateTime,
    pub source: String,
}

/// Compact listing row for the admin dashboard.
#[derive(Serialize, Debug)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub status: PostStatus,
    pub views: i64,
    pub shares: i64,
    pub likes: i64,
    #[serde(with = "time::serde::iso8601::option")]
    pub published_at: Option<OffsetDateTime>,
    pub category: String,
    pub featured: bool,
    pub trending: bool,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        PostSummary {
            id: post.id,
            title: post.title.clone(),
            status: post.status,
            views: post.views,
            shares: post.shares,
            likes: post.likes,
            published_at: post.published_at,
            category: post.category.clone(),
            featured: post.featured,
            trending: post.trending,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DashboardResponse {
    pub posts: Vec<PostSummary>,
    pub stats: DashboardStats,
}

#[derive(Serialize, Debug)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str) -> PostForm {
        PostForm {
            title: title.to_string(),
            description: "desc".to_string(),
            markdown_content: "body".to_string(),
            category: Category::Crypto,
            excerpt: None,
            author: None,
            tags: Some("Bitcoin , bitcoin,CRYPTO,".to_string()),
            keywords: Some(" bitcoin news , , crypto market ".to_string()),
            featured_image: None,
            featured: false,
            trending: false,
            status: PostStatus::Draft,
            seo_title: None,
            seo_description: None,
        }
    }

    #[test]
    fn form_derives_slug_and_cleans_lists() {
        let new = form("Bitcoin Hits $100K!").into_new_post("Newsroom");
        assert_eq!(new.slug, "bitcoin-hits-100k");
        assert_eq!(new.tags, vec!["bitcoin", "crypto"]);
        assert_eq!(new.keywords, vec!["bitcoin news", "crypto market"]);
        assert_eq!(new.author, "Newsroom");
        assert_eq!(new.category, "Crypto");
    }

    #[test]
    fn validation_rejects_empty_and_oversized_titles() {
        assert!(form("  ").validate().is_err());
        assert!(form(&"t".repeat(201)).validate().is_err());
        assert!(form("fine").validate().is_ok());
    }

    #[test]
    fn category_deserializes_from_display_name() {
        let json = r#"{"title":"t","description":"d","markdown_content":"m","category":"Breaking News"}"#;
        let form: PostForm = serde_json::from_str(json).expect("parses");
        assert_eq!(form.category, Category::BreakingNews);
        assert_eq!(form.status, PostStatus::Draft);
    }
}

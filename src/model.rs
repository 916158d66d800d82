use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub mod database;
pub mod network;

/// Rendered, trusted HTML.
#[derive(Serialize, Clone, Debug)]
#[serde(transparent)]
pub struct Html(pub String);

/// The closed category set. Posts store the display name; the enum exists
/// so the write path, navigation and sitemap agree on what exists.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "Breaking News")]
    BreakingNews,
    #[serde(rename = "Viral Stories")]
    ViralStories,
    #[serde(rename = "AI & Tech")]
    AiTech,
    #[serde(rename = "Crypto")]
    Crypto,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Investment")]
    Investment,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::BreakingNews,
            Category::ViralStories,
            Category::AiTech,
            Category::Crypto,
            Category::RealEstate,
            Category::Investment,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::BreakingNews => "Breaking News",
            Category::ViralStories => "Viral Stories",
            Category::AiTech => "AI & Tech",
            Category::Crypto => "Crypto",
            Category::RealEstate => "Real Estate",
            Category::Investment => "Investment",
        }
    }

    pub fn slug(&self) -> String {
        slug::slugify(self.name())
    }

    pub fn description(&self) -> String {
        format!("Latest insights about {}", self.name().to_lowercase())
    }

    pub fn from_slug(s: &str) -> Option<Category> {
        Category::all().iter().copied().find(|c| c.slug() == s)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
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
}

impl std::str::FromStr for PostStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            _ => Err(()),
        }
    }
}

/// A saturated post: the raw row plus everything derived from it (rendered
/// body, excerpt fallback, reading time).
#[derive(Serialize, Clone, Debug)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: Html,
    pub excerpt: String,
    pub author: String,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::iso8601::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::iso8601::option")]
    pub updated_at: Option<OffsetDateTime>,
    pub category: String,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub featured_image: Option<String>,
    pub featured: bool,
    pub trending: bool,
    pub reading_time: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub status: PostStatus,
    pub views: i64,
    pub shares: i64,
    pub likes: i64,
}

/// Per-category rollup for navigation and the sitemap.
#[derive(Serialize, Clone, Debug)]
pub struct CategorySummary {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub post_count: usize,
}

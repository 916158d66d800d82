use futures_util::TryStreamExt;
use serde::Serialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::model::{Html, Post, PostStatus};
use crate::text;

/// Raw `post` row. Saturation derives everything the readers see.
#[derive(sqlx::FromRow, Debug)]
pub struct DbPost {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub markdown_content: String,
    pub excerpt: Option<String>,
    pub author: String,
    pub created_at: OffsetDateTime,
    pub published_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
    pub category: String,
    pub tags: String,
    pub keywords: String,
    pub featured_image: Option<String>,
    pub featured: bool,
    pub trending: bool,
    pub status: String,
    pub views: i64,
    pub shares: i64,
    pub likes: i64,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

impl DbPost {
    /// Render the stored markdown and fill in the derived fields. Total:
    /// malformed stored lists degrade to empty, never to an error.
    pub fn saturate(self) -> Post {
        let mut content = String::new();
        let parser =
            pulldown_cmark::Parser::new_ext(&self.markdown_content, pulldown_cmark::Options::all());
        pulldown_cmark::html::push_html(&mut content, parser);

        let excerpt = match self.excerpt {
            Some(e) if !e.trim().is_empty() => e,
            _ => text::excerpt(&self.markdown_content, text::EXCERPT_LEN),
        };

        let reading_time = text::reading_time(&self.markdown_content);
        let tags = serde_json::from_str(&self.tags).unwrap_or_default();
        let keywords = serde_json::from_str(&self.keywords).unwrap_or_default();
        let status = self.status.parse().unwrap_or(PostStatus::Draft);

        Post {
            id: self.id,
            slug: self.slug,
            title: self.title,
            description: self.description,
            content: Html(content),
            excerpt,
            author: self.author,
            created_at: self.created_at,
            published_at: self.published_at,
            updated_at: self.updated_at,
            category: self.category,
            tags,
            keywords,
            featured_image: self.featured_image,
            featured: self.featured,
            trending: self.trending,
            reading_time,
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            status,
            views: self.views,
            shares: self.shares,
            likes: self.likes,
        }
    }
}

/// Everything needed to insert a post. Built from a validated form, see
/// [`crate::model::network::PostForm::into_new_post`].
#[derive(Debug)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub markdown_content: String,
    pub excerpt: Option<String>,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub featured_image: Option<String>,
    pub featured: bool,
    pub trending: bool,
    pub status: PostStatus,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Serialize, sqlx::FromRow, Debug)]
pub struct DashboardStats {
    pub total_posts: i64,
    pub published_posts: i64,
    pub draft_posts: i64,
    pub total_views: i64,
    pub total_shares: i64,
    pub total_likes: i64,
}

pub async fn all_posts(pool: &SqlitePool, include_unpublished: bool) -> Result<Vec<Post>> {
    let sql = if include_unpublished {
        "select * from post order by coalesce(published_at, created_at) desc"
    } else {
        "select * from post where status = 'published' order by published_at desc"
    };

    let mut rows = sqlx::query_as::<_, DbPost>(sql).fetch(pool);
    let mut posts = Vec::new();
    while let Some(row) = rows.try_next().await? {
        posts.push(row.saturate());
    }
    Ok(posts)
}

pub async fn post_by_slug(
    pool: &SqlitePool,
    slug: &str,
    published_only: bool,
) -> Result<Option<Post>> {
    let sql = if published_only {
        "select * from post where slug = ? and status = 'published'"
    } else {
        "select * from post where slug = ?"
    };

    let row = sqlx::query_as::<_, DbPost>(sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(DbPost::saturate))
}

pub async fn post_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Post>> {
    let row = sqlx::query_as::<_, DbPost>("select * from post where id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(DbPost::saturate))
}

/// Insert a new post and return its id. Publishing at creation stamps
/// `published_at` right away; drafts get stamped when they flip later.
pub async fn insert_post(pool: &SqlitePool, new: NewPost) -> Result<i64> {
    let now = OffsetDateTime::now_utc();
    let published_at = (new.status == PostStatus::Published).then_some(now);
    let tags = serde_json::to_string(&new.tags).unwrap_or_else(|_| "[]".to_string());
    let keywords = serde_json::to_string(&new.keywords).unwrap_or_else(|_| "[]".to_string());

    let result = sqlx::query_scalar::<_, i64>(
        "insert into post (slug, title, description, markdown_content, excerpt, author, \
         created_at, published_at, category, tags, keywords, featured_image, featured, \
         trending, status, seo_title, seo_description) \
         values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) returning id",
    )
    .bind(&new.slug)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.markdown_content)
    .bind(&new.excerpt)
    .bind(&new.author)
    .bind(now)
    .bind(published_at)
    .bind(&new.category)
    .bind(&tags)
    .bind(&keywords)
    .bind(&new.featured_image)
    .bind(new.featured)
    .bind(new.trending)
    .bind(new.status.as_str())
    .bind(&new.seo_title)
    .bind(&new.seo_description)
    .fetch_one(pool)
    .await;

    match result {
        Ok(id) => Ok(id),
        Err(e) if is_unique_violation(&e) => Err(Error::Validation(format!(
            "a post with slug \"{}\" already exists",
            new.slug
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Update an existing post. The slug never changes after creation; a
/// draft that flips to published gets `published_at` stamped once.
pub async fn update_post(pool: &SqlitePool, id: i64, new: NewPost) -> Result<Post> {
    let existing = post_by_id(pool, id).await?.ok_or(Error::NotFound)?;

    let now = OffsetDateTime::now_utc();
    let published_at = match (existing.published_at, new.status) {
        (None, PostStatus::Published) => Some(now),
        (stamped, _) => stamped,
    };
    let tags = serde_json::to_string(&new.tags).unwrap_or_else(|_| "[]".to_string());
    let keywords = serde_json::to_string(&new.keywords).unwrap_or_else(|_| "[]".to_string());

    sqlx::query(
        "update post set title = ?, description = ?, markdown_content = ?, excerpt = ?, \
         author = ?, published_at = ?, updated_at = ?, category = ?, tags = ?, keywords = ?, \
         featured_image = ?, featured = ?, trending = ?, status = ?, seo_title = ?, \
         seo_description = ? where id = ?",
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.markdown_content)
    .bind(&new.excerpt)
    .bind(&new.author)
    .bind(published_at)
    .bind(now)
    .bind(&new.category)
    .bind(&tags)
    .bind(&keywords)
    .bind(&new.featured_image)
    .bind(new.featured)
    .bind(new.trending)
    .bind(new.status.as_str())
    .bind(&new.seo_title)
    .bind(&new.seo_description)
    .bind(id)
    .execute(pool)
    .await?;

    post_by_id(pool, id).await?.ok_or(Error::NotFound)
}

pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("delete from post where id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(Error::NotFound);
    }
    Ok(())
}

pub async fn increment_views(pool: &SqlitePool, slug: &str) -> Result<()> {
    increment_counter(pool, slug, "views").await
}

pub async fn increment_shares(pool: &SqlitePool, slug: &str) -> Result<()> {
    increment_counter(pool, slug, "shares").await
}

pub async fn increment_likes(pool: &SqlitePool, slug: &str) -> Result<()> {
    increment_counter(pool, slug, "likes").await
}

async fn increment_counter(pool: &SqlitePool, slug: &str, column: &'static str) -> Result<()> {
    let sql = format!("update post set {column} = {column} + 1 where slug = ?");
    let result = sqlx::query(&sql).bind(slug).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(Error::NotFound);
    }
    Ok(())
}

/// Record a newsletter subscriber; re-subscribing reactivates.
pub async fn subscribe(pool: &SqlitePool, email: &str, source: &str) -> Result<()> {
    sqlx::query(
        "insert into subscriber (email, subscribed_at, source, is_active) values (?, ?, ?, 1) \
         on conflict (email) do update set is_active = 1",
    )
    .bind(email)
    .bind(OffsetDateTime::now_utc())
    .bind(source)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats> {
    let stats = sqlx::query_as::<_, DashboardStats>(
        "select count(*) as total_posts, \
         coalesce(sum(status = 'published'), 0) as published_posts, \
         coalesce(sum(status = 'draft'), 0) as draft_posts, \
         coalesce(sum(views), 0) as total_views, \
         coalesce(sum(shares), 0) as total_shares, \
         coalesce(sum(likes), 0) as total_likes \
         from post",
    )
    .fetch_one(pool)
    .await?;
    Ok(stats)
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(e) if e.is_unique_violation())
}

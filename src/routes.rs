use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html as HtmlResponse, IntoResponse},
    routing::{get, post},
    Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;
use sqlx::SqlitePool;
use tera::Tera;
use time::OffsetDateTime;
use tower_http::trace::TraceLayer;

use crate::auth::{self, AdminToken};
use crate::compat::ApiJson;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::database as db;
use crate::model::network::{
    DashboardResponse, GenerateRequest, GenerateResponse, LoginForm, LoginResponse,
    NewsletterForm, NewsletterResponse, PostForm, PostListResponse, PostSummary,
};
use crate::model::{Category, CategorySummary, Post};
use crate::{catalog, feed, search, tags, text};

pub const DASHBOARD_POST_LIMIT: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tera: Arc<Tera>,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/blog", get(blog_index))
        .route("/blog/:slug", get(blog_post))
        .route("/category/:slug", get(category_page))
        .route("/search", get(search_page))
        .route("/rss.xml", get(rss_feed))
        .route("/sitemap.xml", get(sitemap_feed))
        .route("/robots.txt", get(robots_txt))
        .route("/api/newsletter", post(newsletter_subscribe))
        .route("/api/posts/:slug/share", post(share_post))
        .route("/api/posts/:slug/like", post(like_post))
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/posts", get(admin_list_posts).post(admin_create_post))
        .route(
            "/api/admin/posts/:id",
            get(admin_get_post).put(admin_update_post).delete(admin_delete_post),
        )
        .route("/api/admin/dashboard", get(admin_dashboard))
        .route("/api/admin/generate", post(admin_generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render(state: &AppState, template: &str, context: &mut tera::Context) -> Result<HtmlResponse<String>> {
    context.insert("site_title", &state.config.site.title);
    context.insert("site_description", &state.config.site.description);
    Ok(HtmlResponse(state.tera.render(template, context)?))
}

async fn published(state: &AppState) -> Result<Vec<Post>> {
    db::all_posts(&state.pool, false).await
}

async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let posts = published(&state).await?;
    let mut context = tera::Context::new();
    context.insert("featured", &catalog::featured_posts(&posts));
    context.insert("trending", &catalog::trending_posts(&posts));
    context.insert("recent", &posts.iter().take(6).collect::<Vec<_>>());
    context.insert("categories", &catalog::categories(&posts));
    render(&state, "index.html", &mut context)
}

async fn blog_index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let posts = published(&state).await?;
    let mut context = tera::Context::new();
    context.insert("posts", &posts);
    context.insert("categories", &catalog::categories(&posts));
    render(&state, "blog.html", &mut context)
}

async fn blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let post = db::post_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or(Error::NotFound)?;
    db::increment_views(&state.pool, &slug).await?;

    let posts = published(&state).await?;
    let related = catalog::related_posts(&posts, &post, catalog::RELATED_LIMIT);

    let mut context = tera::Context::new();
    context.insert("post", &post);
    context.insert("related", &related);
    render(&state, "post.html", &mut context)
}

async fn category_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let category = Category::from_slug(&slug).ok_or(Error::NotFound)?;
    let posts = published(&state).await?;
    let in_category = catalog::posts_by_category(&posts, &slug);
    let summary = CategorySummary {
        slug: category.slug(),
        name: category.name().to_string(),
        description: category.description(),
        post_count: in_category.len(),
    };

    let mut context = tera::Context::new();
    context.insert("category", &summary);
    context.insert("posts", &in_category);
    render(&state, "category.html", &mut context)
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse> {
    let query = params.q.trim().to_string();
    let posts = published(&state).await?;
    let results = if query.chars().count() < search::MIN_QUERY_LEN {
        Vec::new()
    } else {
        search::search_posts(&posts, &query)
    };

    let mut context = tera::Context::new();
    context.insert("query", &query);
    context.insert("results", &results);
    render(&state, "search.html", &mut context)
}

async fn rss_feed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let posts = published(&state).await?;
    let body = feed::rss(&posts, &state.config)?;
    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml")],
        body,
    ))
}

async fn sitemap_feed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let posts = published(&state).await?;
    let body = feed::sitemap(&posts, &state.config)?;
    Ok(([(header::CONTENT_TYPE, "text/xml")], body))
}

async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        feed::robots(&state.config),
    )
}

async fn newsletter_subscribe(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<NewsletterForm>,
) -> Result<impl IntoResponse> {
    if !text::is_valid_email(&form.email) {
        return Err(Error::Validation("valid email is required".to_string()));
    }
    db::subscribe(&state.pool, &form.email, &form.source).await?;
    tracing::info!(email = %form.email, source = %form.source, "newsletter subscription");

    Ok(ApiJson(NewsletterResponse {
        success: true,
        message: "Successfully subscribed to newsletter!",
        email: form.email,
        subscribed_at: OffsetDateTime::now_utc(),
        source: form.source,
    }))
}

async fn share_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    db::increment_shares(&state.pool, &slug).await?;
    Ok(ApiJson(serde_json::json!({"success": true})))
}

async fn like_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    db::increment_likes(&state.pool, &slug).await?;
    Ok(ApiJson(serde_json::json!({"success": true})))
}

async fn admin_login(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<LoginForm>,
) -> Result<impl IntoResponse> {
    if !auth::check_credentials(&state.config.admin, &form.email, &form.password) {
        return Err(Error::Unauthorized);
    }
    let token = auth::issue_token(&state.config.admin)?;
    tracing::info!(email = %form.email, "admin login");
    Ok(ApiJson(LoginResponse {
        message: "Login successful",
        token,
    }))
}

async fn admin_list_posts(
    _token: AdminToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let posts = db::all_posts(&state.pool, true).await?;
    let total = posts.len();
    Ok(ApiJson(PostListResponse {
        posts: posts.into_iter().take(DASHBOARD_POST_LIMIT).collect(),
        total,
    }))
}

async fn admin_create_post(
    _token: AdminToken,
    State(state): State<AppState>,
    ApiJson(form): ApiJson<PostForm>,
) -> Result<impl IntoResponse> {
    form.validate()?;
    let new = form.into_new_post(&state.config.site.author);
    let id = db::insert_post(&state.pool, new).await?;
    tracing::info!(id, "post created");
    Ok((
        StatusCode::CREATED,
        ApiJson(serde_json::json!({"message": "Post created successfully", "id": id})),
    ))
}

async fn admin_get_post(
    _token: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let post = db::post_by_id(&state.pool, id).await?.ok_or(Error::NotFound)?;
    Ok(ApiJson(post))
}

async fn admin_update_post(
    _token: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(form): ApiJson<PostForm>,
) -> Result<impl IntoResponse> {
    form.validate()?;
    let new = form.into_new_post(&state.config.site.author);
    let post = db::update_post(&state.pool, id, new).await?;
    tracing::info!(id, "post updated");
    Ok(ApiJson(
        serde_json::json!({"message": "Post updated successfully", "post": post}),
    ))
}

async fn admin_delete_post(
    _token: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    db::delete_post(&state.pool, id).await?;
    tracing::info!(id, "post deleted");
    Ok(ApiJson(serde_json::json!({"message": "Post deleted successfully"})))
}

async fn admin_dashboard(
    _token: AdminToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let posts = db::all_posts(&state.pool, true).await?;
    let stats = db::dashboard_stats(&state.pool).await?;
    Ok(ApiJson(DashboardResponse {
        posts: posts.iter().take(DASHBOARD_POST_LIMIT).map(PostSummary::from).collect(),
        stats,
    }))
}

async fn admin_generate(
    _token: AdminToken,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<impl IntoResponse> {
    let input = tags::TagInput {
        title: &request.title,
        description: &request.description,
        content: &request.content,
        category: &request.category,
    };
    let mut rng = StdRng::from_entropy();

    Ok(ApiJson(GenerateResponse {
        tags: tags::generate_auto_tags(&input, &mut rng),
        keywords: tags::generate_seo_keywords(&input, &mut rng),
        suggested_tags: tags::suggested_tags(&request.category),
        suggested_keywords: tags::suggested_seo_keywords(&request.category),
    }))
}

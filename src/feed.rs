//! RSS, sitemap and robots.txt generation for crawlers and readers.

use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::OffsetDateTime;
use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::model::{Category, Post};

/// Feed length cap, newest first.
pub const RSS_ITEM_LIMIT: usize = 20;

fn base_url(proto_host: &Url) -> String {
    proto_host.as_str().trim_end_matches('/').to_string()
}

/// RSS 2.0 channel for the latest published posts. Free-text fields go
/// through CDATA, the way aggregators expect them.
pub fn rss(posts: &[Post], config: &Config) -> Result<String> {
    let base = base_url(&config.net.proto_host);
    let site = &config.site;
    let now = OffsetDateTime::now_utc().format(&Rfc2822)?;

    let mut items = String::new();
    for post in posts.iter().take(RSS_ITEM_LIMIT) {
        let published = post.published_at.unwrap_or(post.created_at).format(&Rfc2822)?;
        items.push_str("    <item>\n");
        items.push_str(&format!("      <title><![CDATA[{}]]></title>\n", post.title));
        items.push_str(&format!(
            "      <description><![CDATA[{}]]></description>\n",
            post.excerpt
        ));
        items.push_str(&format!("      <link>{}/blog/{}</link>\n", base, post.slug));
        items.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}/blog/{}</guid>\n",
            base, post.slug
        ));
        items.push_str(&format!("      <pubDate>{}</pubDate>\n", published));
        items.push_str(&format!(
            "      <author>{} ({})</author>\n",
            site.editor_email, post.author
        ));
        items.push_str(&format!(
            "      <category><![CDATA[{}]]></category>\n",
            post.category
        ));
        for tag in &post.tags {
            items.push_str(&format!("      <category><![CDATA[{}]]></category>\n", tag));
        }
        if let Some(image) = &post.featured_image {
            items.push_str(&format!(
                "      <enclosure url=\"{}\" type=\"image/jpeg\"/>\n",
                image
            ));
        }
        items.push_str("    </item>\n");
    }

    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n\
         \x20 <channel>\n\
         \x20   <title>{title}</title>\n\
         \x20   <description>{description}</description>\n\
         \x20   <link>{base}</link>\n\
         \x20   <atom:link href=\"{base}/rss.xml\" rel=\"self\" type=\"application/rss+xml\"/>\n\
         \x20   <language>en-us</language>\n\
         \x20   <lastBuildDate>{now}</lastBuildDate>\n\
         \x20   <managingEditor>{editor} ({author})</managingEditor>\n\
         {items}\
         \x20 </channel>\n\
         </rss>\n",
        title = site.title,
        description = site.description,
        base = base,
        now = now,
        editor = site.editor_email,
        author = site.author,
        items = items,
    ))
}

/// Sitemap covering the home page, the blog index, category pages and every
/// published post, with the crawl-priority ladder the pages always used.
pub fn sitemap(posts: &[Post], config: &Config) -> Result<String> {
    let base = base_url(&config.net.proto_host);
    let now = OffsetDateTime::now_utc().format(&Rfc3339)?;

    let mut urls = String::new();
    let mut push_url = |loc: &str, lastmod: &str, changefreq: &str, priority: &str| {
        urls.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            loc, lastmod, changefreq, priority
        ));
    };

    push_url(&base, &now, "daily", "1.0");
    push_url(&format!("{}/blog", base), &now, "daily", "0.9");
    for category in Category::all() {
        push_url(
            &format!("{}/category/{}", base, category.slug()),
            &now,
            "weekly",
            "0.8",
        );
    }
    for post in posts {
        let lastmod = post
            .updated_at
            .or(post.published_at)
            .unwrap_or(post.created_at)
            .format(&Rfc3339)?;
        push_url(
            &format!("{}/blog/{}", base, post.slug),
            &lastmod,
            "monthly",
            "0.7",
        );
    }

    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {}\
         </urlset>\n",
        urls
    ))
}

pub fn robots(config: &Config) -> String {
    let base = base_url(&config.net.proto_host);
    format!(
        "User-agent: *\n\
         Allow: /\n\
         \n\
         Sitemap: {base}/sitemap.xml\n\
         \n\
         Crawl-delay: 1\n\
         \n\
         Disallow: /admin/\n\
         Disallow: /api/\n\
         \n\
         Allow: /sitemap.xml\n\
         Allow: /rss.xml\n\
         Allow: /robots.txt\n",
        base = base
    )
}

//! Server-rendered pages
//!
//! Every handler re-scans the posts directory and rebuilds the index before
//! rendering. That is the intended tradeoff at personal-blog volume: no
//! cache, no invalidation, edits on disk show up on the next refresh.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::services::ServeDir;

use crate::content::ContentError;
use crate::index::PostIndex;
use crate::templates::{CategoryView, PostView, SiteView, TemplateRenderer, YearView};
use crate::Site;

/// Shared server state
struct AppState {
    site: Site,
    renderer: TemplateRenderer,
}

impl AppState {
    /// Rebuild the index from disk for the current request
    fn fresh_index(&self) -> Result<PostIndex, ContentError> {
        self.site.load_index()
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteView::from_config(&self.site.config));
        context
    }

    fn page(&self, template: &str, context: &Context) -> Response {
        match self.renderer.render(template, context) {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!("template render failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "render error").into_response()
            }
        }
    }

    fn not_found_page(&self) -> Response {
        let context = self.base_context();
        match self.renderer.render("not_found.html", &context) {
            Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "not found").into_response(),
        }
    }

    /// A missing posts root aborts the whole listing; nothing partial.
    fn listing_error(&self, e: ContentError) -> Response {
        tracing::error!("failed to build index: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "failed to load posts").into_response()
    }
}

/// Start the blog server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        site: site.clone(),
        renderer: TemplateRenderer::new()?,
    });

    let mut app = Router::new()
        .route("/", get(home))
        .route("/posts", get(archive))
        .route("/posts/:category/:slug", get(post_detail))
        .route("/categories", get(categories_index))
        .route("/categories/:slug", get(category_detail))
        .fallback(fallback);

    if site.assets_dir.is_dir() {
        app = app.nest_service("/static", ServeDir::new(&site.assets_dir));
    }

    let app = app.with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Serving at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct HomeQuery {
    category: Option<String>,
}

/// `/` - all posts, with an optional `?category=` filter
async fn home(State(state): State<Arc<AppState>>, Query(query): Query<HomeQuery>) -> Response {
    let index = match state.fresh_index() {
        Ok(index) => index,
        Err(e) => return state.listing_error(e),
    };

    let config = &state.site.config;
    let categories: Vec<CategoryView> = index
        .categories(config)
        .iter()
        .map(CategoryView::from_category)
        .collect();

    let (posts, active): (Vec<PostView>, Option<String>) = match query.category.as_deref() {
        Some(category) if !category.is_empty() => (
            index
                .by_category(category)
                .into_iter()
                .map(|p| PostView::from_post(p, config))
                .collect(),
            Some(active_category_key(category)),
        ),
        _ => (
            index
                .posts()
                .iter()
                .map(|p| PostView::from_post(p, config))
                .collect(),
            None,
        ),
    };

    let mut context = state.base_context();
    context.insert("categories", &categories);
    context.insert("posts", &posts);
    context.insert("active_category", &active);
    state.page("index.html", &context)
}

/// `/posts` - full listing grouped by year
async fn archive(State(state): State<Arc<AppState>>) -> Response {
    let index = match state.fresh_index() {
        Ok(index) => index,
        Err(e) => return state.listing_error(e),
    };

    let config = &state.site.config;
    let years: Vec<YearView> = index
        .by_year()
        .into_iter()
        .map(|(year, posts)| YearView {
            year,
            posts: posts
                .into_iter()
                .map(|p| PostView::from_post(p, config))
                .collect(),
        })
        .collect();

    let mut context = state.base_context();
    context.insert("years", &years);
    state.page("archive.html", &context)
}

/// `/posts/:category/:slug` - post detail
async fn post_detail(
    State(state): State<Arc<AppState>>,
    Path((category, slug)): Path<(String, String)>,
) -> Response {
    let index = match state.fresh_index() {
        Ok(index) => index,
        Err(e) => return state.listing_error(e),
    };

    let Some(post) = index.get(&category, &slug) else {
        return state.not_found_page();
    };

    let config = &state.site.config;
    let categories: Vec<CategoryView> = index
        .categories(config)
        .iter()
        .map(CategoryView::from_category)
        .collect();

    let mut context = state.base_context();
    context.insert("categories", &categories);
    context.insert("post", &PostView::from_post(post, config));
    state.page("post.html", &context)
}

/// `/categories` - category browsing with counts
async fn categories_index(State(state): State<Arc<AppState>>) -> Response {
    let index = match state.fresh_index() {
        Ok(index) => index,
        Err(e) => return state.listing_error(e),
    };

    let categories: Vec<CategoryView> = index
        .categories(&state.site.config)
        .iter()
        .map(CategoryView::from_category)
        .collect();

    let mut context = state.base_context();
    context.insert("categories", &categories);
    state.page("categories.html", &context)
}

/// `/categories/:slug` - one category's posts
async fn category_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let index = match state.fresh_index() {
        Ok(index) => index,
        Err(e) => return state.listing_error(e),
    };

    let config = &state.site.config;
    let Some(category) = index
        .categories(config)
        .into_iter()
        .find(|c| c.slug == slug.to_lowercase())
    else {
        return state.not_found_page();
    };

    let posts: Vec<PostView> = index
        .by_category(&category.slug)
        .into_iter()
        .map(|p| PostView::from_post(p, config))
        .collect();

    let mut context = state.base_context();
    context.insert("category", &CategoryView::from_category(&category));
    context.insert("posts", &posts);
    state.page("category.html", &context)
}

/// Any unmatched route renders the not-found page
async fn fallback(State(state): State<Arc<AppState>>) -> Response {
    state.not_found_page()
}

/// Normalize a query value to the key the filter-bar badges compare against.
///
/// Badges carry `Category::slug`, so the active marker has to go through the
/// same slugification or a multi-word category never highlights.
fn active_category_key(category: &str) -> String {
    slug::slugify(category)
}

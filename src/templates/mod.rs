//! Built-in templates using the Tera template engine
//!
//! Templates and the default logo are embedded in the binary. Post text comes
//! from the content API, so Tera's HTML autoescaping stays on.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{public_cursor, PostDetail, PostSummary};
use crate::views::{DetailView, ListingView};

/// Default logo served at `/images/logo.svg`
pub const LOGO_SVG: &str = include_str!("assets/logo.svg");

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("not_found.html", include_str!("blog/not_found.html")),
            ("error.html", include_str!("blog/error.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("blog/partials/header.html"),
            ),
            (
                "partials/post_cards.html",
                include_str!("blog/partials/post_cards.html"),
            ),
        ])?;

        Ok(Self {
            tera,
            site: SiteData::from(config),
        })
    }

    /// Listing page with the "load more" control while a cursor remains.
    /// The control talks to the server's `/more` route.
    pub fn render_index(&self, listing: &ListingView) -> Result<String> {
        let next_page = listing.next_page().map(|url| public_cursor(url).to_string());
        self.render_listing(listing, next_page)
    }

    /// Listing page for a static build: no server answers `/more` there,
    /// so the "load more" control is left out.
    pub fn render_static_index(&self, listing: &ListingView) -> Result<String> {
        self.render_listing(listing, None)
    }

    fn render_listing(&self, listing: &ListingView, next_page: Option<String>) -> Result<String> {
        let mut context = self.base_context();
        context.insert("posts", listing.posts());
        context.insert("next_page", &next_page);
        context.insert("merge_strategy", &listing.merge_strategy());
        self.render("index.html", &context)
    }

    /// Cards appended by a "load more" request
    pub fn render_cards(&self, posts: &[PostSummary]) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", posts);
        self.render("partials/post_cards.html", &context)
    }

    /// Post page; the time chip is blank until the view is mounted
    pub fn render_post(&self, view: &DetailView) -> Result<String> {
        let mut context = self.base_context();
        let post: &PostDetail = view.post();
        context.insert("post", post);
        context.insert("time_since", view.time_since());
        self.render("post.html", &context)
    }

    pub fn render_not_found(&self, slug: &str) -> Result<String> {
        let mut context = self.base_context();
        context.insert("slug", slug);
        self.render("not_found.html", &context)
    }

    pub fn render_error(&self, retry: &str) -> Result<String> {
        let mut context = self.base_context();
        context.insert("retry", retry);
        self.render("error.html", &context)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert(
            "generator",
            &format!("prismic-blog {}", env!("CARGO_PKG_VERSION")),
        );
        context
    }

    fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Site-wide values available to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub logo: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            language: config.language.clone(),
            logo: config.logo.clone(),
        }
    }
}

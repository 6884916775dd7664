// crates/serve/src/service.rs

//! The cached public API: one method per content type.
//!
//! Locale is always an explicit argument. Any detection from a request
//! happens at the edge before these are called.

use std::sync::Arc;
use std::time::Duration;

use domain::view::{
    blog::{BlogPostDetail, BlogPostListItem},
    contact::ContactSection,
    faq::FaqSection,
    footer::FooterData,
    home::HomePage,
    portfolio::{PortfolioSection, Project, ProjectDetail},
    process::{HomepageProcess, ProcessPage},
    services::ServicesSection,
    site::SiteSettings,
    trusted::TrustedBySection,
};
use domain::{Locale, LocalizedResolver};

use crate::cache::{key, Cache};
use crate::content::{
    blog, contact, faq, footer, portfolio, process, services, site, trusted, Deps,
};
use crate::source::{ContentSource, ImageUrlBuilder};
use crate::Result;

/// Cache type names. One name per view-model shape.
pub mod kind {
    pub const SERVICES: &str = "services";
    pub const PORTFOLIO: &str = "portfolio";
    pub const PROJECT: &str = "project";
    pub const PROJECTS_LIST: &str = "projects-list";
    pub const HOMEPAGE_PROCESS: &str = "homepage-process";
    pub const PROCESS_PAGE: &str = "process-page";
    pub const FAQ: &str = "faq";
    pub const CONTACT: &str = "contact";
    pub const FOOTER: &str = "footer";
    pub const SITE_SETTINGS: &str = "site-settings";
    pub const TRUSTED_BY: &str = "trusted-by";
    pub const BLOG_COUNT: &str = "blog-count";
    pub const BLOG_POSTS: &str = "blog-posts";
    pub const BLOG_POST: &str = "blog-post";
}

pub struct ContentService {
    source: Arc<dyn ContentSource>,
    images: Arc<dyn ImageUrlBuilder>,
    resolver: LocalizedResolver,
    cache: Cache,
}

impl ContentService {
    pub fn new(
        source: Arc<dyn ContentSource>,
        images: Arc<dyn ImageUrlBuilder>,
        revalidate: Duration,
    ) -> Self {
        Self {
            source,
            images,
            resolver: LocalizedResolver::default(),
            cache: Cache::new(revalidate),
        }
    }

    pub fn with_resolver(mut self, resolver: LocalizedResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    fn deps(&self) -> Deps<'_> {
        Deps::new(self.source.as_ref(), self.images.as_ref()).with_resolver(self.resolver)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Home page sections
    // ─────────────────────────────────────────────────────────────────────

    pub async fn services(&self, locale: Locale) -> Result<Option<ServicesSection>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::SERVICES, Some(locale), &[]), || {
                services::fetch(&deps, locale)
            })
            .await
    }

    pub async fn portfolio(&self, locale: Locale) -> Result<Option<PortfolioSection>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::PORTFOLIO, Some(locale), &[]), || {
                portfolio::fetch_section(&deps, locale)
            })
            .await
    }

    pub async fn homepage_process(&self, locale: Locale) -> Result<Option<HomepageProcess>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::HOMEPAGE_PROCESS, Some(locale), &[]), || {
                process::fetch_homepage(&deps, locale)
            })
            .await
    }

    pub async fn trusted_by(&self, locale: Locale) -> Result<Option<TrustedBySection>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::TRUSTED_BY, Some(locale), &[]), || {
                trusted::fetch(&deps, locale)
            })
            .await
    }

    pub async fn faq(&self, locale: Locale) -> Result<Option<FaqSection>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::FAQ, Some(locale), &[]), || faq::fetch(&deps, locale))
            .await
    }

    pub async fn contact(&self, locale: Locale) -> Result<Option<ContactSection>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::CONTACT, Some(locale), &[]), || {
                contact::fetch(&deps, locale)
            })
            .await
    }

    /// All home-page sections, fetched concurrently. The first failure
    /// fails the whole bundle.
    #[tracing::instrument(skip_all, fields(locale = %locale))]
    pub async fn home(&self, locale: Locale) -> Result<HomePage> {
        let (services, portfolio, process, trusted_by, faq, contact) = futures::try_join!(
            self.services(locale),
            self.portfolio(locale),
            self.homepage_process(locale),
            self.trusted_by(locale),
            self.faq(locale),
            self.contact(locale),
        )?;

        Ok(HomePage {
            services,
            portfolio,
            process,
            trusted_by,
            faq,
            contact,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pages and site chrome
    // ─────────────────────────────────────────────────────────────────────

    pub async fn process_page(&self, locale: Locale) -> Result<Option<ProcessPage>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::PROCESS_PAGE, Some(locale), &[]), || {
                process::fetch_page(&deps, locale)
            })
            .await
    }

    pub async fn footer(&self, locale: Locale) -> Result<Option<FooterData>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::FOOTER, Some(locale), &[]), || {
                footer::fetch(&deps, locale)
            })
            .await
    }

    pub async fn site_settings(&self, locale: Locale) -> Result<Option<SiteSettings>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::SITE_SETTINGS, Some(locale), &[]), || {
                site::fetch(&deps, locale)
            })
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Projects
    // ─────────────────────────────────────────────────────────────────────

    pub async fn project(&self, slug: &str, locale: Locale) -> Result<Option<ProjectDetail>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::PROJECT, Some(locale), &[slug]), || {
                portfolio::fetch_detail(&deps, slug, locale)
            })
            .await
    }

    pub async fn projects(&self, locale: Locale) -> Result<Vec<Project>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::PROJECTS_LIST, Some(locale), &[]), || {
                portfolio::fetch_all(&deps, locale)
            })
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Blog
    // ─────────────────────────────────────────────────────────────────────

    pub async fn blog_count(&self) -> Result<u64> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::BLOG_COUNT, None, &[]), || blog::fetch_count(&deps))
            .await
    }

    pub async fn blog_posts(&self, locale: Locale) -> Result<Vec<BlogPostListItem>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::BLOG_POSTS, Some(locale), &[]), || {
                blog::fetch_list(&deps, locale)
            })
            .await
    }

    pub async fn blog_post(&self, slug: &str, locale: Locale) -> Result<Option<BlogPostDetail>> {
        let deps = self.deps();
        self.cache
            .cached(key(kind::BLOG_POST, Some(locale), &[slug]), || {
                blog::fetch_detail(&deps, slug, locale)
            })
            .await
    }
}

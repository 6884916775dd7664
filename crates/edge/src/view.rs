// crates/edge/src/view.rs

//! One name per view model, shared by the CLI and the HTTP surface.

use clap::ValueEnum;
use domain::Locale;
use serde::Serialize;
use serde_json::Value as Json;
use serve::service::ContentService;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Kind {
    Home,
    Services,
    Portfolio,
    Project,
    Projects,
    HomepageProcess,
    ProcessPage,
    Faq,
    Contact,
    Footer,
    SiteSettings,
    TrustedBy,
    BlogPosts,
    BlogPost,
}

impl Kind {
    /// Path segment / CLI value.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Home => "home",
            Kind::Services => "services",
            Kind::Portfolio => "portfolio",
            Kind::Project => "project",
            Kind::Projects => "projects",
            Kind::HomepageProcess => "homepage-process",
            Kind::ProcessPage => "process-page",
            Kind::Faq => "faq",
            Kind::Contact => "contact",
            Kind::Footer => "footer",
            Kind::SiteSettings => "site-settings",
            Kind::TrustedBy => "trusted-by",
            Kind::BlogPosts => "blog-posts",
            Kind::BlogPost => "blog-post",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        Kind::from_str(s, false).map_err(|_| Error::UnknownKind(s.to_owned()))
    }

    pub fn takes_slug(self) -> bool {
        matches!(self, Kind::Project | Kind::BlogPost)
    }
}

/// Resolve one view model. `Ok(None)` means there is nothing to show.
pub async fn resolve(
    service: &ContentService,
    kind: Kind,
    locale: Locale,
    slug: Option<&str>,
) -> Result<Option<Json>, Error> {
    let slug = match (kind.takes_slug(), slug) {
        (true, None) => return Err(Error::SlugRequired(kind.name())),
        (false, Some(_)) => return Err(Error::UnexpectedSlug(kind.name())),
        (_, slug) => slug.unwrap_or_default(),
    };

    match kind {
        Kind::Home => some(service.home(locale).await?),
        Kind::Services => opt(service.services(locale).await?),
        Kind::Portfolio => opt(service.portfolio(locale).await?),
        Kind::Project => opt(service.project(slug, locale).await?),
        Kind::Projects => some(service.projects(locale).await?),
        Kind::HomepageProcess => opt(service.homepage_process(locale).await?),
        Kind::ProcessPage => opt(service.process_page(locale).await?),
        Kind::Faq => opt(service.faq(locale).await?),
        Kind::Contact => opt(service.contact(locale).await?),
        Kind::Footer => opt(service.footer(locale).await?),
        Kind::SiteSettings => opt(service.site_settings(locale).await?),
        Kind::TrustedBy => opt(service.trusted_by(locale).await?),
        Kind::BlogPosts => some(service.blog_posts(locale).await?),
        Kind::BlogPost => opt(service.blog_post(slug, locale).await?),
    }
}

fn some<T: Serialize>(value: T) -> Result<Option<Json>, Error> {
    Ok(Some(serde_json::to_value(value)?))
}

fn opt<T: Serialize>(value: Option<T>) -> Result<Option<Json>, Error> {
    value.map(serde_json::to_value).transpose().map_err(Error::from)
}

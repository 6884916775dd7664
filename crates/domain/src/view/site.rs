// crates/domain/src/view/site.rs

use super::SeoData;
use serde::{Deserialize, Serialize};

/// Site-wide settings and per-page SEO overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_page_seo: Option<SeoData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq_page_seo: Option<SeoData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_page_seo: Option<SeoData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_list_page_seo: Option<SeoData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realizacje_list_page_seo: Option<SeoData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_page_seo: Option<SeoData>,
}

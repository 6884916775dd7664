// crates/domain/src/view/mod.rs

//! Render-ready view models.
//!
//! Every bilingual field is collapsed to the requested locale, every image is
//! a final URL. Optional values are left out of the serialized form rather
//! than written as `null`.

pub mod blog;
pub mod contact;
pub mod faq;
pub mod footer;
pub mod home;
pub mod portfolio;
pub mod process;
pub mod services;
pub mod site;
pub mod trusted;

use serde::{Deserialize, Serialize};

/// A resolved image slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub url: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_border: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

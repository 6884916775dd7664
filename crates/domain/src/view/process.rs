// crates/domain/src/view/process.rs

use super::ImageView;
use serde::{Deserialize, Serialize};

/// One step group of the home-page process timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessGroup {
    /// Position within the timeline.
    pub id: usize,
    pub title: String,
    pub short_title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageProcess {
    pub heading: String,
    pub subtitle: String,
    #[serde(default)]
    pub groups: Vec<ProcessGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSection {
    pub id: usize,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub color: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCta {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPage {
    pub heading: String,
    pub intro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<ImageView>,
    #[serde(default)]
    pub sections: Vec<ProcessSection>,
    pub cta: ProcessCta,
}

// crates/domain/src/view/blog.rs

use super::ImageView;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostListItem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<ImageView>,
    /// ISO timestamp, `""` for posts visible since creation.
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPostDetail {
    #[serde(flatten)]
    pub post: BlogPostListItem,
    #[serde(default)]
    pub sections: Vec<BlogSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum BlogSection {
    #[serde(rename = "paragraphSection")]
    Paragraph {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Json>,
    },
    #[serde(rename = "headingSection")]
    Heading {
        level: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    #[serde(rename = "imageSection")]
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<ImageView>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    #[serde(rename = "quoteSection")]
    Quote {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quote: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },
    #[serde(rename = "listSection")]
    List {
        #[serde(default)]
        items: Vec<Json>,
    },
    #[serde(rename = "calloutSection")]
    Callout {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        variant: String,
    },
    #[serde(other)]
    Unknown,
}

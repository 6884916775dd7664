// crates/domain/src/view/footer.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterContactItem {
    /// Icon name: `Mail`, `Phone` or `MapPin`.
    pub icon: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterSocialItem {
    pub icon: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterData {
    pub description: String,
    #[serde(default)]
    pub contact_items: Vec<FooterContactItem>,
    #[serde(default)]
    pub social_links: Vec<FooterSocialItem>,
}

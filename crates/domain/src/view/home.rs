// crates/domain/src/view/home.rs

use super::{
    contact::ContactSection, faq::FaqSection, portfolio::PortfolioSection,
    process::HomepageProcess, services::ServicesSection, trusted::TrustedBySection,
};
use serde::{Deserialize, Serialize};

/// Everything the home page renders, fetched in one go. A missing section is
/// `None` and the page falls back to its built-in copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub services: Option<ServicesSection>,
    pub portfolio: Option<PortfolioSection>,
    pub process: Option<HomepageProcess>,
    pub trusted_by: Option<TrustedBySection>,
    pub faq: Option<FaqSection>,
    pub contact: Option<ContactSection>,
}

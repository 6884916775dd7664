// crates/domain/src/image.rs

use serde::{Deserialize, Serialize};

/// How the image service fits the source into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Clip,
    Crop,
    Fill,
    FillMax,
    Max,
    Scale,
    Min,
}

impl Fit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Fit::Clip => "clip",
            Fit::Crop => "crop",
            Fit::Fill => "fill",
            Fit::FillMax => "fillmax",
            Fit::Max => "max",
            Fit::Scale => "scale",
            Fit::Min => "min",
        }
    }
}

/// Transform parameters for one image slot in a view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: Option<Fit>,
    /// Ignore crop/hotspot stored on the descriptor.
    pub ignore_params: bool,
}

impl ImageTransform {
    pub const fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            height: None,
            fit: None,
            ignore_params: false,
        }
    }

    pub const fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            fit: None,
            ignore_params: false,
        }
    }

    pub const fn fit(mut self, fit: Fit) -> Self {
        self.fit = Some(fit);
        self
    }

    pub const fn ignore_params(mut self) -> Self {
        self.ignore_params = true;
        self
    }
}

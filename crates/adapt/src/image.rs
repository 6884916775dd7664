// crates/adapt/src/image.rs

//! Asset URLs on the image CDN.
//!
//! An image reference encodes the asset id, the source dimensions and the
//! file extension: `image-<id>-<W>x<H>-<ext>`. The URL is
//! `{host}/images/{project}/{dataset}/<id>-<W>x<H>.<ext>` followed by the
//! transform parameters in a fixed order (`rect`, `w`, `h`, `fit`), so the
//! same descriptor and transform always produce the same string.

use domain::image::ImageTransform;
use domain::setting::{ContentSettings, ImageSettings};
use serde_json::Value as Json;

use serve::source::ImageUrlBuilder;
use serve::{Error as ServeError, Result};

#[derive(Debug, Clone)]
pub struct CdnImageBuilder {
    base: String,
}

impl CdnImageBuilder {
    pub fn new(content: &ContentSettings, images: &ImageSettings) -> Self {
        Self {
            base: format!(
                "{}/images/{}/{}",
                images.host.trim_end_matches('/'),
                content.project_id,
                content.dataset
            ),
        }
    }
}

impl ImageUrlBuilder for CdnImageBuilder {
    fn build(&self, image: &Json, transform: &ImageTransform) -> Result<String> {
        let reference = asset_ref(image)
            .ok_or_else(|| ServeError::MalformedImage(image.to_string()))?;
        let asset = parse_ref(reference)
            .ok_or_else(|| ServeError::MalformedImage(reference.to_owned()))?;

        let mut params: Vec<String> = Vec::new();
        if !transform.ignore_params {
            if let Some(rect) = crop_rect(image, asset.width, asset.height) {
                params.push(format!("rect={rect}"));
            }
        }
        if let Some(w) = transform.width {
            params.push(format!("w={w}"));
        }
        if let Some(h) = transform.height {
            params.push(format!("h={h}"));
        }
        if let Some(fit) = transform.fit {
            params.push(format!("fit={}", fit.as_str()));
        }

        let mut url = format!(
            "{}/{}-{}x{}.{}",
            self.base, asset.id, asset.width, asset.height, asset.ext
        );
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        Ok(url)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Descriptor parsing
// ─────────────────────────────────────────────────────────────────────────────

struct Asset<'a> {
    id: &'a str,
    width: u32,
    height: u32,
    ext: &'a str,
}

/// `"image-..."`, `{ asset: { _ref } }`, `{ asset: { _id } }` or a bare
/// reference object `{ _ref }`.
fn asset_ref(image: &Json) -> Option<&str> {
    match image {
        Json::String(s) => Some(s),
        Json::Object(map) => match map.get("asset") {
            Some(asset) => asset
                .get("_ref")
                .or_else(|| asset.get("_id"))
                .and_then(Json::as_str),
            None => map.get("_ref").and_then(Json::as_str),
        },
        _ => None,
    }
}

fn parse_ref(reference: &str) -> Option<Asset<'_>> {
    let rest = reference.strip_prefix("image-")?;
    let mut parts = rest.rsplitn(3, '-');
    let ext = parts.next()?;
    let dims = parts.next()?;
    let id = parts.next()?;

    let (w, h) = dims.split_once('x')?;
    let width = w.parse().ok()?;
    let height = h.parse().ok()?;

    if id.is_empty() || ext.is_empty() || width == 0 || height == 0 {
        return None;
    }
    Some(Asset {
        id,
        width,
        height,
        ext,
    })
}

/// `left,top,width,height` in source pixels, when the descriptor carries a
/// non-zero crop.
fn crop_rect(image: &Json, width: u32, height: u32) -> Option<String> {
    let crop = image.get("crop")?;
    let side = |name: &str| crop.get(name).and_then(Json::as_f64).unwrap_or(0.0);
    let (top, bottom, left, right) = (side("top"), side("bottom"), side("left"), side("right"));
    if top == 0.0 && bottom == 0.0 && left == 0.0 && right == 0.0 {
        return None;
    }

    let (w, h) = (f64::from(width), f64::from(height));
    let x = (left * w).round();
    let y = (top * h).round();
    let cw = (w - right * w - left * w).round();
    let ch = (h - bottom * h - top * h).round();
    Some(format!("{x},{y},{cw},{ch}"))
}

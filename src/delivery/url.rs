//! Delivery URL rewriting.
//!
//! A recognized media CDN accepts transformation directives as a path segment
//! placed directly after its `/upload/` marker:
//!
//! ```text
//! https://res.cloudinary.com/demo/upload/sample.jpg
//! https://res.cloudinary.com/demo/upload/w_400,q_auto,f_webp/sample.jpg
//! ```
//!
//! Rewriting never fails. A source that is empty, hosted elsewhere, or missing
//! the marker comes back untouched (or as `None` for srcsets): a broken image
//! is preferable to a failed render.

use super::params::{ImageFormat, TransformOptions};
use serde_json::Value;
use std::borrow::Cow;

/// Host marker of the default CDN.
pub const CLOUDINARY_HOST: &str = "res.cloudinary.com";
/// Path marker after which directives are inserted.
pub const UPLOAD_SEGMENT: &str = "/upload/";

/// Where a CDN expects its directive segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnConvention {
    /// Substring identifying the CDN host.
    pub host_marker: String,
    /// Segment after which the directives go. Must start and end with `/`.
    pub upload_segment: String,
}

impl Default for CdnConvention {
    fn default() -> Self {
        Self {
            host_marker: CLOUDINARY_HOST.to_string(),
            upload_segment: UPLOAD_SEGMENT.to_string(),
        }
    }
}

impl CdnConvention {
    /// Whether `src` is something this CDN can transform.
    pub fn recognizes(&self, src: &str) -> bool {
        !src.is_empty() && src.contains(&self.host_marker)
    }

    fn rewrite<'a>(&self, src: &'a str, options: &TransformOptions) -> Cow<'a, str> {
        if !self.recognizes(src) {
            tracing::debug!(src, "unrecognized image host, passing through");
            return Cow::Borrowed(src);
        }
        if self.upload_segment.is_empty() {
            tracing::debug!(src, "empty upload segment, passing through");
            return Cow::Borrowed(src);
        }
        let Some(pos) = src.find(&self.upload_segment) else {
            tracing::debug!(src, "no upload segment, passing through");
            return Cow::Borrowed(src);
        };
        let split = pos + self.upload_segment.len();
        let directive = options.directive();
        let mut out = String::with_capacity(src.len() + directive.len() + 1);
        out.push_str(&src[..split]);
        out.push_str(&directive);
        out.push('/');
        out.push_str(&src[split..]);
        Cow::Owned(out)
    }
}

/// URL builder bound to a CDN convention and a set of default options.
///
/// The free functions [`build_url`] and [`build_srcset`] use
/// `UrlBuilder::default()`; construct one from config to target another host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlBuilder {
    pub convention: CdnConvention,
    pub defaults: TransformOptions,
}

impl UrlBuilder {
    pub fn new(convention: CdnConvention, defaults: TransformOptions) -> Self {
        Self {
            convention,
            defaults,
        }
    }

    /// Rewrite `src` with the builder's default options.
    pub fn url<'a>(&self, src: &'a str) -> Cow<'a, str> {
        self.convention.rewrite(src, &self.defaults)
    }

    /// Rewrite `src` with explicit options.
    pub fn url_with<'a>(&self, src: &'a str, options: &TransformOptions) -> Cow<'a, str> {
        self.convention.rewrite(src, options)
    }

    /// Density descriptor: webp at `1x`, jpg at `2x`, both at `width`.
    ///
    /// The jpg candidate is a fallback encoding at the same pixel width, not a
    /// larger rendition. Quality always follows the builder defaults.
    pub fn srcset(&self, src: &str, width: u32) -> Option<String> {
        self.srcset_candidates(src, width)
            .map(|(webp, jpg)| format!("{webp} 1x, {jpg} 2x"))
    }

    /// The `(1x, 2x)` candidate URLs behind [`srcset`](Self::srcset).
    pub fn srcset_candidates(&self, src: &str, width: u32) -> Option<(String, String)> {
        if !self.convention.recognizes(src) {
            return None;
        }
        let base = TransformOptions {
            width,
            quality: self.defaults.quality.clone(),
            format: ImageFormat::Webp,
        };
        let webp = self.convention.rewrite(src, &base).into_owned();
        let jpg = self
            .convention
            .rewrite(src, &base.with_format(ImageFormat::Jpg))
            .into_owned();
        Some((webp, jpg))
    }
}

/// Rewrite a Cloudinary URL, or return it unchanged.
pub fn build_url<'a>(src: &'a str, options: &TransformOptions) -> Cow<'a, str> {
    CdnConvention::default().rewrite(src, options)
}

/// Build the `1x`/`2x` descriptor for a Cloudinary URL.
///
/// Returns `None` when no responsive set is available for `src`.
pub fn build_srcset(src: &str, width: u32) -> Option<String> {
    UrlBuilder::default().srcset(src, width)
}

/// [`build_url`] for loosely typed references (e.g. a JSON product record).
///
/// Anything other than a recognized string is returned as-is.
pub fn build_url_value(src: &Value, options: &TransformOptions) -> Value {
    match src {
        Value::String(s) => Value::String(build_url(s, options).into_owned()),
        other => other.clone(),
    }
}

/// [`build_srcset`] for loosely typed references.
pub fn build_srcset_value(src: &Value, width: u32) -> Option<String> {
    src.as_str().and_then(|s| build_srcset(s, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::params::{DEFAULT_WIDTH, Quality};
    use serde_json::json;

    const SAMPLE: &str = "https://res.cloudinary.com/demo/upload/sample.jpg";

    #[test]
    fn inserts_default_directives_after_upload() {
        let url = build_url(SAMPLE, &TransformOptions::default());
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/upload/w_400,q_auto,f_webp/sample.jpg"
        );
    }

    #[test]
    fn foreign_host_passes_through_borrowed() {
        let src = "https://example.com/img.jpg";
        let url = build_url(src, &TransformOptions::default());
        assert!(matches!(url, Cow::Borrowed(s) if s == src));
    }

    #[test]
    fn empty_source_passes_through() {
        assert_eq!(build_url("", &TransformOptions::default()), "");
    }

    #[test]
    fn recognized_host_without_upload_segment_passes_through() {
        let src = "https://res.cloudinary.com/demo/fetch/sample.jpg";
        assert_eq!(build_url(src, &TransformOptions::default()), src);
    }

    #[test]
    fn only_first_upload_segment_is_rewritten() {
        let src = "https://res.cloudinary.com/demo/upload/folder/upload/a.jpg";
        assert_eq!(
            build_url(src, &TransformOptions::default()),
            "https://res.cloudinary.com/demo/upload/w_400,q_auto,f_webp/folder/upload/a.jpg"
        );
    }

    #[test]
    fn explicit_options_are_rendered() {
        let opts = TransformOptions::default()
            .with_width(1200)
            .with_quality(Quality::level(80))
            .with_format(ImageFormat::Avif);
        assert_eq!(
            build_url(SAMPLE, &opts),
            "https://res.cloudinary.com/demo/upload/w_1200,q_80,f_avif/sample.jpg"
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let opts = TransformOptions::default().with_width(320);
        let first = build_url(SAMPLE, &opts).into_owned();
        for _ in 0..5 {
            assert_eq!(build_url(SAMPLE, &opts), first);
        }
    }

    #[test]
    fn srcset_pairs_webp_1x_with_jpg_2x() {
        let set = build_srcset(SAMPLE, 800).unwrap();
        assert_eq!(
            set,
            "https://res.cloudinary.com/demo/upload/w_800,q_auto,f_webp/sample.jpg 1x, \
             https://res.cloudinary.com/demo/upload/w_800,q_auto,f_jpg/sample.jpg 2x"
        );
    }

    #[test]
    fn srcset_unavailable_for_foreign_or_empty_source() {
        assert_eq!(build_srcset("https://example.com/x.jpg", DEFAULT_WIDTH), None);
        assert_eq!(build_srcset("", DEFAULT_WIDTH), None);
    }

    #[test]
    fn non_string_values_pass_through() {
        let opts = TransformOptions::default();
        assert_eq!(build_url_value(&Value::Null, &opts), Value::Null);
        assert_eq!(build_url_value(&json!(42), &opts), json!(42));
        assert_eq!(build_srcset_value(&json!(42), DEFAULT_WIDTH), None);
        assert_eq!(
            build_url_value(&json!(SAMPLE), &opts),
            json!("https://res.cloudinary.com/demo/upload/w_400,q_auto,f_webp/sample.jpg")
        );
    }

    #[test]
    fn custom_convention_targets_another_host() {
        let builder = UrlBuilder::new(
            CdnConvention {
                host_marker: "media.shop.test".into(),
                upload_segment: "/img/".into(),
            },
            TransformOptions::default().with_width(640),
        );
        assert_eq!(
            builder.url("https://media.shop.test/img/cat.png"),
            "https://media.shop.test/img/w_640,q_auto,f_webp/cat.png"
        );
        assert_eq!(builder.url(SAMPLE), SAMPLE);
    }

    #[test]
    fn empty_upload_segment_passes_through() {
        let builder = UrlBuilder::new(
            CdnConvention {
                host_marker: CLOUDINARY_HOST.into(),
                upload_segment: String::new(),
            },
            TransformOptions::default(),
        );
        assert_eq!(builder.url(SAMPLE), SAMPLE);
        let (webp, jpg) = builder.srcset_candidates(SAMPLE, 400).unwrap();
        assert_eq!(webp, SAMPLE);
        assert_eq!(jpg, SAMPLE);
    }

    #[test]
    fn quality_tokens_are_inserted_verbatim() {
        for token in ["0", "150", "080"] {
            let opts = TransformOptions::default().with_quality(token.parse().unwrap());
            assert_eq!(
                build_url(SAMPLE, &opts),
                format!("https://res.cloudinary.com/demo/upload/w_400,q_{token},f_webp/sample.jpg")
            );
        }
    }

    #[test]
    fn srcset_candidates_match_descriptor() {
        let (webp, jpg) = UrlBuilder::default().srcset_candidates(SAMPLE, 800).unwrap();
        assert!(webp.contains("w_800,q_auto,f_webp"));
        assert!(jpg.contains("w_800,q_auto,f_jpg"));
        assert_eq!(build_srcset(SAMPLE, 800).unwrap(), format!("{webp} 1x, {jpg} 2x"));
    }

    #[test]
    fn builder_srcset_uses_default_quality() {
        let builder = UrlBuilder::new(
            CdnConvention::default(),
            TransformOptions::default().with_quality(Quality::level(60)),
        );
        let set = builder.srcset(SAMPLE, 400).unwrap();
        assert!(set.contains("w_400,q_60,f_webp/sample.jpg 1x"));
        assert!(set.ends_with("w_400,q_60,f_jpg/sample.jpg 2x"));
    }
}

//! `<img>` rendering for product cards and listings.

use super::url::UrlBuilder;
use maud::{Markup, html};

/// Render a lazily loaded `<img>` for `src` at `width` pixels.
///
/// Recognized sources get a rewritten `src` plus the density `srcset`.
/// Anything else is rendered with the original `src` and no `srcset`.
pub fn responsive_img(builder: &UrlBuilder, src: &str, alt: &str, width: u32) -> Markup {
    let options = builder.defaults.clone().with_width(width);
    let url = builder.url_with(src, &options);
    let srcset = builder.srcset(src, width);

    html! {
        img src=(&*url) srcset=[srcset] width=(width) alt=(alt) loading="lazy" decoding="async";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_source_gets_srcset() {
        let html = responsive_img(
            &UrlBuilder::default(),
            "https://res.cloudinary.com/demo/upload/shoe.jpg",
            "Red shoe",
            400,
        )
        .into_string();

        assert!(html.starts_with("<img"));
        assert!(html.contains(
            r#"src="https://res.cloudinary.com/demo/upload/w_400,q_auto,f_webp/shoe.jpg""#
        ));
        assert!(html.contains("srcset=\""));
        assert!(html.contains(" 1x, "));
        assert!(html.contains(r#"alt="Red shoe""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn foreign_source_has_no_srcset() {
        let html = responsive_img(
            &UrlBuilder::default(),
            "https://example.com/shoe.jpg",
            "",
            400,
        )
        .into_string();

        assert!(html.contains(r#"src="https://example.com/shoe.jpg""#));
        assert!(!html.contains("srcset"));
    }

    #[test]
    fn alt_text_is_escaped() {
        let html = responsive_img(
            &UrlBuilder::default(),
            "https://example.com/a.jpg",
            "<script>alert('x')</script>",
            400,
        )
        .into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

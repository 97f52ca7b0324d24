//! Image delivery URLs — pure string rewriting, no I/O.
//!
//! | Operation | Function |
//! |---|---|
//! | **Variant URL** | [`build_url`] / [`UrlBuilder::url_with`] |
//! | **Density srcset** | [`build_srcset`] / [`UrlBuilder::srcset`] |
//! | **Loose input** | [`build_url_value`], [`build_srcset_value`] |
//! | **Card markup** | [`markup::responsive_img`] |
//!
//! The module is split into:
//! - **Parameters**: what variant to request (width, quality, format)
//! - **Url**: the CDN convention and the rewriting itself
//! - **Markup**: `<img>` rendering on top of the two

pub mod markup;
mod params;
mod url;

pub use params::{DEFAULT_WIDTH, ImageFormat, ParamError, Quality, TransformOptions};
pub use url::{
    CLOUDINARY_HOST, CdnConvention, UPLOAD_SEGMENT, UrlBuilder, build_srcset, build_srcset_value,
    build_url, build_url_value,
};

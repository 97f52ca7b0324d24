//! # Storefront Kit
//!
//! The two pieces of real logic behind a storefront/admin front end: image
//! delivery URLs, and a deferred relay for errors raised outside the render
//! path.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`delivery`] | Rewrites media-CDN URLs into sized/recompressed variants and density srcsets |
//! | [`signal`] | Single-slot error state that relays captured errors to a recovery boundary |
//! | [`catalog`] | Bulk rewriting of JSON image-reference lists |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Never Fail on a URL
//!
//! [`delivery`] has no error path. Empty sources, foreign hosts and URLs
//! without the `/upload/` marker come back unchanged (or `None` for a
//! srcset). A product card with an unoptimized image still renders; a card
//! whose URL helper panicked does not.
//!
//! ## Density Pairs, Not Width Ladders
//!
//! [`delivery::build_srcset`] emits exactly two candidates at the *same*
//! pixel width: webp at `1x` and jpg at `2x`. The jpg entry is a fallback
//! encoding, not a larger rendition.
//!
//! ## Explicit Observation Cycle
//!
//! [`signal::ErrorBridge`] does not rely on any host runtime to re-render.
//! Reports are queued; the owner calls [`signal::ErrorBridge::run_cycle`],
//! which commits every pending change in order and then relays the held error
//! to the injected [`signal::RecoveryBoundary`]. Two reports before a cycle
//! relay only the latter; a clear before the cycle relays nothing.

pub mod catalog;
pub mod config;
pub mod delivery;
pub mod output;
pub mod signal;

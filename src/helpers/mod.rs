//! Helpers for presentation layers: URLs and share links

mod share;
mod url;

pub use share::*;
pub use url::*;

mod client;
mod endpoints;

pub use client::{Download, EntityApi, HttpEntityApi, UPSTREAM_BODY_PREVIEW_CHARS};
pub use endpoints::EntityEndpoints;

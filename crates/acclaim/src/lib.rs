//! Client for the Acclaim credentialing API.
//!
//! Provides read-only access to an organization's issued badges and badge
//! templates, plus helpers for deriving the alternate image sizes Acclaim's
//! CDN exposes through filename conventions.

pub mod assets;
pub mod client;
pub mod model;

pub use assets::standard_size_image_url;
pub use client::{AcclaimClient, AcclaimError};
pub use model::{Badge, BadgeTemplate};

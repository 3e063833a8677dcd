pub mod config;
pub mod intent;
pub mod replies;

pub use intent::{classify, extract_uuid, invited_by_self, Intent};

//! Helpers for Acclaim CDN image naming conventions.

use reqwest::Url;

use crate::client::AcclaimError;

/// Rewrites a badge image url to its `standard_` sized variant by prefixing
/// the final path segment, matching the CDN's filename convention.
///
/// The rewrite is purely textual. Applying it to a url that already carries
/// the prefix stacks another one, so callers should only pass original urls.
pub fn standard_size_image_url(image_url: &str) -> Result<String, AcclaimError> {
    let mut url = Url::parse(image_url)
        .map_err(|_| AcclaimError::InvalidImageUrl(image_url.to_string()))?;

    let file = url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AcclaimError::InvalidImageUrl(image_url.to_string()))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| AcclaimError::InvalidImageUrl(image_url.to_string()))?;
        segments.pop();
        segments.push(&format!("standard_{file}"));
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::standard_size_image_url;
    use crate::client::AcclaimError;

    #[test]
    fn prefixes_the_file_segment_only() {
        let rewritten =
            standard_size_image_url("https://cdn.example/images/abc123/badge.png").unwrap();
        assert_eq!(rewritten, "https://cdn.example/images/abc123/standard_badge.png");
    }

    #[test]
    fn preserves_query_string() {
        let rewritten =
            standard_size_image_url("https://cdn.example/images/badge.png?v=2").unwrap();
        assert_eq!(rewritten, "https://cdn.example/images/standard_badge.png?v=2");
    }

    #[test]
    fn applying_twice_stacks_the_prefix() {
        let once = standard_size_image_url("https://cdn.example/images/badge.png").unwrap();
        let twice = standard_size_image_url(&once).unwrap();
        assert_eq!(twice, "https://cdn.example/images/standard_standard_badge.png");
    }

    #[test]
    fn rejects_urls_without_a_file_segment() {
        let error = standard_size_image_url("https://cdn.example").unwrap_err();
        assert!(matches!(error, AcclaimError::InvalidImageUrl(_)));
    }

    #[test]
    fn rejects_unparseable_urls() {
        let error = standard_size_image_url("not a url").unwrap_err();
        assert!(matches!(error, AcclaimError::InvalidImageUrl(_)));
    }
}

use crate::error::{AppError, AppResult};
use regex::Regex;

/// Extra image / purchase link slots an admin may fill.
pub const MAX_SECONDARY_LINKS: usize = 4;

/// Checks that `url` is an absolute http(s) URL without whitespace.
pub fn validate_http_url(field: &str, url: &str) -> AppResult<()> {
    let url_regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$")
        .map_err(|e| AppError::InternalError(format!("invalid url pattern: {e}")))?;

    if !url_regex.is_match(url) {
        return Err(AppError::ValidationError(format!(
            "{field} must be an http(s) URL"
        )));
    }

    Ok(())
}

/// Drops blank entries; `None` when nothing is left so the field is omitted
/// from the stored record instead of being kept as an empty list.
pub fn compact_links(field: &str, links: &[String]) -> AppResult<Option<Vec<String>>> {
    let kept: Vec<String> = links
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if kept.len() > MAX_SECONDARY_LINKS {
        return Err(AppError::ValidationError(format!(
            "{field} accepts at most {MAX_SECONDARY_LINKS} entries"
        )));
    }
    for link in &kept {
        validate_http_url(field, link)?;
    }

    Ok(if kept.is_empty() { None } else { Some(kept) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("imageUrl", "https://cdn.example.com/crib.jpg").is_ok());
        assert!(validate_http_url("imageUrl", "http://shop.example/p?id=1").is_ok());
        assert!(validate_http_url("imageUrl", "ftp://example.com/a.png").is_err());
        assert!(validate_http_url("imageUrl", "https://exa mple.com").is_err());
        assert!(validate_http_url("imageUrl", "crib.jpg").is_err());
    }

    #[test]
    fn test_compact_links_all_blank_is_omitted() {
        let links = vec![String::new(), "   ".to_string(), String::new(), String::new()];
        assert_eq!(compact_links("imageUrls", &links).unwrap(), None);
        assert_eq!(compact_links("imageUrls", &[]).unwrap(), None);
    }

    #[test]
    fn test_compact_links_keeps_order() {
        let links = vec![
            String::new(),
            "https://a.example/1.jpg".to_string(),
            " ".to_string(),
            "https://a.example/2.jpg".to_string(),
        ];
        assert_eq!(
            compact_links("imageUrls", &links).unwrap(),
            Some(vec![
                "https://a.example/1.jpg".to_string(),
                "https://a.example/2.jpg".to_string()
            ])
        );
    }

    #[test]
    fn test_compact_links_rejects_more_than_four() {
        let links: Vec<String> = (0..5).map(|i| format!("https://a.example/{i}")).collect();
        assert!(matches!(
            compact_links("purchaseLinks", &links),
            Err(AppError::ValidationError(_))
        ));
    }
}

//! URL helper functions

use url::Url;

/// Resolve a site-relative path against the site root.
///
/// The root is treated as a directory: its query and fragment are dropped and
/// `path` lands below its last segment.
///
/// # Examples
/// ```ignore
/// full_url_for(&site, "/projects/tetris/") // -> "https://example.com/blog/projects/tetris/"
/// ```
pub fn full_url_for(site: &Url, path: &str) -> Result<String, url::ParseError> {
    let mut base = site.clone();
    base.set_query(None);
    base.set_fragment(None);
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    Ok(base.join(path.trim_start_matches('/'))?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_for() {
        let site = Url::parse("https://example.com").unwrap();
        assert_eq!(
            full_url_for(&site, "/projects/tetris/").unwrap(),
            "https://example.com/projects/tetris/"
        );
        assert_eq!(full_url_for(&site, "/").unwrap(), "https://example.com/");
    }

    #[test]
    fn test_full_url_for_with_base_path() {
        let site = Url::parse("https://example.com/blog/").unwrap();
        assert_eq!(
            full_url_for(&site, "/projects/a/b/").unwrap(),
            "https://example.com/blog/projects/a/b/"
        );

        let no_slash = Url::parse("https://example.com/blog").unwrap();
        assert_eq!(
            full_url_for(&no_slash, "/projects/a/").unwrap(),
            "https://example.com/blog/projects/a/"
        );
    }

    #[test]
    fn test_full_url_for_drops_query_and_fragment() {
        let site = Url::parse("https://x.com/?ref=1").unwrap();
        assert_eq!(
            full_url_for(&site, "/projects/a/").unwrap(),
            "https://x.com/projects/a/"
        );

        let site = Url::parse("https://x.com/blog/#top").unwrap();
        assert_eq!(
            full_url_for(&site, "/projects/a/").unwrap(),
            "https://x.com/blog/projects/a/"
        );
    }
}

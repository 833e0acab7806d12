//! RSS 2.0 feed (rss.xml)

use crate::config::SiteConfig;
use crate::content::Collection;
use crate::error::JournalError;
use crate::helpers::{full_url_for, rfc822_date};

/// Render the feed, newest entries first.
///
/// Requires the site root URL; entry links are `/projects/{id}/` resolved
/// against it.
pub fn render(config: &SiteConfig, collection: &Collection) -> Result<String, JournalError> {
    let site = config.site_url("rss.xml")?;
    let resolve = |path: &str| {
        full_url_for(&site, path).map_err(|source| JournalError::InvalidSiteUrl {
            url: site.to_string(),
            source,
        })
    };

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0">"#);
    feed.push('\n');
    feed.push_str("  <channel>\n");
    feed.push_str(&format!(
        "    <title>{}</title>\n",
        escape_xml(&config.title)
    ));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    feed.push_str(&format!(
        "    <link>{}</link>\n",
        escape_xml(&resolve("/")?)
    ));
    feed.push_str(&format!(
        "    <language>{}</language>\n",
        escape_xml(&config.language)
    ));

    for entry in collection.newest_first() {
        let link = escape_xml(&resolve(&entry.link())?);
        feed.push_str("    <item>\n");
        feed.push_str(&format!(
            "      <title>{}</title>\n",
            escape_xml(&entry.title)
        ));
        feed.push_str(&format!("      <link>{}</link>\n", link));
        feed.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            link
        ));
        feed.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(&entry.description)
        ));
        feed.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            rfc822_date(&entry.pub_date)
        ));
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");

    Ok(feed)
}

/// Escape XML special characters, dropping characters XML 1.0 cannot carry
fn escape_xml(s: &str) -> String {
    strip_invalid_xml_chars(s)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{draft, entry};

    fn config() -> SiteConfig {
        SiteConfig {
            url: Some("https://journal.example.com".to_string()),
            ..Default::default()
        }
    }

    fn item_links(feed: &str) -> Vec<&str> {
        feed.lines()
            .filter_map(|l| {
                l.trim()
                    .strip_prefix("<link>")
                    .and_then(|l| l.strip_suffix("</link>"))
            })
            .skip(1) // channel link
            .collect()
    }

    #[test]
    fn test_june_before_january() {
        let collection = Collection::from_entries(vec![
            entry("january", "2024-01-01"),
            entry("june", "2024-06-01"),
        ]);
        let feed = render(&config(), &collection).unwrap();
        assert_eq!(
            item_links(&feed),
            vec![
                "https://journal.example.com/projects/june/",
                "https://journal.example.com/projects/january/"
            ]
        );
        assert!(feed.contains("<pubDate>Sat, 01 Jun 2024 00:00:00 GMT</pubDate>"));
    }

    #[test]
    fn test_sorted_descending_and_drafts_excluded() {
        let collection = Collection::from_entries(vec![
            entry("b", "2023-05-05"),
            draft("hidden", "2025-01-01"),
            entry("a", "2024-02-02"),
            entry("c", "2022-12-12"),
        ]);
        let feed = render(&config(), &collection).unwrap();
        assert!(!feed.contains("hidden"));
        assert_eq!(feed.matches("<item>").count(), 3);

        let dates: Vec<_> = collection
            .newest_first()
            .iter()
            .map(|e| e.pub_date)
            .collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(
            item_links(&feed),
            vec![
                "https://journal.example.com/projects/a/",
                "https://journal.example.com/projects/b/",
                "https://journal.example.com/projects/c/"
            ]
        );
    }

    #[test]
    fn test_channel_metadata() {
        let feed = render(&config(), &Collection::default()).unwrap();
        assert!(feed.starts_with("<?xml"));
        assert!(feed.contains("<title>Project Journal</title>"));
        assert!(feed.contains("<link>https://journal.example.com/</link>"));
        assert!(feed.contains("<language>en</language>"));
        assert!(feed.trim_end().ends_with("</rss>"));
    }

    #[test]
    fn test_site_url_with_query() {
        let config = SiteConfig {
            url: Some("https://journal.example.com/blog?ref=feed#top".to_string()),
            ..Default::default()
        };
        let feed = render(&config, &Collection::from_entries(vec![entry("a", "2024-01-01")])).unwrap();
        assert!(feed.contains("<link>https://journal.example.com/blog/</link>"));
        assert_eq!(item_links(&feed), vec!["https://journal.example.com/blog/projects/a/"]);
    }

    #[test]
    fn test_missing_site_url() {
        let err = render(&SiteConfig::default(), &Collection::default()).unwrap_err();
        assert!(matches!(
            err,
            JournalError::MissingSiteConfiguration { artifact: "rss.xml" }
        ));
    }

    #[test]
    fn test_escaping() {
        let mut e = entry("amp", "2024-01-01");
        e.title = "Fish & <Chips>".to_string();
        e.description = "Bell\u{7} \"quoted\"".to_string();
        let feed = render(&config(), &Collection::from_entries(vec![e])).unwrap();
        assert!(feed.contains("<title>Fish &amp; &lt;Chips&gt;</title>"));
        assert!(feed.contains("<description>Bell &quot;quoted&quot;</description>"));
    }
}

use crate::catalog::PortfolioCatalog;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Home and the two landing anchors come first, then one entry per property
/// page keyed by its stable id.
pub fn sitemap_entries(
    base_url: &str,
    catalog: &PortfolioCatalog,
    last_modified: NaiveDate,
) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry {
            url: base_url.to_string(),
            last_modified,
            change_frequency: ChangeFrequency::Monthly,
            priority: 1.0,
        },
        SitemapEntry {
            url: format!("{base_url}#properties"),
            last_modified,
            change_frequency: ChangeFrequency::Weekly,
            priority: 0.9,
        },
        SitemapEntry {
            url: format!("{base_url}#contact"),
            last_modified,
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.8,
        },
    ];

    entries.extend(catalog.properties().iter().map(|property| SitemapEntry {
        url: format!("{base_url}/properties/{}", property.id),
        last_modified,
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.7,
    }));

    entries
}

/// Render entries as sitemap.xml text.
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for entry in entries {
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.url),
            entry.last_modified.format("%Y-%m-%d"),
            entry.change_frequency.as_str(),
            entry.priority,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

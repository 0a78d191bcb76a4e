//! RSS 2.0 feed of the blog collection

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::Collection;
use crate::helpers::{escape_xml, post_url, rfc2822, strip_invalid_xml_chars};

pub const RSS_MIME_TYPE: &str = "application/rss+xml";

pub struct FeedExporter<'a> {
    config: &'a SiteConfig,
}

impl<'a> FeedExporter<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Build the feed stamped with the current time
    pub fn export(&self, collection: &Collection) -> String {
        self.export_at(collection, Utc::now())
    }

    /// Build the feed with an explicit `lastBuildDate`
    pub fn export_at(&self, collection: &Collection, now: DateTime<Utc>) -> String {
        let config = self.config;
        let blog_url = config.blog_url();
        let managing = config
            .author_email
            .as_ref()
            .map(|email| escape_xml(&format!("{} ({})", email, config.author)));

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str("  <channel>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!("    <link>{}</link>\n", escape_xml(&blog_url)));
        feed.push_str(&format!(
            "    <description>{}</description>\n",
            escape_xml(&config.description)
        ));
        feed.push_str(&format!(
            "    <language>{}</language>\n",
            escape_xml(&config.language)
        ));
        feed.push_str(&format!(
            "    <lastBuildDate>{}</lastBuildDate>\n",
            now.to_rfc2822()
        ));
        feed.push_str(&format!(
            "    <atom:link href=\"{}/rss.xml\" rel=\"self\" type=\"{}\"/>\n",
            escape_xml(&blog_url),
            RSS_MIME_TYPE
        ));
        if let Some(managing) = &managing {
            feed.push_str(&format!("    <managingEditor>{}</managingEditor>\n", managing));
            feed.push_str(&format!("    <webMaster>{}</webMaster>\n", managing));
        }
        for category in &config.feed_categories {
            feed.push_str(&format!("    <category>{}</category>\n", escape_xml(category)));
        }

        for entry in collection {
            let link = escape_xml(&post_url(config, &entry.slug()));
            feed.push_str("    <item>\n");
            feed.push_str(&format!("      <title>{}</title>\n", escape_xml(&entry.title)));
            feed.push_str(&format!("      <link>{}</link>\n", link));
            feed.push_str(&format!(
                "      <guid isPermaLink=\"true\">{}</guid>\n",
                link
            ));
            feed.push_str(&format!(
                "      <description>{}</description>\n",
                escape_xml(entry.summary_text().unwrap_or(""))
            ));
            if let Some(date) = entry.published_at() {
                feed.push_str(&format!("      <pubDate>{}</pubDate>\n", rfc2822(&date)));
            }
            if let Some(managing) = &managing {
                feed.push_str(&format!("      <author>{}</author>\n", managing));
            }
            for tag in &entry.tags {
                feed.push_str(&format!("      <category>{}</category>\n", escape_xml(tag)));
            }
            feed.push_str("    </item>\n");
        }

        feed.push_str("  </channel>\n");
        feed.push_str("</rss>\n");

        tracing::debug!("Built feed with {} items", collection.len());
        strip_invalid_xml_chars(&feed)
    }
}

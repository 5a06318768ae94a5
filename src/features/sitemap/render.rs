use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat, Utc};
use minijinja::{context, Environment};
use serde::Serialize;

const SITEMAP_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{%- for url in urls %}
  <url>
    <loc>{{ url.loc | xml }}</loc>
    {%- if url.lastmod %}
    <lastmod>{{ url.lastmod }}</lastmod>
    {%- endif %}
    <changefreq>{{ url.changefreq }}</changefreq>
    <priority>{{ url.priority }}</priority>
  </url>
{%- endfor %}
</urlset>
"#;

static SITEMAP_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// XML text escaping for `<loc>` values
fn xml_escape(value: String) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn environment() -> Result<&'static Environment<'static>, minijinja::Error> {
    if let Some(env) = SITEMAP_ENV.get() {
        return Ok(env);
    }
    let mut env = Environment::new();
    env.add_filter("xml", xml_escape);
    env.add_template("sitemap", SITEMAP_TEMPLATE)?;
    Ok(SITEMAP_ENV.get_or_init(|| env))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Serialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: ChangeFreq,
    pub priority: &'static str,
}

impl SitemapUrl {
    pub fn new(
        base_url: &str,
        path: &str,
        lastmod: Option<DateTime<Utc>>,
        changefreq: ChangeFreq,
        priority: &'static str,
    ) -> Self {
        Self {
            loc: format!("{}{}", base_url, path),
            lastmod: lastmod.map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            changefreq,
            priority,
        }
    }
}

pub fn render_sitemap(urls: &[SitemapUrl]) -> Result<String, minijinja::Error> {
    environment()?
        .get_template("sitemap")?
        .render(context! { urls => urls })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_urlset_with_escaped_locations() {
        let updated = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let urls = vec![
            SitemapUrl::new("https://ienet.online", "/", None, ChangeFreq::Weekly, "1.0"),
            SitemapUrl::new(
                "https://ienet.online",
                "/services/web-development?ref=a&b",
                Some(updated),
                ChangeFreq::Monthly,
                "0.8",
            ),
        ];

        let xml = render_sitemap(&urls).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://ienet.online/</loc>"));
        assert!(xml.contains("ref=a&amp;b"));
        assert!(xml.contains("<lastmod>2025-03-01T09:30:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert_eq!(xml.matches("<lastmod>").count(), 1);
    }

    #[test]
    fn empty_sitemap_is_still_valid() {
        let xml = render_sitemap(&[]).unwrap();
        assert!(xml.contains("<urlset"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}

use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct RobotsRule {
    pub user_agent: &'static str,
    pub allow: Vec<&'static str>,
    pub disallow: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    pub rules: Vec<RobotsRule>,
    pub sitemap: String,
}

impl RobotsPolicy {
    /// Crawlers may index the public site but not the JSON API or the
    /// service's internal endpoints.
    pub fn standard(base_url: &str) -> Self {
        Self {
            rules: vec![
                RobotsRule {
                    user_agent: "*",
                    allow: vec!["/"],
                    disallow: vec!["/api/", "/internal/"],
                },
                RobotsRule {
                    user_agent: "Googlebot",
                    allow: vec!["/"],
                    disallow: vec!["/api/"],
                },
            ],
            sitemap: format!("{base_url}/sitemap.xml"),
        }
    }

    /// Render the policy as robots.txt text.
    pub fn render(&self) -> String {
        let mut body = String::new();

        for rule in &self.rules {
            let _ = writeln!(body, "User-agent: {}", rule.user_agent);
            for path in &rule.allow {
                let _ = writeln!(body, "Allow: {path}");
            }
            for path in &rule.disallow {
                let _ = writeln!(body, "Disallow: {path}");
            }
            body.push('\n');
        }

        let _ = writeln!(body, "Sitemap: {}", self.sitemap);
        body
    }
}

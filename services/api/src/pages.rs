//! Server-rendered page shells. Presentation is deliberately minimal; the
//! point of these templates is the embedded JSON-LD and the recovery screen
//! shown when rendering fails.

use aurelian::catalog::{PortfolioCatalog, Property};
use aurelian::config::AppEnvironment;
use aurelian::seo::SchemaGenerator;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::fmt::Write as _;

fn page_frame(title: &str, json_ld: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{title}</title>\n<script type=\"application/ld+json\">{json_ld}</script>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Landing page: hero, property grid, pillars, FAQ, offices, and the full
/// structured-data payload in the head.
pub(crate) fn home(
    catalog: &PortfolioCatalog,
    schema: &SchemaGenerator,
) -> Result<String, serde_json::Error> {
    let json_ld = serde_json::to_string(&schema.structured_data(catalog))?;

    let mut body = String::new();
    body.push_str("<header><nav><a href=\"/\">Aurelian Estates</a> <a href=\"/the-vault\">The Vault</a></nav></header>\n");
    body.push_str("<section id=\"hero\"><h1>Aurelian Estates</h1><p>Ultra-luxury real estate portfolio for discerning clientele</p></section>\n");

    body.push_str("<section id=\"properties\"><h2>Portfolio</h2>\n");
    for property in catalog.properties() {
        let _ = write!(
            body,
            "<article data-property-id=\"{}\"><h3>{}</h3><p>{} — {}</p><ul>",
            property.id,
            escape_html(property.name),
            escape_html(property.location),
            escape_html(property.price),
        );
        for feature in &property.features {
            let _ = write!(body, "<li>{}</li>", escape_html(feature));
        }
        body.push_str("</ul></article>\n");
    }
    body.push_str("</section>\n");

    body.push_str("<section id=\"pillars\">\n");
    for pillar in catalog.pillars() {
        let _ = write!(
            body,
            "<article><h3>{}</h3><p>{}</p></article>\n",
            escape_html(pillar.title),
            escape_html(pillar.description),
        );
    }
    body.push_str("</section>\n");

    body.push_str("<section id=\"faq\">\n");
    for item in catalog.faq_items() {
        let _ = write!(
            body,
            "<details><summary>{}</summary><p>{}</p></details>\n",
            escape_html(item.question),
            escape_html(item.answer),
        );
    }
    body.push_str("</section>\n");

    body.push_str("<footer id=\"contact\"><ul>");
    for office in catalog.offices() {
        let _ = write!(
            body,
            "<li>{} · {}</li>",
            escape_html(office.city),
            escape_html(office.phone),
        );
    }
    body.push_str("</ul><nav>");
    for link in catalog.footer_links() {
        let _ = write!(
            body,
            "<a href=\"{}\">{}</a> ",
            link.href,
            escape_html(link.label),
        );
    }
    body.push_str("</nav></footer>\n");

    Ok(page_frame(
        "Aurelian Estates | Ultra-Luxury Real Estate",
        &json_ld,
        &body,
    ))
}

/// Scroll-story page for a single property, with its listing schema inline.
pub(crate) fn property_story(
    property: &Property,
    schema: &SchemaGenerator,
) -> Result<String, serde_json::Error> {
    let json_ld = serde_json::to_string(&schema.property(property))?;

    let mut body = String::new();
    let _ = write!(
        body,
        "<article><h1>{}</h1><p>{}</p><p>{}</p><p>{}</p></article>\n",
        escape_html(property.name),
        escape_html(property.location),
        escape_html(property.price),
        escape_html(property.description),
    );

    let title = format!("{} | Aurelian Estates", property.name);
    Ok(page_frame(&title, &json_ld, &body))
}

/// Gated vault shell. The gate itself lives behind the vault API; this page
/// only hosts the client.
pub(crate) fn vault(schema: &SchemaGenerator) -> Result<String, serde_json::Error> {
    let json_ld = serde_json::to_string(&schema.breadcrumb())?;
    let body = "<section id=\"vault\"><h1>The Vault</h1><p>Biometric clearance required.</p></section>\n";
    Ok(page_frame("The Vault | Aurelian Estates", &json_ld, body))
}

/// Recovery screen for rendering failures. Detail is only exposed in
/// development; production visitors get the apology and a way home.
pub(crate) fn recovery_response(detail: &str, environment: AppEnvironment) -> Response {
    tracing::error!(%detail, "page rendering failed");

    let detail_block = if environment.shows_error_detail() {
        format!("<pre>{}</pre>\n", escape_html(detail))
    } else {
        String::new()
    };

    let body = format!(
        "<main><h1>Something Went Wrong</h1><p>We apologize for the inconvenience. Our team has been notified.</p>\n{detail_block}<p><a href=\"/\">Return Home</a></p></main>\n"
    );
    let html = page_frame("Something Went Wrong | Aurelian Estates", "{}", &body);

    (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response()
}

pub mod robots;
pub mod schema;
pub mod sitemap;

pub use robots::RobotsPolicy;
pub use schema::{SchemaGenerator, StructuredData};
pub use sitemap::{sitemap_entries, ChangeFrequency, SitemapEntry};

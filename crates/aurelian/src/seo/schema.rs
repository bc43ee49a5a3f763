//! JSON-LD structured data for search engines, generated purely from the
//! static catalog and the configured base URL. Every generator is
//! deterministic and total: a listing that lacks a parsable price, bedroom
//! count, or floor size simply omits those fields.

use crate::catalog::{CountryCode, PortfolioCatalog, PriceType, Property};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub telephone: &'static str,
    pub contact_type: &'static str,
    pub area_served: &'static str,
    pub available_language: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub address_locality: String,
    pub address_country: &'static str,
}

impl PostalAddress {
    fn new(locality: &str, country: CountryCode) -> Self {
        Self {
            schema_type: "PostalAddress",
            address_locality: locality.to_string(),
            address_country: country.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: &'static str,
    pub description: &'static str,
    pub url: String,
    pub logo: ImageObject,
    pub contact_point: Vec<ContactPoint>,
    pub address: Vec<PostalAddress>,
    pub same_as: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPriceSpecification {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub price: String,
    pub price_currency: &'static str,
    pub value_added_tax_included: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub price: String,
    pub price_currency: &'static str,
    pub availability: &'static str,
    pub price_specification: UnitPriceSpecification,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    pub unit_code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AmenityFeature {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: &'static str,
    pub description: &'static str,
    pub image: String,
    pub url: String,
    pub address: PostalAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Offer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_rooms: Option<u32>,
    pub floor_size: QuantitativeValue,
    pub amenity_feature: Vec<AmenityFeature>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbItem {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub position: u32,
    pub name: &'static str,
    pub item: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub item_list_element: Vec<BreadcrumbItem>,
}

/// The full structured-data payload embedded in the landing page head.
#[derive(Debug, Serialize)]
pub struct StructuredData {
    pub organization: OrganizationSchema,
    pub properties: Vec<PropertySchema>,
    pub breadcrumb: BreadcrumbSchema,
}

/// Generates JSON-LD records rooted at a fixed base URL.
#[derive(Debug, Clone)]
pub struct SchemaGenerator {
    base_url: String,
}

impl SchemaGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn organization(&self, catalog: &PortfolioCatalog) -> OrganizationSchema {
        OrganizationSchema {
            context: SCHEMA_CONTEXT,
            schema_type: "RealEstateAgent",
            id: format!("{}#organization", self.base_url),
            name: "Aurelian Estates",
            description: "Ultra-luxury real estate portfolio for discerning clientele",
            url: self.base_url.clone(),
            logo: ImageObject {
                schema_type: "ImageObject",
                url: format!("{}/icon.svg", self.base_url),
            },
            contact_point: sales_contact_points(),
            address: catalog
                .offices()
                .iter()
                .map(|office| {
                    PostalAddress::new(office.city, CountryCode::for_office_city(office.city))
                })
                .collect(),
            same_as: Vec::new(),
        }
    }

    pub fn property(&self, property: &Property) -> PropertySchema {
        let property_url = format!("{}/properties/{}", self.base_url, property.id);

        PropertySchema {
            context: SCHEMA_CONTEXT,
            schema_type: "RealEstateListing",
            id: format!("{property_url}#listing"),
            name: property.name,
            description: property.description,
            image: format!("{}{}", self.base_url, property.image),
            url: property_url,
            address: PostalAddress::new(
                property.location,
                CountryCode::for_listing_location(property.location),
            ),
            offers: extract_offer(property),
            number_of_rooms: extract_bedroom_count(&property.features),
            floor_size: QuantitativeValue {
                schema_type: "QuantitativeValue",
                value: extract_square_footage(&property.features),
                unit_code: "SQM",
            },
            amenity_feature: property
                .features
                .iter()
                .map(|feature| AmenityFeature {
                    schema_type: "LocationFeatureSpecification",
                    name: feature.to_string(),
                })
                .collect(),
        }
    }

    pub fn breadcrumb(&self) -> BreadcrumbSchema {
        BreadcrumbSchema {
            context: SCHEMA_CONTEXT,
            schema_type: "BreadcrumbList",
            item_list_element: vec![
                BreadcrumbItem {
                    schema_type: "ListItem",
                    position: 1,
                    name: "Home",
                    item: self.base_url.clone(),
                },
                BreadcrumbItem {
                    schema_type: "ListItem",
                    position: 2,
                    name: "Properties",
                    item: format!("{}#properties", self.base_url),
                },
            ],
        }
    }

    pub fn structured_data(&self, catalog: &PortfolioCatalog) -> StructuredData {
        StructuredData {
            organization: self.organization(catalog),
            properties: catalog
                .properties()
                .iter()
                .map(|property| self.property(property))
                .collect(),
            breadcrumb: self.breadcrumb(),
        }
    }
}

fn sales_contact_points() -> Vec<ContactPoint> {
    vec![
        ContactPoint {
            schema_type: "ContactPoint",
            telephone: "+44-20-7946-0958",
            contact_type: "Sales",
            area_served: "GB",
            available_language: vec!["English"],
        },
        ContactPoint {
            schema_type: "ContactPoint",
            telephone: "+971-4-123-4567",
            contact_type: "Sales",
            area_served: "AE",
            available_language: vec!["English", "Arabic"],
        },
        ContactPoint {
            schema_type: "ContactPoint",
            telephone: "+1-212-555-0198",
            contact_type: "Sales",
            area_served: "US",
            available_language: vec!["English"],
        },
    ]
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$([\d.]+)M").expect("price pattern is valid"))
}

fn digits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("digits pattern is valid"))
}

fn grouped_digits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\d,]+").expect("grouped digits pattern is valid"))
}

/// Only development listings with a `$<N>M` display price carry an offer
/// block; any other format drops pricing from the structured data entirely
/// (omit-on-mismatch is intentional, not a parse failure).
fn extract_offer(property: &Property) -> Option<Offer> {
    if property.price_type != PriceType::Development {
        return None;
    }

    let captures = price_pattern().captures(property.price)?;
    let millions: f64 = captures.get(1)?.as_str().parse().ok()?;
    let price = format!("{}", (millions * 1_000_000.0).round() as u64);

    Some(Offer {
        schema_type: "Offer",
        price: price.clone(),
        price_currency: "USD",
        availability: "https://schema.org/PreOrder",
        price_specification: UnitPriceSpecification {
            schema_type: "UnitPriceSpecification",
            price,
            price_currency: "USD",
            value_added_tax_included: false,
        },
    })
}

fn extract_bedroom_count(features: &[&str]) -> Option<u32> {
    let feature = features.iter().find(|f| f.contains("Bedroom"))?;
    let digits = digits_pattern().find(feature)?;
    digits.as_str().parse().ok()
}

fn extract_square_footage(features: &[&str]) -> Option<u32> {
    let feature = features.iter().find(|f| f.contains("sq ft"))?;
    let grouped = grouped_digits_pattern().find(feature)?;
    grouped.as_str().replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PortfolioCatalog;

    const BASE: &str = "https://aurelian-estates.vercel.app";

    fn generator() -> SchemaGenerator {
        SchemaGenerator::new(BASE)
    }

    fn custom_property(price: &'static str, price_type: PriceType) -> Property {
        Property {
            id: 42,
            name: "Test Estate",
            location: "Swiss Alps",
            price,
            image: "/images/test.jpg",
            description: "Test",
            features: Vec::new(),
            price_type,
        }
    }

    #[test]
    fn organization_schema_derives_addresses_from_offices() {
        let catalog = PortfolioCatalog::standard();
        let schema = generator().organization(&catalog);

        assert_eq!(schema.id, format!("{BASE}#organization"));
        assert_eq!(schema.contact_point.len(), 3);
        let countries: Vec<&str> = schema
            .address
            .iter()
            .map(|address| address.address_country)
            .collect();
        assert_eq!(countries, vec!["GB", "AE", "US"]);
    }

    #[test]
    fn development_price_in_millions_becomes_numeric_offer() {
        let catalog = PortfolioCatalog::standard();
        let penthouse = catalog.property(2).expect("penthouse present");
        let schema = generator().property(penthouse);

        let offer = schema.offers.expect("offer present");
        assert_eq!(offer.price, "12500000");
        assert_eq!(offer.price_currency, "USD");
        assert_eq!(offer.price_specification.price, "12500000");
        assert!(!offer.price_specification.value_added_tax_included);
    }

    #[test]
    fn inquire_pricing_omits_the_offer_block() {
        let catalog = PortfolioCatalog::standard();
        let villa = catalog.property(1).expect("villa present");
        let schema = generator().property(villa);
        assert!(schema.offers.is_none());

        let rendered = serde_json::to_value(&schema).expect("schema serializes");
        assert!(rendered.get("offers").is_none());
    }

    #[test]
    fn non_matching_development_price_omits_the_offer_block() {
        let property = custom_property("Price on Application", PriceType::Development);
        let schema = generator().property(&property);
        assert!(schema.offers.is_none());
    }

    #[test]
    fn fractional_millions_round_to_whole_dollars() {
        let property = custom_property("From $8.3M", PriceType::Development);
        let schema = generator().property(&property);
        assert_eq!(schema.offers.expect("offer present").price, "8300000");
    }

    #[test]
    fn bedroom_and_floor_size_extraction_is_best_effort() {
        let catalog = PortfolioCatalog::standard();

        let penthouse = generator().property(catalog.property(2).expect("penthouse"));
        assert_eq!(penthouse.number_of_rooms, Some(5));
        assert_eq!(penthouse.floor_size.value, None);

        let villa = generator().property(catalog.property(1).expect("villa"));
        assert_eq!(villa.number_of_rooms, None);
        assert_eq!(villa.floor_size.value, Some(12_000));
    }

    #[test]
    fn property_without_features_still_produces_a_schema() {
        let property = custom_property("Inquire for Pricing", PriceType::Inquire);
        let schema = generator().property(&property);

        assert_eq!(schema.number_of_rooms, None);
        assert_eq!(schema.floor_size.value, None);
        assert!(schema.amenity_feature.is_empty());

        let rendered = serde_json::to_value(&schema).expect("schema serializes");
        assert!(rendered.get("numberOfRooms").is_none());
        assert!(rendered["floorSize"].get("value").is_none());
        assert_eq!(rendered["floorSize"]["unitCode"], "SQM");
    }

    #[test]
    fn breadcrumb_is_two_levels() {
        let schema = generator().breadcrumb();
        assert_eq!(schema.item_list_element.len(), 2);
        assert_eq!(schema.item_list_element[0].name, "Home");
        assert_eq!(
            schema.item_list_element[1].item,
            format!("{BASE}#properties")
        );
    }

    #[test]
    fn structured_data_covers_every_property() {
        let catalog = PortfolioCatalog::standard();
        let data = generator().structured_data(&catalog);
        assert_eq!(data.properties.len(), catalog.properties().len());
    }

    #[test]
    fn json_ld_keys_use_schema_org_spelling() {
        let catalog = PortfolioCatalog::standard();
        let rendered =
            serde_json::to_value(generator().organization(&catalog)).expect("serializes");
        assert_eq!(rendered["@type"], "RealEstateAgent");
        assert!(rendered.get("contactPoint").is_some());
        assert_eq!(rendered["address"][0]["addressLocality"], "London");
    }
}

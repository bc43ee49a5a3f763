use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    Inquire,
    Development,
}

impl PriceType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inquire => "Inquire",
            Self::Development => "Development",
        }
    }
}

/// ISO 3166-1 alpha-2 codes for every market the portfolio touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountryCode {
    GB,
    AE,
    US,
    FR,
    CH,
}

impl CountryCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GB => "GB",
            Self::AE => "AE",
            Self::US => "US",
            Self::FR => "FR",
            Self::CH => "CH",
        }
    }

    /// Office cities map to the country the office operates in; anything
    /// unrecognized is treated as the New York headquarters.
    pub fn for_office_city(city: &str) -> Self {
        match city {
            "London" => Self::GB,
            "Dubai" => Self::AE,
            _ => Self::US,
        }
    }

    /// Listing locations are free-form marketing copy, so this is a substring
    /// lookup with the Alpine markets as the fallback.
    pub fn for_listing_location(location: &str) -> Self {
        if location.contains("London") {
            Self::GB
        } else if location.contains("Dubai") {
            Self::AE
        } else if location.contains("New York") {
            Self::US
        } else if location.contains("French Riviera") || location.contains("Côte d'Azur") {
            Self::FR
        } else {
            Self::CH
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub id: u32,
    pub name: &'static str,
    pub location: &'static str,
    pub price: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub features: Vec<&'static str>,
    pub price_type: PriceType,
}

#[derive(Debug, Clone, Serialize)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Office {
    pub city: &'static str,
    pub phone: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pillar {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// The complete static portfolio dataset. Built once at startup and shared
/// read-only; nothing mutates it during a session.
#[derive(Debug)]
pub struct PortfolioCatalog {
    properties: Vec<Property>,
    faq_items: Vec<FaqItem>,
    offices: Vec<Office>,
    pillars: Vec<Pillar>,
    footer_links: Vec<FooterLink>,
}

impl PortfolioCatalog {
    pub fn standard() -> Self {
        Self {
            properties: standard_properties(),
            faq_items: standard_faq_items(),
            offices: standard_offices(),
            pillars: standard_pillars(),
            footer_links: standard_footer_links(),
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Property ids double as routing keys and schema identifiers.
    pub fn property(&self, id: u32) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn faq_items(&self) -> &[FaqItem] {
        &self.faq_items
    }

    pub fn offices(&self) -> &[Office] {
        &self.offices
    }

    pub fn pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    pub fn footer_links(&self) -> &[FooterLink] {
        &self.footer_links
    }
}

/// Qualification ranges offered by the private access form.
pub const INVESTMENT_CAPACITIES: [&str; 4] =
    ["$5M - $10M", "$10M - $50M", "$50M - $100M", "$100M+"];

/// Markets selectable on the private access form.
pub const DESIRED_LOCATIONS: [&str; 5] =
    ["London", "Dubai", "New York", "French Riviera", "Swiss Alps"];

fn standard_properties() -> Vec<Property> {
    vec![
        Property {
            id: 1,
            name: "Obsidian Villa",
            location: "French Riviera",
            price: "Inquire for Pricing",
            image: "/images/obsidian-villa.jpg",
            description: "Architectural masterpiece perched on clifftops overlooking the Mediterranean. This contemporary villa seamlessly blends minimalist design with luxury functionality, featuring floor-to-ceiling glass facades, a private beach access, and a state-of-the-art smart home system.",
            features: vec![
                "12,000 sq ft",
                "Smart Home System",
                "Private Beach Access",
                "Wine Cellar",
                "Infinity Pool",
            ],
            price_type: PriceType::Inquire,
        },
        Property {
            id: 2,
            name: "The Penthouse",
            location: "London Mayfair",
            price: "From $12.5M",
            image: "/images/penthouse.jpg",
            description: "Crown jewel of London's most exclusive postcodes. This ultra-premium penthouse occupies the top three floors of a Georgian mansion, with panoramic views of Hyde Park and the London skyline. Features a private spa, wine cellar, and direct access to Knightsbridge.",
            features: vec![
                "5 Bedrooms",
                "Wine Cellar",
                "Rooftop Terrace",
                "Private Spa",
                "Panoramic Views",
            ],
            price_type: PriceType::Development,
        },
        Property {
            id: 3,
            name: "Coastal Sanctuary",
            location: "Côte d'Azur",
            price: "From $8.3M",
            image: "/images/coastal-sanctuary.jpg",
            description: "Secluded retreat overlooking pristine Mediterranean coastline. This estate offers unmatched privacy with its private marina, helipad, and extensive grounds. The architecture honors traditional Provençal design while incorporating modern amenities.",
            features: vec![
                "Private Marina",
                "Infinity Pool",
                "Helipad",
                "Guest House",
                "Vineyard",
            ],
            price_type: PriceType::Development,
        },
    ]
}

fn standard_faq_items() -> Vec<FaqItem> {
    vec![
        FaqItem {
            question: "What makes Aurelian's off-market pocket listings exclusive?",
            answer: "We partner directly with family offices and discreet sellers. Properties never enter public MLS databases, preserving confidentiality and commanding premium valuations.",
        },
        FaqItem {
            question: "How does global tax residency strategy work?",
            answer: "Our legal and tax advisors align property ownership structures with your residency goals, optimizing both privacy and fiscal efficiency across jurisdictions.",
        },
        FaqItem {
            question: "What does post-purchase management include?",
            answer: "Aurelian provides end-to-end estate staffing and asset maintenance via our proprietary concierge network.",
        },
    ]
}

fn standard_offices() -> Vec<Office> {
    vec![
        Office {
            city: "London",
            phone: "+44 20 7946 0958",
        },
        Office {
            city: "Dubai",
            phone: "+971 4 123 4567",
        },
        Office {
            city: "New York",
            phone: "+1 212 555 0198",
        },
    ]
}

fn standard_pillars() -> Vec<Pillar> {
    vec![
        Pillar {
            icon: "Shield",
            title: "Value Preservation",
            description: "Our portfolio comprises blue-chip postcodes in markets with 50+ year appreciation records. Each asset is vetted for long-term wealth security.",
        },
        Pillar {
            icon: "Lock",
            title: "Total Discretion",
            description: "Anonymous ownership structures, NDA protocols, and encrypted portals protect your portfolio. We operate with the confidentiality of a Swiss bank.",
        },
        Pillar {
            icon: "Lightbulb",
            title: "Asset Intelligence",
            description: "Quarterly market analysis, tax optimization strategies, and appreciation forecasting. Your assets are monitored by an expert concierge network.",
        },
    ]
}

fn standard_footer_links() -> Vec<FooterLink> {
    vec![
        FooterLink {
            label: "Privacy Protocol",
            href: "#",
        },
        FooterLink {
            label: "Terms of Acquisition",
            href: "#",
        },
        FooterLink {
            label: "Investor Relations",
            href: "#",
        },
        FooterLink {
            label: "Journal",
            href: "#",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn property_ids_are_unique() {
        let catalog = PortfolioCatalog::standard();
        let ids: HashSet<u32> = catalog.properties().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog.properties().len());
    }

    #[test]
    fn property_lookup_uses_stable_ids() {
        let catalog = PortfolioCatalog::standard();
        let villa = catalog.property(1).expect("obsidian villa present");
        assert_eq!(villa.name, "Obsidian Villa");
        assert!(catalog.property(99).is_none());
    }

    #[test]
    fn office_cities_resolve_to_expected_countries() {
        assert_eq!(CountryCode::for_office_city("London"), CountryCode::GB);
        assert_eq!(CountryCode::for_office_city("Dubai"), CountryCode::AE);
        assert_eq!(CountryCode::for_office_city("New York"), CountryCode::US);
        assert_eq!(CountryCode::for_office_city("Zurich"), CountryCode::US);
    }

    #[test]
    fn listing_locations_fall_back_to_alpine_markets() {
        assert_eq!(
            CountryCode::for_listing_location("London Mayfair"),
            CountryCode::GB
        );
        assert_eq!(
            CountryCode::for_listing_location("Côte d'Azur"),
            CountryCode::FR
        );
        assert_eq!(
            CountryCode::for_listing_location("Swiss Alps"),
            CountryCode::CH
        );
    }
}

// src/scraper/sources.rs

/// CSS selectors for pulling one listing card apart.
pub struct Selectors {
    pub listings: &'static str,
    pub title: &'static str,
    pub price: &'static str,
    pub description: &'static str,
    pub bedrooms: &'static str,
    pub bathrooms: &'static str,
    pub location: &'static str,
    pub image: &'static str,
    pub link: &'static str,
}

/// A property portal that lists Ndola real estate.
pub struct PortalSource {
    pub name: &'static str,
    pub base_url: &'static str,
    pub search_url: &'static str,
    pub selectors: Selectors,
}

pub const SOURCES: &[PortalSource] = &[
    PortalSource {
        name: "ZambiaProperty",
        base_url: "https://www.zambiaproperty.com",
        search_url: "https://www.zambiaproperty.com/search?location=ndola",
        selectors: Selectors {
            listings: ".property-card",
            title: ".property-title",
            price: ".property-price",
            description: ".property-description",
            bedrooms: ".bedrooms",
            bathrooms: ".bathrooms",
            location: ".property-location",
            image: ".property-image img",
            link: "a",
        },
    },
    PortalSource {
        name: "PropertyZambia",
        base_url: "https://www.propertyzambia.com",
        search_url: "https://www.propertyzambia.com/properties?city=ndola",
        selectors: Selectors {
            listings: ".listing-item",
            title: "h3.title",
            price: ".price-tag",
            description: ".description",
            bedrooms: ".bed-count",
            bathrooms: ".bath-count",
            location: ".location-text",
            image: ".listing-image img",
            link: "a.listing-link",
        },
    },
];

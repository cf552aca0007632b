//! Book store records
//!
//! Markup follows books.toscrape.com: a category index in `.nav-list`,
//! listing pages of `article.product_pod` cards with a `.pager`, and detail
//! pages with a `.product_main` block and a product information table.

use super::{CatalogRecord, SiteLayout};
use crate::crawler::document::{
    class_token, element_text, next_sibling_named, select_one_within, table_value,
};
use crate::crawler::{Document, ExtractError};
use crate::url::{capture_number, capture_text};
use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+_(\d+)/index\.html$").expect("slug id pattern is valid"));

const MAIN_CONTAINER: &str = ".product_main";

/// Field values for [`BookRecord::new`]
#[derive(Debug, Clone)]
pub struct BookFields {
    pub id: String,
    pub name: String,
    pub upc: String,
    pub product_type: String,
    pub price_excl_tax: String,
    pub price_incl_tax: String,
    pub tax: String,
    pub availability: String,
    pub number_of_reviews: String,
    pub star_rating: String,
    pub description: String,
    pub link: String,
}

/// One book detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    id: String,
    name: String,
    upc: String,
    product_type: String,
    price_excl_tax: String,
    price_incl_tax: String,
    tax: String,
    availability: String,
    number_of_reviews: String,
    star_rating: String,
    description: String,
    link: String,
}

impl BookRecord {
    /// Builds a record, trimming every field
    pub fn new(fields: BookFields) -> Self {
        let clean = |value: String| value.trim().to_string();
        Self {
            id: clean(fields.id),
            name: clean(fields.name),
            upc: clean(fields.upc),
            product_type: clean(fields.product_type),
            price_excl_tax: clean(fields.price_excl_tax),
            price_incl_tax: clean(fields.price_incl_tax),
            tax: clean(fields.tax),
            availability: clean(fields.availability),
            number_of_reviews: clean(fields.number_of_reviews),
            star_rating: clean(fields.star_rating),
            description: clean(fields.description),
            link: clean(fields.link),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn upc(&self) -> &str {
        &self.upc
    }

    pub fn product_type(&self) -> &str {
        &self.product_type
    }

    pub fn price_excl_tax(&self) -> &str {
        &self.price_excl_tax
    }

    pub fn price_incl_tax(&self) -> &str {
        &self.price_incl_tax
    }

    pub fn tax(&self) -> &str {
        &self.tax
    }

    pub fn availability(&self) -> &str {
        &self.availability
    }

    pub fn number_of_reviews(&self) -> &str {
        &self.number_of_reviews
    }

    /// Rating word taken from the rating element's class ("One" .. "Five")
    pub fn star_rating(&self) -> &str {
        &self.star_rating
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl CatalogRecord for BookRecord {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "upc",
        "product_type",
        "price_excl_tax",
        "price_incl_tax",
        "tax",
        "availability",
        "number_of_reviews",
        "star_rating",
        "description",
        "link",
    ];

    const LAYOUT: SiteLayout = SiteLayout {
        category_links: &[".nav-list > li > ul > li > a", ".side_categories ul ul a"],
        listing_items: &["article.product_pod h3 a", "h3 a"],
        pager: &[".pager", "ul.pager"],
        next_labels: &["next"],
    };

    fn category_id(link: &str) -> Option<u32> {
        capture_number(&SLUG_ID, link)
    }

    fn detail_id(url: &str) -> Option<String> {
        capture_text(&SLUG_ID, url)
    }

    fn extract(document: &Document, id: String, url: &str) -> Result<Self, ExtractError> {
        let main = document
            .select_one(&[MAIN_CONTAINER])
            .ok_or(ExtractError::MissingContainer {
                selector: MAIN_CONTAINER,
            })?;

        let name = select_one_within(main, &["h1"])
            .map(|h1| element_text(&h1))
            .unwrap_or_default();

        let table = document.select_one(&["table.table", "table"]);
        let attribute = |header: &str| {
            table
                .map(|table| table_value(table, header))
                .unwrap_or_default()
        };

        let star_rating = select_one_within(main, &["p.star-rating"])
            .and_then(|p| class_token(p, |c| (c != "star-rating").then_some(c)))
            .unwrap_or_default();

        let description = document
            .select_one(&["#product_description"])
            .and_then(|marker| next_sibling_named(marker, "p"))
            .map(|p| element_text(&p))
            .unwrap_or_default();

        Ok(Self::new(BookFields {
            id,
            name,
            upc: attribute("UPC"),
            product_type: attribute("Product Type"),
            price_excl_tax: attribute("Price (excl. tax)"),
            price_incl_tax: attribute("Price (incl. tax)"),
            tax: attribute("Tax"),
            availability: attribute("Availability"),
            number_of_reviews: attribute("Number of reviews"),
            star_rating,
            description,
            link: url.to_string(),
        }))
    }

    fn empty(url: &str) -> Self {
        Self::new(BookFields {
            id: String::new(),
            name: String::new(),
            upc: String::new(),
            product_type: String::new(),
            price_excl_tax: String::new(),
            price_incl_tax: String::new(),
            tax: String::new(),
            availability: String::new(),
            number_of_reviews: String::new(),
            star_rating: String::new(),
            description: String::new(),
            link: url.to_string(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn link(&self) -> &str {
        &self.link
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.name.as_str(),
            self.upc.as_str(),
            self.product_type.as_str(),
            self.price_excl_tax.as_str(),
            self.price_incl_tax.as_str(),
            self.tax.as_str(),
            self.availability.as_str(),
            self.number_of_reviews.as_str(),
            self.star_rating.as_str(),
            self.description.as_str(),
            self.link.as_str(),
        ]
    }
}

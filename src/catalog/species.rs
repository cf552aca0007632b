//! Regional species database records
//!
//! Categories are taxonomic groups listed on the index page; each group has
//! paginated species listings ("次へ" links) and one detail page per species
//! with a `dl.species-data` attribute list and a red list badge.

use super::{CatalogRecord, SiteLayout};
use crate::crawler::document::{
    class_token, definition_value, element_text, next_sibling_named, select_one_within,
};
use crate::crawler::{Document, ExtractError};
use crate::url::{capture_number, capture_text};
use once_cell::sync::Lazy;
use regex::Regex;

static GROUP_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"taxa/(\d+)/list\.html$").expect("group id pattern is valid"));

static SPECIES_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"species/(\d+)\.html$").expect("species id pattern is valid"));

const MAIN_CONTAINER: &str = "#species";

/// Field values for [`SpeciesRecord::new`]
#[derive(Debug, Clone)]
pub struct SpeciesFields {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub order: String,
    pub family: String,
    pub red_list: String,
    pub distribution: String,
    pub habitat: String,
    pub body_size: String,
    pub description: String,
    pub link: String,
}

/// One species detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesRecord {
    id: String,
    name: String,
    scientific_name: String,
    order: String,
    family: String,
    red_list: String,
    distribution: String,
    habitat: String,
    body_size: String,
    description: String,
    link: String,
}

impl SpeciesRecord {
    /// Builds a record, trimming every field
    pub fn new(fields: SpeciesFields) -> Self {
        let clean = |value: String| value.trim().to_string();
        Self {
            id: clean(fields.id),
            name: clean(fields.name),
            scientific_name: clean(fields.scientific_name),
            order: clean(fields.order),
            family: clean(fields.family),
            red_list: clean(fields.red_list),
            distribution: clean(fields.distribution),
            habitat: clean(fields.habitat),
            body_size: clean(fields.body_size),
            description: clean(fields.description),
            link: clean(fields.link),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scientific_name(&self) -> &str {
        &self.scientific_name
    }

    pub fn order(&self) -> &str {
        &self.order
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Red list rank code ("CR", "EN", "VU", "NT", ...)
    pub fn red_list(&self) -> &str {
        &self.red_list
    }

    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    pub fn habitat(&self) -> &str {
        &self.habitat
    }

    pub fn body_size(&self) -> &str {
        &self.body_size
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl CatalogRecord for SpeciesRecord {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "scientific_name",
        "order",
        "family",
        "red_list",
        "distribution",
        "habitat",
        "body_size",
        "description",
        "link",
    ];

    const LAYOUT: SiteLayout = SiteLayout {
        category_links: &["ul.taxa-list li > a", "#taxa a"],
        listing_items: &[".species-list .species-card a.detail", ".species-list a"],
        pager: &["nav.pagination", ".pager"],
        next_labels: &["次へ", "次", "next"],
    };

    fn category_id(link: &str) -> Option<u32> {
        capture_number(&GROUP_ID, link)
    }

    fn detail_id(url: &str) -> Option<String> {
        capture_text(&SPECIES_ID, url)
    }

    fn extract(document: &Document, id: String, url: &str) -> Result<Self, ExtractError> {
        let main = document
            .select_one(&[MAIN_CONTAINER])
            .ok_or(ExtractError::MissingContainer {
                selector: MAIN_CONTAINER,
            })?;

        let text_of = |candidates: &[&str]| {
            select_one_within(main, candidates)
                .map(|element| element_text(&element))
                .unwrap_or_default()
        };

        let data = select_one_within(main, &["dl.species-data", "dl"]);
        let attribute = |terms: &[&str]| {
            data.map(|list| definition_value(list, terms))
                .unwrap_or_default()
        };

        let red_list = select_one_within(main, &[".redlist"])
            .and_then(|badge| class_token(badge, |c| c.strip_prefix("rank-")))
            .unwrap_or_default();

        let description = select_one_within(main, &["#description"])
            .and_then(|marker| next_sibling_named(marker, "p"))
            .map(|p| element_text(&p))
            .unwrap_or_default();

        Ok(Self::new(SpeciesFields {
            id,
            name: text_of(&["h1.species-name", "h1"]),
            scientific_name: text_of(&[".scientific-name", "h1 + i"]),
            order: attribute(&["目", "Order"]),
            family: attribute(&["科", "Family"]),
            red_list,
            distribution: attribute(&["分布", "Distribution"]),
            habitat: attribute(&["生息環境", "Habitat"]),
            body_size: attribute(&["大きさ", "Size"]),
            description,
            link: url.to_string(),
        }))
    }

    fn empty(url: &str) -> Self {
        Self::new(SpeciesFields {
            id: String::new(),
            name: String::new(),
            scientific_name: String::new(),
            order: String::new(),
            family: String::new(),
            red_list: String::new(),
            distribution: String::new(),
            habitat: String::new(),
            body_size: String::new(),
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
            self.scientific_name.as_str(),
            self.order.as_str(),
            self.family.as_str(),
            self.red_list.as_str(),
            self.distribution.as_str(),
            self.habitat.as_str(),
            self.body_size.as_str(),
            self.description.as_str(),
            self.link.as_str(),
        ]
    }
}

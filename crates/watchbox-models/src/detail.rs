use serde::{Deserialize, Serialize};
use crate::item::SearchResultItem;
use crate::kind::MediaKind;

/// One rating from an external source, in the order the catalog lists them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRating {
    pub source: String,
    pub value: String,
}

/// Full record for one catalog entry, fetched on demand and never cached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDetail {
    pub id: String,
    pub title: String,
    pub release_year: String,
    pub kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub plot: String,
    pub director: String,
    pub cast: String,
    pub genre: String,
    pub runtime: String,
    pub content_rating: String,
    pub released: String,
    pub writer: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    /// Catalog's own 0-10 score, kept as text ("7.5" or "N/A")
    pub catalog_rating: String,
    pub catalog_votes: String,
    pub source_ratings: Vec<SourceRating>,
}

impl ItemDetail {
    /// Numeric catalog rating, if the catalog reported one
    pub fn catalog_rating_value(&self) -> Option<f32> {
        self.catalog_rating
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| (0.0..=10.0).contains(v))
    }

    /// The search-result view of this record, used for watchlist membership
    pub fn to_result_item(&self) -> SearchResultItem {
        SearchResultItem {
            id: self.id.clone(),
            title: self.title.clone(),
            release_year: self.release_year.clone(),
            kind: self.kind,
            poster_url: self.poster_url.clone(),
            plot: Some(self.plot.clone()),
        }
    }
}

impl From<&ItemDetail> for SearchResultItem {
    fn from(detail: &ItemDetail) -> Self {
        detail.to_result_item()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(rating: &str) -> ItemDetail {
        ItemDetail {
            id: "tt001".to_string(),
            title: "Test Movie".to_string(),
            release_year: "2022".to_string(),
            kind: MediaKind::Movie,
            poster_url: None,
            plot: "A plot".to_string(),
            director: "Someone".to_string(),
            cast: "A, B".to_string(),
            genre: "Drama".to_string(),
            runtime: "100 min".to_string(),
            content_rating: "PG".to_string(),
            released: "01 Jan 2022".to_string(),
            writer: "N/A".to_string(),
            language: "English".to_string(),
            country: "USA".to_string(),
            awards: "N/A".to_string(),
            catalog_rating: rating.to_string(),
            catalog_votes: "1,234".to_string(),
            source_ratings: vec![],
        }
    }

    #[test]
    fn test_catalog_rating_value() {
        assert_eq!(detail("7.5").catalog_rating_value(), Some(7.5));
        assert_eq!(detail("N/A").catalog_rating_value(), None);
        assert_eq!(detail("11").catalog_rating_value(), None);
    }

    #[test]
    fn test_to_result_item_keeps_identity() {
        let item = detail("7.5").to_result_item();
        assert_eq!(item.id, "tt001");
        assert_eq!(item.plot.as_deref(), Some("A plot"));
    }
}

use serde::{Deserialize, Serialize};
use crate::kind::MediaKind;

/// A single entry from a catalog search page.
///
/// `release_year` is kept exactly as the catalog reports it: a single year
/// ("2022"), a closed range ("2008–2013") or an open range ("2020–").
/// Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub release_year: String,
    pub kind: MediaKind,
    /// `None` when the catalog reports the poster as unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
}

impl SearchResultItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, release_year: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_year: release_year.into(),
            kind,
            poster_url: None,
            plot: None,
        }
    }

    pub fn has_poster(&self) -> bool {
        self.poster_url.is_some()
    }
}

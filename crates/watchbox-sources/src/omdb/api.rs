use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use watchbox_models::{ItemDetail, MediaKind, SearchResultItem, SourceRating};
use crate::error::{CatalogError, DEFAULT_NOT_FOUND_MESSAGE};
use crate::traits::SearchPage;

/// The catalog's marker for a missing value
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    item_type: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Rated", default)]
    rated: Option<String>,
    #[serde(rename = "Released", default)]
    released: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Writer", default)]
    writer: Option<String>,
    #[serde(rename = "Actors", default)]
    actors: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "Language", default)]
    language: Option<String>,
    #[serde(rename = "Country", default)]
    country: Option<String>,
    #[serde(rename = "Awards", default)]
    awards: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default)]
    imdb_votes: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Type", default)]
    item_type: Option<String>,
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

fn is_positive(marker: &str) -> bool {
    marker.eq_ignore_ascii_case("true")
}

/// "N/A" and blank posters become `None`
fn poster_url(poster: Option<String>) -> Option<String> {
    poster.filter(|p| !p.trim().is_empty() && p.trim() != NOT_AVAILABLE)
}

fn text_or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn append_query(base_url: &str, params: &[(&str, &str)]) -> String {
    let mut url = base_url.to_string();
    let mut joiner = if url.contains('?') {
        if url.ends_with('?') || url.ends_with('&') { "" } else { "&" }
    } else {
        "?"
    };
    for (key, value) in params {
        url.push_str(joiner);
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
        joiner = "&";
    }
    url
}

/// Build the keyword search URL. `type` is only present when a kind is given.
pub fn search_url(base_url: &str, api_key: &str, query: &str, page: u32, kind: Option<MediaKind>) -> String {
    let page = page.to_string();
    let mut params = vec![("apikey", api_key), ("s", query), ("page", page.as_str())];
    if let Some(kind) = kind {
        params.push(("type", kind.as_str()));
    }
    append_query(base_url, &params)
}

/// Build the detail lookup URL (always asks for the full plot)
pub fn detail_url(base_url: &str, api_key: &str, id: &str) -> String {
    append_query(base_url, &[("apikey", api_key), ("i", id), ("plot", "full")])
}

/// Decode a search response body into a page, honoring the `Response` marker
pub fn parse_search_response(body: &str) -> Result<SearchPage, CatalogError> {
    let response: OmdbSearchResponse = serde_json::from_str(body)?;

    if !is_positive(&response.response) {
        let message = response
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NOT_FOUND_MESSAGE.to_string());
        return Err(CatalogError::NotFound(message));
    }

    let total_results = response
        .total_results
        .as_deref()
        .and_then(|t| t.trim().parse::<u64>().ok())
        .unwrap_or(0);

    let mut items = Vec::with_capacity(response.search.len());
    let mut skipped = 0;
    for entry in response.search {
        let kind = match entry.item_type.parse::<MediaKind>() {
            Ok(kind) => kind,
            Err(_) => {
                debug!(id = %entry.imdb_id, item_type = %entry.item_type, "Skipping catalog entry of unsupported type");
                skipped += 1;
                continue;
            }
        };
        items.push(SearchResultItem {
            id: entry.imdb_id,
            title: entry.title,
            release_year: entry.year,
            kind,
            poster_url: poster_url(entry.poster),
            plot: None,
        });
    }

    Ok(SearchPage { items, total_results, skipped })
}

/// Decode a detail response body, honoring the `Response` marker
pub fn parse_detail_response(body: &str) -> Result<ItemDetail, CatalogError> {
    let response: OmdbDetailResponse = serde_json::from_str(body)?;

    if !is_positive(&response.response) {
        let message = response
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "Incorrect IMDb ID.".to_string());
        return Err(CatalogError::DetailUnavailable(message));
    }

    let id = response
        .imdb_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| CatalogError::DetailUnavailable("Catalog response is missing an identifier".to_string()))?;

    let kind = response
        .item_type
        .as_deref()
        .and_then(|t| t.parse::<MediaKind>().ok())
        .unwrap_or_else(|| {
            warn!(id = %id, item_type = ?response.item_type, "Unrecognised catalog type; treating as movie");
            MediaKind::Movie
        });

    Ok(ItemDetail {
        id,
        title: response.title.unwrap_or_default(),
        release_year: response.year.unwrap_or_default(),
        kind,
        poster_url: poster_url(response.poster),
        plot: text_or_na(response.plot),
        director: text_or_na(response.director),
        cast: text_or_na(response.actors),
        genre: text_or_na(response.genre),
        runtime: text_or_na(response.runtime),
        content_rating: text_or_na(response.rated),
        released: text_or_na(response.released),
        writer: text_or_na(response.writer),
        language: text_or_na(response.language),
        country: text_or_na(response.country),
        awards: text_or_na(response.awards),
        catalog_rating: text_or_na(response.imdb_rating),
        catalog_votes: text_or_na(response.imdb_votes),
        source_ratings: response
            .ratings
            .into_iter()
            .map(|r| SourceRating { source: r.source, value: r.value })
            .collect(),
    })
}

async fn get_body(client: &Client, url: &str) -> Result<String, CatalogError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(CatalogError::Http { status: status.as_u16(), body: error_text });
    }

    Ok(response.text().await?)
}

/// Run one keyword search against the catalog
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    page: u32,
    kind: Option<MediaKind>,
) -> Result<SearchPage, CatalogError> {
    let url = search_url(base_url, api_key, query, page, kind);
    debug!(query = %query, page = page, kind = ?kind, "Searching catalog");
    let body = get_body(client, &url).await?;
    parse_search_response(&body)
}

/// Fetch the full record for one identifier
pub async fn get_detail(client: &Client, base_url: &str, api_key: &str, id: &str) -> Result<ItemDetail, CatalogError> {
    let url = detail_url(base_url, api_key, id);
    debug!(id = %id, "Fetching catalog detail");
    let body = get_body(client, &url).await?;
    parse_detail_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.omdbapi.com/";

    #[test]
    fn test_search_url_without_type() {
        let url = search_url(BASE, "key", "star wars", 2, None);
        assert_eq!(url, "https://www.omdbapi.com/?apikey=key&s=star%20wars&page=2");
        assert!(!url.contains("type="));
    }

    #[test]
    fn test_search_url_with_type() {
        let url = search_url(BASE, "key", "Test", 1, Some(MediaKind::Movie));
        assert!(url.ends_with("&type=movie"));
        assert!(!url.contains("type=series"));
    }

    #[test]
    fn test_urls_extend_existing_query() {
        let url = detail_url("http://localhost:8080/?v=1", "key", "tt001");
        assert_eq!(url, "http://localhost:8080/?v=1&apikey=key&i=tt001&plot=full");
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "Search": [
                {"Title": "Test Movie", "Year": "2022", "imdbID": "tt001", "Type": "movie", "Poster": "N/A"},
                {"Title": "Test Show", "Year": "2019–", "imdbID": "tt002", "Type": "series", "Poster": "https://img/p.jpg"},
                {"Title": "Test Game", "Year": "2020", "imdbID": "tt003", "Type": "game", "Poster": "N/A"}
            ],
            "totalResults": "42",
            "Response": "True"
        }"#;

        let page = parse_search_response(body).unwrap();
        assert_eq!(page.total_results, 42);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.skipped, 1);
        assert_eq!(page.returned(), 3);
        assert_eq!(page.items[0].title, "Test Movie");
        assert_eq!(page.items[0].poster_url, None);
        assert_eq!(page.items[1].kind, MediaKind::Series);
        assert_eq!(page.items[1].release_year, "2019–");
        assert_eq!(page.items[1].poster_url.as_deref(), Some("https://img/p.jpg"));
    }

    #[test]
    fn test_parse_search_response_negative_marker() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        match parse_search_response(body) {
            Err(CatalogError::NotFound(msg)) => assert_eq!(msg, "Movie not found!"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_response_default_message() {
        let body = r#"{"Response": "False"}"#;
        match parse_search_response(body) {
            Err(CatalogError::NotFound(msg)) => assert_eq!(msg, DEFAULT_NOT_FOUND_MESSAGE),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_response_bad_total() {
        let body = r#"{"Search": [], "totalResults": "lots", "Response": "True"}"#;
        assert_eq!(parse_search_response(body).unwrap().total_results, 0);
    }

    #[test]
    fn test_parse_search_response_malformed_json() {
        assert!(matches!(parse_search_response("<html>"), Err(CatalogError::Decode(_))));
    }

    #[test]
    fn test_parse_detail_response() {
        let body = r#"{
            "Title": "Test Movie", "Year": "2022", "Rated": "PG-13", "Released": "01 Jan 2022",
            "Runtime": "120 min", "Genre": "Drama", "Director": "Jane Doe", "Writer": "John Doe",
            "Actors": "A. Actor, B. Actor", "Plot": "A test plot.", "Language": "English",
            "Country": "USA", "Awards": "N/A", "Poster": "N/A",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "7.5/10"},
                {"Source": "Rotten Tomatoes", "Value": "88%"}
            ],
            "imdbRating": "7.5", "imdbVotes": "1,000", "imdbID": "tt001", "Type": "movie",
            "Response": "True"
        }"#;

        let detail = parse_detail_response(body).unwrap();
        assert_eq!(detail.id, "tt001");
        assert_eq!(detail.director, "Jane Doe");
        assert_eq!(detail.cast, "A. Actor, B. Actor");
        assert_eq!(detail.catalog_rating, "7.5");
        assert_eq!(detail.source_ratings.len(), 2);
        assert_eq!(detail.source_ratings[1].source, "Rotten Tomatoes");
        assert_eq!(detail.poster_url, None);
    }

    #[test]
    fn test_parse_detail_response_negative_marker() {
        let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
        assert!(matches!(parse_detail_response(body), Err(CatalogError::DetailUnavailable(_))));
    }

    #[test]
    fn test_parse_detail_response_missing_fields() {
        let body = r#"{"Title": "Sparse", "imdbID": "tt009", "Type": "episode", "Response": "True"}"#;
        let detail = parse_detail_response(body).unwrap();
        assert_eq!(detail.kind, MediaKind::Episode);
        assert_eq!(detail.plot, "N/A");
        assert_eq!(detail.catalog_rating, "N/A");
        assert!(detail.source_ratings.is_empty());
    }
}

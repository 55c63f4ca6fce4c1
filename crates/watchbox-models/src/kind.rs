use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of catalog entry, as reported by the catalog's `Type` field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
}

impl MediaKind {
    /// Value sent as the catalog's `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Episode => "episode",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "series" => Ok(MediaKind::Series),
            "episode" => Ok(MediaKind::Episode),
            other => Err(format!("Unknown media kind: {}", other)),
        }
    }
}

/// Type filter chosen by the user: any kind, or exactly one
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    Any,
    Movie,
    Series,
    Episode,
}

impl KindFilter {
    /// The constraint forwarded to the catalog, `None` for `Any`
    pub fn as_kind(&self) -> Option<MediaKind> {
        match self {
            KindFilter::Any => None,
            KindFilter::Movie => Some(MediaKind::Movie),
            KindFilter::Series => Some(MediaKind::Series),
            KindFilter::Episode => Some(MediaKind::Episode),
        }
    }

    pub fn all() -> [KindFilter; 4] {
        [KindFilter::Any, KindFilter::Movie, KindFilter::Series, KindFilter::Episode]
    }

    pub fn label(&self) -> &'static str {
        match self {
            KindFilter::Any => "any",
            KindFilter::Movie => "movie",
            KindFilter::Series => "series",
            KindFilter::Episode => "episode",
        }
    }
}

impl From<MediaKind> for KindFilter {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => KindFilter::Movie,
            MediaKind::Series => KindFilter::Series,
            MediaKind::Episode => KindFilter::Episode,
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "" => Ok(KindFilter::Any),
            other => other.parse::<MediaKind>().map(KindFilter::from),
        }
    }
}

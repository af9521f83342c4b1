//! Shared record types used across kinofetch.
//! Includes the two upstream shapes (`RawCandidate`, `RawDetail`), the
//! `RawRecord` union fed to the normalizer, the placeholder-complete
//! `CanonicalRecord`, and the `Scalar` value used for mixed number/text fields.
use serde::{Deserialize, Serialize};

/// Sentinel for any unknown scalar or list entry.
pub const UNKNOWN: &str = "Неизвестно";
/// Sentinel for a missing or zero rating.
pub const NO_RATING: &str = "Нет рейтинга";
/// Sentinel for an empty actors or directors list.
pub const NO_PERSONS: &str = "Информация недоступна";
/// Sentinel for a missing description.
pub const NO_DESCRIPTION: &str = "Описание недоступно";
/// Sentinel for a missing poster URL.
pub const NO_POSTER: &str = "Нет постера";

/// A number or a piece of text. Upstream sends some fields (age rating) as
/// either, and placeholders turn numeric fields into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(i64),
    Text(String),
}

impl Scalar {
    pub fn text(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Scalar::Text(s) if s == UNKNOWN)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub kp: Option<f64>,
    pub imdb: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    pub url: Option<String>,
    pub preview_url: Option<String>,
}

/// A `{ "name": ... }` entry from the genres or countries lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedEntry {
    pub name: Option<String>,
}

/// A credited person. `en_profession` is an open set ("actor", "director",
/// "producer", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub en_name: Option<String>,
    pub en_profession: Option<String>,
}

/// One entry of a search response (`docs[]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub alternative_name: Option<String>,
    #[serde(default, deserialize_with = "loose_integer")]
    pub year: Option<i64>,
    pub rating: Option<Rating>,
}

impl RawCandidate {
    pub fn rating_kp(&self) -> Option<f64> {
        self.rating.as_ref().and_then(|r| r.kp)
    }
}

/// Fields only the detail endpoint returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailFields {
    pub description: Option<String>,
    #[serde(default, deserialize_with = "loose_integer")]
    pub movie_length: Option<i64>,
    #[serde(default, deserialize_with = "loose_scalar")]
    pub age_rating: Option<Scalar>,
    pub poster: Option<Poster>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<NamedEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub countries: Vec<NamedEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub persons: Vec<Person>,
}

/// Full detail response: everything a candidate carries plus `DetailFields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDetail {
    #[serde(flatten)]
    pub candidate: RawCandidate,
    #[serde(flatten)]
    pub fields: DetailFields,
}

impl From<RawCandidate> for RawDetail {
    fn from(candidate: RawCandidate) -> Self {
        Self {
            candidate,
            fields: DetailFields::default(),
        }
    }
}

/// Either upstream shape, as accepted by [`crate::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Candidate(RawCandidate),
    Detail(RawDetail),
}

/// The normalized output record. Every field always holds a value; absent
/// source data is replaced by one of the placeholder constants.
///
/// Field order here is the key order of the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub name: String,
    pub original_name: String,
    pub year: Scalar,
    pub rating: String,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
    pub description: String,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
    pub runtime_minutes: Scalar,
    pub age_rating: Scalar,
    pub poster_url: String,
}

/// Where a canonical record came from.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RecordSource {
    Detail,
    /// Detail fetch failed or was impossible; built from the search candidate.
    Candidate,
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::Detail => write!(f, "detail"),
            RecordSource::Candidate => write!(f, "candidate"),
        }
    }
}

/// A `null` list reads as empty and `null` entries inside it are skipped.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<Option<T>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect())
}

/// Any JSON value that may stand for a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(#[allow(dead_code)] serde::de::IgnoredAny),
}

impl LooseNumber {
    fn as_integer(&self) -> Option<i64> {
        match self {
            LooseNumber::Int(n) => Some(*n),
            LooseNumber::Float(f) if f.is_finite() => Some(f.round() as i64),
            LooseNumber::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Integers also arrive as `148.0` or `"2010"`; anything unreadable is absent.
fn loose_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<LooseNumber>::deserialize(deserializer)?.and_then(|n| n.as_integer()))
}

fn loose_scalar<'de, D>(deserializer: D) -> std::result::Result<Option<Scalar>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<LooseNumber>::deserialize(deserializer)? {
        Some(LooseNumber::Text(s)) => Some(Scalar::Text(s)),
        Some(other) => other.as_integer().map(Scalar::Number),
        None => None,
    })
}

//! Record normalizer: flattens either upstream shape into a `CanonicalRecord`.
//! Total by construction: every field has a defined fallback.
use crate::types::{
    CanonicalRecord, DetailFields, NO_DESCRIPTION, NO_PERSONS, NO_POSTER, NO_RATING, NamedEntry,
    Person, RawCandidate, RawDetail, RawRecord, Scalar, UNKNOWN,
};

pub const MAX_ACTORS: usize = 10;

const ACTOR: &str = "actor";
const DIRECTOR: &str = "director";
const NULL_MARKER: &str = "null";

pub fn normalize(raw: &RawRecord) -> CanonicalRecord {
    match raw {
        RawRecord::Candidate(candidate) => normalize_candidate(candidate),
        RawRecord::Detail(detail) => normalize_detail(detail),
    }
}

/// Fallback path: detail-only fields all resolve to placeholders.
pub fn normalize_candidate(candidate: &RawCandidate) -> CanonicalRecord {
    build(candidate, &DetailFields::default())
}

pub fn normalize_detail(detail: &RawDetail) -> CanonicalRecord {
    build(&detail.candidate, &detail.fields)
}

fn build(base: &RawCandidate, fields: &DetailFields) -> CanonicalRecord {
    CanonicalRecord {
        name: text_or(base.name.as_deref(), UNKNOWN),
        original_name: text_or(base.alternative_name.as_deref(), UNKNOWN),
        year: number_or_unknown(base.year),
        rating: format_rating(base.rating_kp()),
        genres: names_or_unknown(&fields.genres),
        countries: names_or_unknown(&fields.countries),
        description: description(fields.description.as_deref()),
        actors: persons_with_profession(&fields.persons, ACTOR, Some(MAX_ACTORS)),
        directors: persons_with_profession(&fields.persons, DIRECTOR, None),
        runtime_minutes: number_or_unknown(fields.movie_length),
        age_rating: match &fields.age_rating {
            Some(Scalar::Text(s)) if s.is_empty() => Scalar::text(UNKNOWN),
            Some(value) => value.clone(),
            None => Scalar::text(UNKNOWN),
        },
        poster_url: text_or(
            fields.poster.as_ref().and_then(|p| p.url.as_deref()),
            NO_POSTER,
        ),
    }
}

/// A rating of exactly zero is upstream's "unrated" marker, so only strictly
/// positive values are kept. `{:.1}` rounds the exact binary value with ties
/// to even, so `2.25` prints as `2.2`.
pub fn format_rating(kp: Option<f64>) -> String {
    match kp {
        Some(r) if r > 0.0 => format!("{:.1}", r),
        _ => NO_RATING.to_string(),
    }
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => placeholder.to_string(),
    }
}

fn number_or_unknown(value: Option<i64>) -> Scalar {
    value.map_or_else(|| Scalar::text(UNKNOWN), Scalar::Number)
}

fn description(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() && s != NULL_MARKER => s.to_string(),
        _ => NO_DESCRIPTION.to_string(),
    }
}

fn names_or_unknown(entries: &[NamedEntry]) -> Vec<String> {
    let names: Vec<String> = entries
        .iter()
        .filter_map(|e| e.name.as_deref())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        vec![UNKNOWN.to_string()]
    } else {
        names
    }
}

fn persons_with_profession(persons: &[Person], profession: &str, cap: Option<usize>) -> Vec<String> {
    let matching = persons
        .iter()
        .filter(|p| p.en_profession.as_deref() == Some(profession))
        .filter_map(|p| p.name.as_deref())
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let names: Vec<String> = match cap {
        Some(limit) => matching.take(limit).collect(),
        None => matching.collect(),
    };

    if names.is_empty() {
        vec![NO_PERSONS.to_string()]
    } else {
        names
    }
}

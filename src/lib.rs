#![doc = r#"
KINOFETCH — look up a title on Kinopoisk and export its metadata.

This crate wraps the kinopoisk.dev REST API in a small, typed pipeline:
search by name, pick one match (automatically when there is exactly one),
fetch the full record, flatten it into a placeholder-complete
`CanonicalRecord`, and write it out as JSON and CSV. It powers the `kinofetch`
CLI and can be embedded in your own Rust applications.

Quick start: one query, no console
----------------------------------
```rust,no_run
use std::path::Path;
use kinofetch::{
    ClientConfig, KinopoiskClient, QueryOutcome, RawCandidate,
    core::select::Chooser, export_record, fetch_record,
};

/// Always takes the first match.
struct First;

impl Chooser for First {
    fn choose(&mut self, _candidates: &[RawCandidate]) -> Option<String> {
        Some("1".to_string())
    }
}

fn main() -> kinofetch::Result<()> {
    let config = ClientConfig {
        api_key: std::env::var("KINOPOISK_API_KEY").unwrap_or_default(),
        ..ClientConfig::default()
    };
    config.validate()?;
    let client = KinopoiskClient::new(&config);

    if let QueryOutcome::Record { record, .. } = fetch_record(&client, &mut First, "Inception", 5) {
        let report = export_record(&record, Path::new("."), "Inception");
        println!("json={:?} csv={:?}", report.json, report.csv);
    }
    Ok(())
}
```

Normalizing records you already have
------------------------------------
```rust
use kinofetch::{RawCandidate, RawRecord, normalize, types::NO_DESCRIPTION};

let candidate = RawCandidate {
    id: Some(1),
    name: Some("Брат".to_string()),
    ..RawCandidate::default()
};
let record = normalize(&RawRecord::Candidate(candidate));
assert_eq!(record.name, "Брат");
assert_eq!(record.description, NO_DESCRIPTION);
```

Error handling
--------------
Fallible functions return `kinofetch::Result<T>`. `Error::kind()` folds the
variants into a `FailureKind` (transport, auth, rate limit, upstream, not found,
invalid selection, export).

Useful modules
--------------
- [`api`] — per-query pipeline, export step and session driver.
- [`core`] — normalizer, selection resolver and parameters.
- [`io`] — catalog client, file naming and writers.
- [`types`] — raw and canonical record types, placeholder constants.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::normalize::{normalize, normalize_candidate, normalize_detail};
pub use crate::core::params::{ClientConfig, SessionParams, Settings};
pub use crate::core::select::{Resolution, SearchOutcome, SelectionResolver, SelectionState};
pub use crate::error::{Error, FailureKind, Result};
pub use crate::types::{CanonicalRecord, RawCandidate, RawDetail, RawRecord, RecordSource, Scalar};

pub use crate::io::catalog::{CatalogSource, KinopoiskClient};
pub use crate::io::writers::{csv::render_csv, json::render_json};

pub use crate::api::{
    ExportReport, QueryOutcome, SessionReport, export_record, fetch_record, handle_query,
    run_queries, run_session,
};

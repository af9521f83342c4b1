//! I/O layer: the remote catalog client, output file naming, and `writers`
//! for the JSON and CSV exports.
pub mod catalog;
pub use catalog::{CatalogSource, KinopoiskClient};

pub mod naming;

pub mod writers;

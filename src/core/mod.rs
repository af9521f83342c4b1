//! Core building blocks: client/session parameters, the record normalizer and
//! the selection resolver. These are pure primitives consumed by the
//! high-level `api` module.
pub mod normalize;
pub mod params;
pub mod select;

#![forbid(unsafe_code)]

//! Extracts series and universe metadata from danMARC2 bibliographic
//! records and emits it as a framed stream of JSON objects, one object
//! per series relationship.
//!
//! Field 530 carries series data and may repeat; each occurrence
//! produces its own output object.  Field 534 carries universe data at
//! the record level and is copied into every object derived from the
//! same record.

pub use self::extract::extract;
pub use self::extract::work_id;
pub use self::extract::WORK_ID_NAMESPACE;
pub use self::registry::SeriesRegistry;
pub use self::stream::SeriesStream;

pub mod extract;
pub mod registry;
pub mod stream;

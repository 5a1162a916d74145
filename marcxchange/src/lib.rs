#![forbid(unsafe_code)]

//! Tools for reading and writing bibliographic records in the
//! MarcXchange XML interchange format, as used by danMARC2 records.
//!
//! Unlike MARC21, danMARC2 records carry their data -- including the
//! record identifier in tag 001 -- in data fields with subfields, so
//! this crate places no numeric range restriction on data field tags.

pub use self::record::Controlfield;
pub use self::record::Field;
pub use self::record::Record;
pub use self::record::Subfield;
pub use self::xml::MARCXCHANGE_NAMESPACE;

pub mod record;
pub mod xml;

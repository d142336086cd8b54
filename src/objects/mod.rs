//! Device hierarchy types.
//!
//! A `.pdsc` file groups parts as family → sub-family → device. The picker
//! only cares about the last two levels:
//!
//! - [`SubFamily`] - a named group of related devices
//! - [`Device`] - a single part with its description
//! - [`SubFamilies`] - every sub-family of a document, in document order

mod device;

pub use device::{Device, SubFamilies, SubFamily, NO_DESCRIPTION};

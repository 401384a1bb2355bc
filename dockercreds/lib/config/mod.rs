//! Locating, reading and parsing the docker config.

mod document;
mod path;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use document::*;
pub use path::*;

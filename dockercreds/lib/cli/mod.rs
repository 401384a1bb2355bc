//! Command-line interface for the `dockercreds` binary.

mod args;
pub mod styles;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use args::*;
pub use styles::AnsiStyles;

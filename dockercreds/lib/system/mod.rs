//! Host capabilities the resolver depends on: file access, process execution and the environment.
//!
//! Each capability is a trait so the resolution logic can be exercised against fakes. The `Local*`
//! types are the OS-backed implementations wired up by [`CredsProvider::new`](crate::CredsProvider::new).

mod env;
mod fs;
mod process;
mod traits;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use env::*;
pub use fs::*;
pub use process::*;
pub use traits::*;

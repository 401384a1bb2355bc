use super::styles;
use clap::Parser;

//-------------------------------------------------------------------------------------------------
// Types
//-------------------------------------------------------------------------------------------------

/// dockercreds - Resolve container registry credentials from the local docker config
#[derive(Debug, Parser)]
#[command(name = "dockercreds", author, about, version, styles=styles::styles())]
pub struct DockerCredsArgs {
    /// The subcommand to run
    #[command(subcommand)]
    pub subcommand: DockerCredsSubcommand,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Debug, Parser)]
pub enum DockerCredsSubcommand {
    /// Print the credentials for a registry as a credential helper would
    #[command(name = "get")]
    Get {
        /// Registry host, e.g. `ghcr.io`
        #[arg(required = true)]
        registry: String,
    },

    /// Print the path of the docker config that would be read
    #[command(name = "config-path")]
    ConfigPath,

    /// Print where an executable resolves on the search path
    #[command(name = "locate")]
    Locate {
        /// Executable name, e.g. `docker-credential-desktop`
        #[arg(required = true)]
        name: String,
    },
}

//-------------------------------------------------------------------------------------------------
// Tests
//-------------------------------------------------------------------------------------------------

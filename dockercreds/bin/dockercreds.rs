use clap::Parser;
use dockercreds::{
    cli::{AnsiStyles, DockerCredsArgs, DockerCredsSubcommand},
    CredsProvider, DockerCredsResult,
};
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions: main
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> DockerCredsResult<()> {
    let args = DockerCredsArgs::parse();
    init_tracing(args.verbose);

    let provider = CredsProvider::new();
    match args.subcommand {
        DockerCredsSubcommand::Get { registry } => {
            let creds = provider.get_credentials(&registry).await?;
            println!("{}", creds.to_helper_json());
        }
        DockerCredsSubcommand::ConfigPath => {
            println!("{}", provider.config_path()?.display());
        }
        DockerCredsSubcommand::Locate { name } => match provider.locate(&name).await {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!(
                    "{} {} was not found on the search path",
                    "error:".error(),
                    name.as_str().literal()
                );
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dockercreds=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

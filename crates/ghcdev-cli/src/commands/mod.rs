//! Command implementations.

mod doctor;
mod init;
mod install;
mod list;
mod options;
mod select;
mod tags;

use crate::cli::{Cli, Commands};
use anyhow::Result;
use ghcdev_registry::{MetadataStore, RegistryPaths, VersionRegistry};
use ghcdev_ui::Output;

/// Everything an initialized-registry command needs.
pub(crate) struct Context {
    pub paths: RegistryPaths,
    pub registry: VersionRegistry,
    pub store: MetadataStore,
}

/// Resolve the registry root and require it to be initialized.
fn open_initialized() -> ghcdev_core::Result<Context> {
    let paths = RegistryPaths::resolve_default()?;
    if !paths.is_initialized() {
        return Err(ghcdev_core::Error::not_initialized(paths.root()));
    }
    Ok(Context {
        registry: VersionRegistry::new(paths.clone()),
        store: MetadataStore::new(paths.clone()),
        paths,
    })
}

/// Run the CLI command.
pub async fn run(cli: Cli) -> Result<i32> {
    if cli.global.no_color || ghcdev_core::env::no_color() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let output = Output::from_flags(cli.global.quiet, cli.global.verbose);

    let result = match cli.command {
        Some(Commands::Init) => init::run(&output),
        Some(Commands::Install {
            reference,
            skip_checks,
        }) => install::run(&reference, skip_checks, &output).await,
        Some(Commands::Select { reference }) => select::run(&reference, &output),
        Some(Commands::Path { reference }) => select::path(&reference),
        Some(Commands::List) => list::run(&output),
        Some(Commands::Current) => select::current(&output),
        Some(Commands::UpdateTags) => tags::run(&output).await,
        Some(Commands::SetOption { key, value }) => options::set(&key, &value, &output),
        Some(Commands::ShowOptions) => options::show(&output),
        Some(Commands::Doctor) => doctor::run(&output).await,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(0);
        }
    };

    match result {
        Ok(code) => Ok(code),
        Err(err) => {
            output.print_error(&err);
            Ok(1)
        }
    }
}

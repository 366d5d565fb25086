//! Two-step pipeline: finalize the registry, then build the grammar and
//! dispatch the selected downloader.

use std::env;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, info};

use mldata_lib::{Config, Error, Result};

use crate::builtin;
use crate::extract::extract_extra;
use crate::registry::{DownloadRequest, Providers, Registry};

/// Guidance reported when a dataset's files lack a default download URL.
pub const URL_PREFIX_MESSAGE: &str = "Some files for this dataset do not have a download URL.

Provide a URL prefix with --url-prefix to prepend to the filenames,
e.g. http://path.to/files/";

/// Step one: assemble the final downloader registry.
///
/// Starts from the built-in set, merges configuration-supplied registries in
/// order, then merges the registry named by `--extra` (extracted from `args`)
/// last. Duplicate dataset names across any of the sources are fatal.
pub fn finalize_registry(
    config: &Config,
    providers: &Providers,
    args: &mut Vec<String>,
) -> Result<Registry> {
    let mut registry = builtin::registry();

    for name in &config.extra_downloaders {
        debug!(registry = %name, "merging configured extra registry");
        registry.merge(providers.resolve(name)?)?;
    }

    if let Some(name) = extract_extra(args) {
        debug!(registry = %name, "merging extra registry from the command line");
        registry.merge(providers.resolve(&name)?)?;
    }

    Ok(registry)
}

/// Step two: build the command grammar from the finalized registry.
///
/// Every dataset becomes a subcommand carrying the shared flags, plus
/// whatever its configurator installs. The top-level `--extra` is declared
/// here as well so that help lists it and a dangling `--extra` surfaces as a
/// normal usage error.
pub fn build_command(registry: &Registry) -> Command {
    let default_directory = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut command = Command::new("mldata-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Download script for built-in datasets.")
        .arg(
            Arg::new("extra")
                .long("extra")
                .value_name("REGISTRY")
                .help("merge an extra downloader registry before parsing"),
        );

    for (name, downloader) in registry.iter() {
        let subcommand = Command::new(name.clone())
            .about(format!("Download the {name} dataset"))
            .long_about(downloader.about)
            .arg(
                Arg::new("directory")
                    .short('d')
                    .long("directory")
                    .value_name("DIR")
                    .default_value(default_directory.clone().into_os_string())
                    .help("where to save the downloaded files"),
            )
            .arg(
                Arg::new("clear")
                    .long("clear")
                    .action(ArgAction::SetTrue)
                    .help("clear the downloaded files"),
            );
        command = command.subcommand((downloader.configure)(subcommand));
    }

    command
}

/// Resolve the selected subcommand and invoke its download routine.
///
/// With no subcommand selected this prints usage and returns cleanly. A
/// downloader that reports [`Error::NeedUrlPrefix`] is turned into a parser
/// error with fixed guidance text (non-zero exit); every other error
/// propagates to the caller untouched.
pub fn dispatch(registry: &Registry, command: &mut Command, matches: &ArgMatches) -> Result<()> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        command.print_help()?;
        return Ok(());
    };

    let Some(downloader) = registry.get(name) else {
        // clap only accepts subcommands that were built from the registry.
        command.print_help()?;
        return Ok(());
    };

    let request = DownloadRequest::from_matches(sub_matches);
    info!(
        dataset = %name,
        directory = %request.directory.display(),
        clear = request.clear,
        "dispatching downloader"
    );

    match (downloader.run)(&request) {
        Err(Error::NeedUrlPrefix { .. }) => command
            .error(ErrorKind::MissingRequiredArgument, URL_PREFIX_MESSAGE)
            .exit(),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn configured_registries_merge_before_the_command_line_flag() {
        let config = Config {
            extra_downloaders: vec![builtin::EXTRAS_REGISTRY.to_string()],
        };
        let mut args = argv(&["celeba", "-d", "/tmp"]);

        let registry = finalize_registry(&config, builtin::providers(), &mut args)
            .expect("extras merge cleanly");

        assert!(registry.contains("celeba"));
        assert!(registry.contains("mnist"));
    }

    #[test]
    fn command_line_extra_merges_into_the_registry() {
        let config = Config::default();
        let mut args = argv(&["--extra", "extras", "dogs_vs_cats"]);

        let registry = finalize_registry(&config, builtin::providers(), &mut args)
            .expect("extras merge cleanly");

        assert!(registry.contains("dogs_vs_cats"));
        assert_eq!(args, argv(&["dogs_vs_cats"]));
    }

    #[test]
    fn the_same_registry_from_config_and_flag_is_a_conflict() {
        let config = Config {
            extra_downloaders: vec![builtin::EXTRAS_REGISTRY.to_string()],
        };
        let mut args = argv(&["--extra", "extras"]);

        let error = finalize_registry(&config, builtin::providers(), &mut args)
            .expect_err("duplicate registries must conflict");
        assert!(matches!(error, Error::DuplicateDownloader { .. }));
    }

    #[test]
    fn unknown_registry_name_is_fatal() {
        let config = Config::default();
        let mut args = argv(&["--extra", "nope"]);

        let error = finalize_registry(&config, builtin::providers(), &mut args)
            .expect_err("unknown registry must fail");
        assert!(matches!(error, Error::UnknownRegistry { ref name, .. } if name == "nope"));
    }

    #[test]
    fn grammar_has_one_subcommand_per_registry_entry() {
        let registry = builtin::registry();
        let command = build_command(&registry);

        let subcommands: Vec<_> = command
            .get_subcommands()
            .map(|sub| sub.get_name().to_string())
            .collect();
        assert_eq!(subcommands.len(), registry.len());
        for name in registry.names() {
            assert!(subcommands.iter().any(|sub| sub == name));
        }
    }

    #[test]
    fn shared_flags_parse_with_defaults() {
        let registry = builtin::registry();
        let matches = build_command(&registry)
            .try_get_matches_from(["mldata-cli", "mnist"])
            .expect("bare subcommand parses");

        let (name, sub_matches) = matches.subcommand().expect("subcommand selected");
        assert_eq!(name, "mnist");
        let request = DownloadRequest::from_matches(sub_matches);
        assert!(!request.clear);
        assert_eq!(request.directory, env::current_dir().unwrap());
    }

    #[test]
    fn shared_flags_override_the_defaults() {
        let registry = builtin::registry();
        let matches = build_command(&registry)
            .try_get_matches_from(["mldata-cli", "mnist", "-d", "/tmp/data", "--clear"])
            .expect("flags parse");

        let (_, sub_matches) = matches.subcommand().expect("subcommand selected");
        let request = DownloadRequest::from_matches(sub_matches);
        assert!(request.clear);
        assert_eq!(request.directory, PathBuf::from("/tmp/data"));
    }

    #[test]
    fn configurator_flags_are_installed_on_their_subcommand_only() {
        let registry = builtin::registry();
        let command = build_command(&registry);

        let matches = command
            .clone()
            .try_get_matches_from([
                "mldata-cli",
                "ilsvrc2010",
                "--url-prefix",
                "http://mirror.example/",
            ])
            .expect("url prefix parses");
        let (_, sub_matches) = matches.subcommand().expect("subcommand selected");
        let request = DownloadRequest::from_matches(sub_matches);
        assert_eq!(request.url_prefix(), Some("http://mirror.example/"));

        command
            .clone()
            .try_get_matches_from(["mldata-cli", "mnist", "--url-prefix", "x"])
            .expect_err("mnist has no --url-prefix flag");
    }

    #[test]
    fn dangling_extra_is_a_usage_error_in_the_main_parser() {
        let registry = builtin::registry();
        let error = build_command(&registry)
            .try_get_matches_from(["mldata-cli", "--extra"])
            .expect_err("missing value is a usage error");
        assert_eq!(error.kind(), ErrorKind::InvalidValue);
    }
}

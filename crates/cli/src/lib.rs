#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the thin command-line front-end for the `clonesync`
//! workspace. It recognises four subcommands (`add`, `sync`, `remove`,
//! `list`) plus a handful of global flags, loads the persisted
//! [`settings`] for the selected master project, and delegates the
//! actual work to the [`mirror`] engine. The front-end stays thin on
//! purpose: path selection, rule persistence, and result reporting live
//! here; everything with algorithmic content lives in the engine.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function
//! accepts an iterator of arguments together with handles for standard
//! output and error, so tests can drive the whole front-end without
//! spawning a process. Internally a [`clap`](https://docs.rs/clap/)
//! command definition performs the parse; subcommand handlers then load
//! settings, build the exclusion set, and invoke the engine.
//!
//! # Invariants
//!
//! - [`run`] never panics; unexpected failures surface as non-zero exit
//!   codes with a diagnostic on the error handle.
//! - A failing clone inside `sync --all` never stops the remaining
//!   clones; the batch reports every failure at the end.
//! - Registration changes are persisted only after the work they imply
//!   has succeeded (an `add` that fails to mirror leaves the clone list
//!   untouched).
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let code = cli::run(["clonesync", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(code, 0);
//! assert!(!stdout.is_empty());
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, error::ErrorKind, value_parser};
use exclusions::{ExclusionRule, ExclusionSet};
use mirror::project::{FolderSelection, sync_all_clones, sync_clone};
use settings::{CloneProject, SETTINGS_FILE_NAME, SyncSettings};
use tracing_subscriber::EnvFilter;

/// Successful completion.
pub const EXIT_OK: i32 = 0;
/// Syntax, usage, or configuration error.
pub const EXIT_USAGE: i32 = 1;
/// Error in file I/O while mirroring.
pub const EXIT_FILE_IO: i32 = 11;
/// Some, but not all, clones synchronized.
pub const EXIT_PARTIAL: i32 = 23;

/// Parses `args` and executes the requested subcommand.
///
/// Returns the process exit code. Diagnostics go to `stderr`; regular
/// output (listings, summaries, help, version) goes to `stdout`.
pub fn run<Args, T>(args: Args, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32
where
    Args: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => {
            let rendered = error.render();
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(stdout, "{rendered}");
                    EXIT_OK
                }
                _ => {
                    let _ = write!(stderr, "{rendered}");
                    EXIT_USAGE
                }
            };
        }
    };

    init_tracing(
        matches.get_count("verbose"),
        matches.get_flag("quiet"),
    );

    let master = matches
        .get_one::<PathBuf>("master")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| master.join(SETTINGS_FILE_NAME));
    let extra_excludes: Vec<String> = matches
        .get_many::<String>("exclude")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let ctx = Context {
        master,
        config_path,
        extra_excludes,
    };

    match matches.subcommand() {
        Some(("add", sub)) => run_add(&ctx, sub, stdout, stderr),
        Some(("sync", sub)) => run_sync(&ctx, sub, stdout, stderr),
        Some(("remove", sub)) => run_remove(&ctx, sub, stdout, stderr),
        Some(("list", _)) => run_list(&ctx, stdout, stderr),
        _ => EXIT_USAGE,
    }
}

struct Context {
    master: PathBuf,
    config_path: PathBuf,
    extra_excludes: Vec<String>,
}

impl Context {
    fn load_settings(&self, stderr: &mut dyn Write) -> Option<SyncSettings> {
        match SyncSettings::load(&self.config_path) {
            Ok(settings) => Some(settings),
            Err(error) => {
                let _ = writeln!(stderr, "clonesync: {error}");
                None
            }
        }
    }

    fn save_settings(&self, settings: &SyncSettings, stderr: &mut dyn Write) -> bool {
        match settings.save(&self.config_path) {
            Ok(()) => true,
            Err(error) => {
                let _ = writeln!(stderr, "clonesync: {error}");
                false
            }
        }
    }

    fn exclusion_set(&self, settings: &SyncSettings) -> ExclusionSet {
        settings
            .exclusions
            .iter()
            .cloned()
            .chain(self.extra_excludes.iter().map(ExclusionRule::new))
            .collect()
    }
}

fn command() -> Command {
    Command::new("clonesync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keeps cloned project working trees synchronized with a master copy")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("master")
                .long("master")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value(".")
                .global(true)
                .help("Root directory of the master project"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("Settings file (defaults to clonesync.json under the master)"),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("FRAGMENT")
                .action(ArgAction::Append)
                .global(true)
                .help("Additional exclusion fragment for this invocation"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (repeatable)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .conflicts_with("verbose")
                .help("Only log errors"),
        )
        .subcommand(
            Command::new("add")
                .about("Register a clone and give it a full initial copy")
                .arg(
                    Arg::new("path")
                        .value_name("DIR")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Root directory for the new clone"),
                )
                .arg(
                    Arg::new("platform")
                        .long("platform")
                        .value_name("NAME")
                        .help("Build-target platform label stored with the clone"),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Synchronize registered clones with the master")
                .arg(
                    Arg::new("paths")
                        .value_name("DIR")
                        .num_args(0..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Clone roots to synchronize"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("paths")
                        .help("Synchronize every registered clone"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Drop a clone from the list (its directory stays on disk)")
                .arg(
                    Arg::new("path")
                        .value_name("DIR")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Root directory of the clone to drop"),
                ),
        )
        .subcommand(Command::new("list").about("List the registered clones"))
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_add(
    ctx: &Context,
    sub: &clap::ArgMatches,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    let Some(mut settings) = ctx.load_settings(stderr) else {
        return EXIT_USAGE;
    };
    let path = sub
        .get_one::<PathBuf>("path")
        .cloned()
        .unwrap_or_default();
    let platform = sub.get_one::<String>("platform").cloned();

    let clone = CloneProject {
        path: path.clone(),
        platform,
    };
    if let Err(error) = settings.add_clone(&ctx.master, clone) {
        let _ = writeln!(stderr, "clonesync: {error}");
        return EXIT_USAGE;
    }

    // A fresh clone always receives all four folders, whatever the
    // routine selection says.
    let exclusions = ctx.exclusion_set(&settings);
    match sync_clone(&ctx.master, &path, &FolderSelection::all(), &exclusions) {
        Ok(stats) => {
            if !ctx.save_settings(&settings, stderr) {
                return EXIT_USAGE;
            }
            let _ = writeln!(
                stdout,
                "cloned project to '{}' ({} files copied)",
                path.display(),
                stats.files_copied
            );
            EXIT_OK
        }
        Err(error) => {
            // Nothing was saved, so the failed clone stays unregistered.
            let _ = writeln!(stderr, "clonesync: {error}");
            EXIT_FILE_IO
        }
    }
}

fn run_sync(
    ctx: &Context,
    sub: &clap::ArgMatches,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    let Some(settings) = ctx.load_settings(stderr) else {
        return EXIT_USAGE;
    };

    let targets: Vec<PathBuf> = if sub.get_flag("all") {
        settings.clones.iter().map(|c| c.path.clone()).collect()
    } else {
        let requested: Vec<PathBuf> = sub
            .get_many::<PathBuf>("paths")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        for path in &requested {
            if !settings.clones.iter().any(|c| &c.path == path) {
                let _ = writeln!(
                    stderr,
                    "clonesync: '{}' is not a registered clone",
                    path.display()
                );
                return EXIT_USAGE;
            }
        }
        requested
    };

    if targets.is_empty() {
        let _ = writeln!(stderr, "clonesync: no clones to synchronize");
        return EXIT_USAGE;
    }

    let exclusions = ctx.exclusion_set(&settings);
    let outcome = sync_all_clones(&ctx.master, &targets, &settings.folders, &exclusions);

    for failure in &outcome.failures {
        let _ = writeln!(
            stderr,
            "clonesync: '{}': {}",
            failure.clone.display(),
            failure.error
        );
    }
    let _ = writeln!(
        stdout,
        "synchronized {} of {} clone(s): {} copied, {} deleted",
        outcome.succeeded,
        targets.len(),
        outcome.stats.files_copied,
        outcome.stats.files_deleted + outcome.stats.dirs_deleted
    );

    if outcome.is_success() {
        EXIT_OK
    } else if outcome.succeeded > 0 {
        EXIT_PARTIAL
    } else {
        EXIT_FILE_IO
    }
}

fn run_remove(
    ctx: &Context,
    sub: &clap::ArgMatches,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    let Some(mut settings) = ctx.load_settings(stderr) else {
        return EXIT_USAGE;
    };
    let path = sub
        .get_one::<PathBuf>("path")
        .cloned()
        .unwrap_or_default();

    if !settings.remove_clone(&path) {
        let _ = writeln!(
            stderr,
            "clonesync: '{}' is not a registered clone",
            path.display()
        );
        return EXIT_USAGE;
    }
    if !ctx.save_settings(&settings, stderr) {
        return EXIT_USAGE;
    }
    let _ = writeln!(
        stdout,
        "removed '{}' from the clone list; the directory and its contents remain on disk",
        path.display()
    );
    EXIT_OK
}

fn run_list(ctx: &Context, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32 {
    let Some(settings) = ctx.load_settings(stderr) else {
        return EXIT_USAGE;
    };
    if settings.clones.is_empty() {
        let _ = writeln!(stdout, "no clones registered");
        return EXIT_OK;
    }
    for clone in &settings.clones {
        let platform = clone.platform.as_deref().unwrap_or("current platform");
        let _ = writeln!(stdout, "{}\t{}", clone.path.display(), platform);
    }
    EXIT_OK
}

// LogHook - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Config loading (platform config.toml or --config FILE)
// 4. Emitting one call through the console or the facade

use clap::Parser;
use loghook::app::singleton;
use loghook::core::hooks::HostEvents;
use loghook::core::model::{Arg, Level};
use loghook::platform::config::{self, AppConfig, PlatformPaths};
use loghook::util;
use loghook::{Console, LogPrefix, PartialPatchConfig};
use std::path::PathBuf;

/// LogHook - route console output through a policy pipeline.
///
/// Emits MESSAGE at LEVEL. By default the call goes through the process
/// console, which is intercepted when patching is enabled; with --facade it
/// goes through the logger directly.
#[derive(Parser, Debug)]
#[command(name = "loghook", version, about)]
struct Cli {
    /// Level to emit at: log, info, error, debug, warn, trace.
    level: Level,

    /// Message words; each becomes one argument.
    #[arg(required = true)]
    message: Vec<String>,

    /// Config file to load instead of the platform config.toml.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Intercept every console level.
    #[arg(long = "patch-all")]
    patch_all: bool,

    /// Intercept one console level (repeatable).
    #[arg(long = "patch", value_name = "LEVEL")]
    patch: Vec<Level>,

    /// Allow a level in addition to those enabled by config (repeatable).
    #[arg(short = 'a', long = "allow", value_name = "LEVEL")]
    allow: Vec<Level>,

    /// Fixed prefix injected before every emitted call.
    #[arg(short = 'p', long = "prefix")]
    prefix: Option<String>,

    /// Call the logger facade instead of the console.
    #[arg(long = "facade")]
    facade: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Layer CLI flags over the loaded config.
fn apply_cli(mut config: AppConfig, cli: &Cli) -> AppConfig {
    for &level in &cli.allow {
        config.level_flags = config.level_flags.allow(level);
    }

    if cli.patch_all {
        config.features = config.features.global_patching(true);
    }
    if !cli.patch.is_empty() {
        let partial = cli
            .patch
            .iter()
            .fold(*config.features.partial_patch_config(), |p, &l| p.with(l));
        config.features = config.features.partial_patch(partial);
    }

    if let Some(ref prefix) = cli.prefix {
        config.prefix = Some(LogPrefix::fixed(prefix.clone()));
    }
    config
}

fn main() {
    let cli = Cli::parse();

    // Config is read before tracing is up so [logging] level can take part in
    // the filter; warnings are replayed once the subscriber exists.
    let (config, warnings) = match cli.config {
        Some(ref path) => match config::load_config_file(path) {
            Ok(config) => (config, Vec::new()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        },
        None => config::load_config(&PlatformPaths::resolve().config_dir),
    };

    util::logging::init(cli.debug, config.log_level.as_deref());
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogHook starting"
    );

    // Panics escaping the run are forwarded to the uncaught-exception
    // listeners when global error tracing is configured.
    HostEvents::global().run_main(|| emit(&cli, apply_cli(config, &cli)));
}

/// Build the process logger and emit one call.
fn emit(cli: &Cli, config: AppConfig) {
    let logger = singleton::get_instance(config.to_options().console(Console::global()));

    let args: Vec<Arg> = cli.message.iter().map(|w| Arg::String(w.clone())).collect();
    if cli.facade {
        logger.dispatch(cli.level, &args);
    } else {
        logger.console().call(cli.level, &args);
    }

    tracing::debug!(
        patched = logger.is_patched(),
        levels = ?logger.patched_levels(),
        "Call emitted"
    );

    logger.disable_monkey_patching();
    singleton::kill_instance();
}

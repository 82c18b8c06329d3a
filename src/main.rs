use tconn::{
    Result,
    args::{self, CliCommand, MainArgs},
    catalog::Catalog,
    config::{Settings, SettingsLoader, SourceWatcher},
    connections::LoadWarning,
    filter::SearchOptions,
    launcher::{self, DryRunLauncher, SystemLauncher},
    log::LOGGER,
    log_debug, log_error, log_info,
    template::{self, LaunchTarget},
    view,
};

use std::{
    env,
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};

fn main() -> Result<ExitCode> {
    let args = args::main_args();

    let config_dir = match &args.config_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir()?,
    };

    let settings = match SettingsLoader::new(args.settings.clone(), &config_dir).and_then(SettingsLoader::load_settings) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("❌ Failed to load settings: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.debug || settings.debug_mode {
        LOGGER.enable_debug();
        log_info!("Debug mode enabled");
    }
    log_debug!("Parsed arguments: {:?}", args);

    let exit_code = run(&args, &settings, config_dir);
    if let Err(err) = LOGGER.flush() {
        eprintln!("❌ Failed to flush debug log: {}", err);
    }
    exit_code
}

fn run(args: &MainArgs, settings: &Settings, config_dir: PathBuf) -> Result<ExitCode> {
    let sources = settings.sources(&config_dir, &args.files);
    let mut catalog = Catalog::new(sources, search_options(settings, &args.command));
    write_warnings(&mut io::stderr(), catalog.load())?;

    let mut stdout = io::stdout();
    let styled = stdout.is_terminal();

    match &args.command {
        CliCommand::List { json: true } => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(catalog.forest())?)?;
        }
        CliCommand::List { json: false } => {
            write!(stdout, "{}", view::render(&view::rows(&catalog), styled))?;
        }
        CliCommand::Search { query, json, .. } => {
            catalog.filter(query);
            if *json {
                let matches = catalog.matches().unwrap_or_default();
                writeln!(stdout, "{}", serde_json::to_string_pretty(matches)?)?;
            } else {
                write!(stdout, "{}", view::render(&view::rows(&catalog), styled))?;
            }
        }
        CliCommand::Command { target } => {
            let resolved = catalog.find_leaf(target).and_then(|leaf| template::resolve_target(leaf, &settings.templates()));
            match resolved {
                Ok(LaunchTarget::Command(line)) | Ok(LaunchTarget::Url(line)) => writeln!(stdout, "{}", line)?,
                Err(err) => {
                    log_error!("Unable to resolve '{}': {}", target, err);
                    eprintln!("❌ {}", err);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        CliCommand::Connect { target, dry_run } => {
            let templates = settings.templates();
            let result = catalog.find_leaf(target).and_then(|leaf| {
                if *dry_run {
                    launcher::connect(leaf, &templates, &DryRunLauncher)
                } else {
                    launcher::connect(leaf, &templates, &SystemLauncher)
                }
            });
            return match result {
                Ok(code) => Ok(code),
                Err(err) => {
                    log_error!("Launch of '{}' failed: {}", target, err);
                    eprintln!("❌ {}", err);
                    Ok(ExitCode::FAILURE)
                }
            };
        }
        CliCommand::Watch { query } => return watch(&mut catalog, query.as_deref(), styled),
    }

    Ok(ExitCode::SUCCESS)
}

/// `search --names` forces name matching on; otherwise the settings decide.
fn search_options(settings: &Settings, command: &CliCommand) -> SearchOptions {
    let mut options = settings.search_options();
    if let CliCommand::Search { names: true, .. } = command {
        options.match_names = true;
    }
    options
}

fn write_warnings<W: Write>(out: &mut W, warnings: &[LoadWarning]) -> io::Result<()> {
    for warning in warnings {
        writeln!(out, "warning: {}", warning)?;
    }
    Ok(())
}

fn watch(catalog: &mut Catalog, query: Option<&str>, styled: bool) -> Result<ExitCode> {
    if let Some(query) = query {
        catalog.filter(query);
    }

    let watcher = match SourceWatcher::new(catalog.sources()) {
        Ok(watcher) => watcher,
        Err(err) => {
            log_error!("Failed to start source watcher: {}", err);
            eprintln!("❌ Failed to watch connection files: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = io::stdout();
    loop {
        if styled {
            // Clear the screen and home the cursor before each listing.
            write!(stdout, "\x1b[2J\x1b[H")?;
        }
        write!(stdout, "{}", view::render(&view::rows(catalog), styled))?;
        stdout.flush()?;

        if !watcher.wait_for_change() {
            log_info!("Source watcher stopped");
            return Ok(ExitCode::SUCCESS);
        }

        log_info!("Connection sources changed, reloading");
        write_warnings(&mut io::stderr(), catalog.load())?;
    }
}

#[cfg(test)]
#[path = "test/main.rs"]
mod tests;

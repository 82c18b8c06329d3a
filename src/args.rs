use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::{ffi::OsString, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    List { json: bool },
    Search { query: String, names: bool, json: bool },
    Command { target: String },
    Connect { target: String, dry_run: bool },
    Watch { query: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainArgs {
    pub debug: bool,
    /// Directory holding `connections.yaml`; defaults to the current directory.
    pub config_dir: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    /// Extra connection files appended after the configured ones.
    pub files: Vec<PathBuf>,
    pub command: CliCommand,
}

fn target_arg() -> Arg {
    Arg::new("target")
        .help("Connection path (Group/Sub/Name) or unique connection name")
        .required(true)
}

fn json_arg() -> Arg {
    Arg::new("json").long("json").help("Print JSON instead of text").action(ArgAction::SetTrue)
}

pub fn build_cli_command() -> Command {
    Command::new("tconn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse a YAML tree of SSH, telnet and web targets and launch sessions from it.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config_dir")
                .short('C')
                .long("config-dir")
                .value_name("DIR")
                .help("Directory containing connections.yaml (default: current directory)")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .value_name("FILE")
                .help("Settings file to use instead of searching the default locations")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Additional connection file, loaded after the configured ones (repeatable)")
                .global(true)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(Command::new("list").about("Print the connection tree").arg(json_arg()))
        .subcommand(
            Command::new("search")
                .about("Print connections whose host or description matches a query")
                .arg(Arg::new("query").help("Case-insensitive text to look for").required(true))
                .arg(
                    Arg::new("names")
                        .long("names")
                        .help("Match connection names too")
                        .action(ArgAction::SetTrue),
                )
                .arg(json_arg()),
        )
        .subcommand(Command::new("command").about("Print the command or URL a connection launches").arg(target_arg()))
        .subcommand(
            Command::new("connect")
                .about("Launch a connection")
                .arg(target_arg())
                .arg(
                    Arg::new("dry_run")
                        .short('n')
                        .long("dry-run")
                        .help("Print the command instead of running it")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Print the listing again whenever a connection file changes")
                .arg(Arg::new("query").help("Optional search to keep applied")),
        )
}

fn string_arg(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn command_from_matches(matches: &ArgMatches) -> CliCommand {
    match matches.subcommand() {
        Some(("search", sub)) => CliCommand::Search {
            query: string_arg(sub, "query").unwrap_or_default(),
            names: sub.get_flag("names"),
            json: sub.get_flag("json"),
        },
        Some(("command", sub)) => CliCommand::Command {
            target: string_arg(sub, "target").unwrap_or_default(),
        },
        Some(("connect", sub)) => CliCommand::Connect {
            target: string_arg(sub, "target").unwrap_or_default(),
            dry_run: sub.get_flag("dry_run"),
        },
        Some(("watch", sub)) => CliCommand::Watch {
            query: string_arg(sub, "query"),
        },
        Some(("list", sub)) => CliCommand::List { json: sub.get_flag("json") },
        // `subcommand_required` keeps this unreachable in practice.
        _ => CliCommand::List { json: false },
    }
}

/// Parse an explicit argument list; used by `main_args` and by tests.
pub fn parse_main_args_from<I, T>(cmd: &Command, args: I) -> Result<MainArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = cmd.clone().try_get_matches_from(args)?;

    Ok(MainArgs {
        debug: matches.get_flag("debug"),
        config_dir: matches.get_one::<PathBuf>("config_dir").cloned(),
        settings: matches.get_one::<PathBuf>("settings").cloned(),
        files: matches.get_many::<PathBuf>("file").map(|vals| vals.cloned().collect()).unwrap_or_default(),
        command: command_from_matches(&matches),
    })
}

/// Parses command-line arguments using clap, exiting with usage on error.
pub fn main_args() -> MainArgs {
    parse_main_args_from(&build_cli_command(), std::env::args_os()).unwrap_or_else(|err| err.exit())
}

#[cfg(test)]
#[path = "test/args.rs"]
mod tests;

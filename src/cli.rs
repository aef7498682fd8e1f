// File: ./src/cli.rs
//! Command-line parsing and help text for the `eventguide` binary.
use crate::contact::ContactForm;
use crate::controller::CriteriaInput;
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DarkModeAction {
    Status,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show { events: Option<PathBuf> },
    Filter { input: CriteriaInput, events: Option<PathBuf> },
    Clear { events: Option<PathBuf> },
    Normalize(String),
    DarkMode(DarkModeAction),
    Contact(ContactForm),
    Scroll(u32),
}

/// Parsed command line: global options plus one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

/// Date controls accept `YYYY-MM-DD` or the empty string (no date).
fn parse_date_arg(value: &str) -> Result<String> {
    if value.is_empty() {
        return Ok(String::new());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid date '{}' (expected YYYY-MM-DD): {}", value, e))?;
    Ok(value.to_string())
}

fn take_value(args: &[String], i: usize, flag: &str) -> Result<String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| anyhow!("Missing value for {}", flag))
}

/// Parses arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut root = None;
    let mut verbose = false;
    let mut rest: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--root" => {
                root = Some(PathBuf::from(take_value(args, i, "--root")?));
                i += 2;
            }
            "-v" | "--verbose" => {
                verbose = true;
                i += 1;
            }
            _ => {
                rest.push(args[i].clone());
                i += 1;
            }
        }
    }

    let command = match rest.first().map(String::as_str) {
        None | Some("show") => Command::Show {
            events: parse_events_only(&rest)?,
        },
        Some("-h") | Some("--help") | Some("help") => Command::Help,
        Some("filter") => parse_filter(&rest[1..])?,
        Some("clear") => Command::Clear {
            events: parse_events_only(&rest)?,
        },
        Some("normalize") => {
            if rest.len() < 2 {
                bail!("normalize needs the date text");
            }
            Command::Normalize(rest[1..].join(" "))
        }
        Some("dark-mode") => match rest.get(1).map(String::as_str) {
            None | Some("status") => Command::DarkMode(DarkModeAction::Status),
            Some("toggle") => Command::DarkMode(DarkModeAction::Toggle),
            Some(other) => bail!("Unknown dark-mode action '{}'", other),
        },
        Some("contact") => parse_contact(&rest[1..])?,
        Some("scroll") => {
            let offset = rest
                .get(1)
                .ok_or_else(|| anyhow!("scroll needs a page offset"))?;
            Command::Scroll(
                offset
                    .parse()
                    .map_err(|e| anyhow!("Invalid offset '{}': {}", offset, e))?,
            )
        }
        Some(other) => bail!("Unknown command '{}'. Try --help", other),
    };

    Ok(Invocation {
        root,
        verbose,
        command,
    })
}

fn parse_events_only(rest: &[String]) -> Result<Option<PathBuf>> {
    let args = if rest.is_empty() { rest } else { &rest[1..] };
    let mut events = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-e" | "--events" => {
                events = Some(PathBuf::from(take_value(args, i, "--events")?));
                i += 2;
            }
            other => bail!("Unexpected argument '{}'", other),
        }
    }
    Ok(events)
}

fn parse_filter(args: &[String]) -> Result<Command> {
    let mut input = CriteriaInput::default();
    let mut events = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--search" => {
                input.search = Some(take_value(args, i, "--search")?);
                i += 2;
            }
            "-c" | "--category" => {
                input.category = Some(take_value(args, i, "--category")?);
                i += 2;
            }
            "-d" | "--date" => {
                input.date = Some(parse_date_arg(&take_value(args, i, "--date")?)?);
                i += 2;
            }
            "-e" | "--events" => {
                events = Some(PathBuf::from(take_value(args, i, "--events")?));
                i += 2;
            }
            other => bail!("Unexpected argument '{}'", other),
        }
    }
    Ok(Command::Filter { input, events })
}

fn parse_contact(args: &[String]) -> Result<Command> {
    let mut form = ContactForm::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--name" => form.name = take_value(args, i, "--name")?,
            "--email" => form.email = take_value(args, i, "--email")?,
            "--message" => form.message = take_value(args, i, "--message")?,
            other => bail!("Unexpected argument '{}'", other),
        }
        i += 2;
    }
    Ok(Command::Contact(form))
}

pub fn print_help(binary_name: &str) {
    println!(
        "Eventguide v{} - City events guide from the command line",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--verbose] <command>", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Debug logging on stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    show [--events <file>]              List events, applying saved filters");
    println!("    filter [options] [--events <file>]  Save filters and list matching events");
    println!("        -s, --search <text>             Text in title or description");
    println!("        -c, --category <name>           Category, or 'all'");
    println!("        -d, --date <YYYY-MM-DD>         Exact event date (\"\" to unset)");
    println!("    clear [--events <file>]             Forget saved filters and list all events");
    println!("    normalize <date text>               Print the ISO date of a card date line");
    println!("    dark-mode [status|toggle]           Show or flip the dark mode preference");
    println!("    contact --name <n> --email <e> --message <m>");
    println!("                                        Validate a contact form submission");
    println!("    scroll <offset>                     Whether the scroll-to-top button shows");
    println!();
    println!("EXAMPLES:");
    println!("    {} filter --category music --date 2024-10-15", binary_name);
    println!("    {} normalize \"التاريخ: 15 تشرين الأول 2024\"", binary_name);
}

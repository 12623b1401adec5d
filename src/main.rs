mod app;
mod floor;
mod help;
mod picker;
mod theme;
use crate::app::App;
use crate::floor::FloorDate;
use crate::picker::PickerSession;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::process::ExitCode;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        anchor: Option<Date>,
        floor: Option<Date>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut anchor = None;
        let mut floor = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('f') | Arg::Long("floor") => {
                    floor = Some(parse_date(parser.value()?.string()?)?);
                }
                Arg::Value(value) if anchor.is_none() => {
                    anchor = Some(parse_date(value.string()?)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { anchor, floor })
    }

    fn run(self) -> anyhow::Result<ExitCode> {
        match self {
            Command::Run { anchor, floor } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let anchor = anchor.unwrap_or(today);
                let chosen = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let session = PickerSession::new(anchor, FloorDate::new(floor));
                    let chosen = App::new(session).run(terminal)?;
                    Ok(chosen)
                })?;
                match chosen {
                    Some(date) => {
                        let date = date
                            .format(&YMD_FMT)
                            .context("failed to format chosen date")?;
                        println!("{date}");
                        Ok(ExitCode::SUCCESS)
                    }
                    None => Ok(ExitCode::FAILURE),
                }
            }
            Command::Help => {
                println!("Usage: datepick [-f DATE] [DATE]");
                println!();
                println!("Pick a date in the terminal; it is printed as YYYY-MM-DD on exit.");
                println!("Cancelling prints nothing and sets the exit status to 1.");
                println!();
                println!("Arguments:");
                println!("  [DATE]            Month to display at startup [default: today]");
                println!();
                println!("Options:");
                println!("  -f, --floor DATE  Dates on or before DATE cannot be chosen");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(ExitCode::SUCCESS)
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn parse_date(value: String) -> Result<Date, lexopt::Error> {
    match Date::parse(&value, &YMD_FMT) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

//! The module responsible for reading launch parameters into a request.
//!

use clap::{ArgAction, Parser, Subcommand};

/// Fields shown when none are requested.
pub const DEFAULT_FIELDS: [&str; 6] = [
    "Latitude",
    "Longitude",
    "City",
    "RegionName",
    "Country",
    "IP",
];

#[derive(Parser, Debug)]
#[command(name = "meridian", version)]
#[command(about = "A tool for getting information about your current location")]
#[command(
    long_about = "Meridian is a CLI application for displaying information about your location like
latitude, longitude, timezone, country, etc."
)]
pub struct Cli {
    /// Location data to display, see the info subcommand for options
    #[arg(
        short,
        long,
        global = true,
        value_delimiter = ',',
        default_values_t = DEFAULT_FIELDS.map(String::from)
    )]
    pub fields: Vec<String>,

    /// IP address or domain name to use in query. Defaults to current location
    #[arg(short = 'p', long = "ip", global = true)]
    pub ip: Option<String>,

    /// More log output, repeat for more detail
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Outputs location information as JSON
    #[command(long_about = "Outputs location query results as JSON for use with tools like jq")]
    Json,

    /// Execute another command that uses location information
    #[command(
        long_about = "Execute external commands using location information through template
variables, e.g. meridian exec 'echo {{City}} {{Country}}'"
    )]
    Exec {
        /// Command template
        template: String,
    },

    /// Display program information
    #[command(long_about = "Display program information as well as a list of valid field values.")]
    Info,
}

/// What to do with the location data.
///
/// * `Show` - Print the selected fields as text.
/// * `Json` - Print the selected fields as JSON.
/// * `Exec { template }` - Run a command filled with location data.
/// * `Info` - Print program information, no query is made.
#[derive(Debug, PartialEq)]
pub enum Command {
    Show,
    Json,
    Exec { template: String },
    Info,
}

/// Everything one run needs to know.
///
/// * `fields: Vec<String>` - Requested field names.
/// * `location: Option<String>` - Address to query, `None` for the caller's own.
/// * `command: Command` - What to do with the answer.
#[derive(Debug, PartialEq)]
pub struct Request {
    pub fields: Vec<String>,
    pub location: Option<String>,
    pub command: Command,
}

impl Request {
    /// Address to query, an empty one counts as none.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.is_empty())
    }
}

impl From<Cli> for Request {
    fn from(cli: Cli) -> Request {
        let command = match cli.command {
            None => Command::Show,
            Some(Commands::Json) => Command::Json,
            Some(Commands::Exec { template }) => Command::Exec { template },
            Some(Commands::Info) => Command::Info,
        };
        Request {
            fields: cli.fields,
            location: cli.ip,
            command,
        }
    }
}

/// Initialization structure.
///
/// * `verbose: u8` - Number of `-v` flags.
/// * `request: Request` - The parsed request.
#[derive(Debug, PartialEq)]
pub struct Init {
    pub verbose: u8,
    pub request: Request,
}

impl Init {
    /// Read the launch parameters of this process.
    ///
    /// Prints usage and exits when they can not be parsed.
    pub fn new() -> Init {
        match Cli::try_parse() {
            Ok(cli) => Init::from_cli(cli),
            Err(e) if !e.use_stderr() => e.exit(),
            Err(e) => {
                let _ = e.print();
                std::process::exit(1);
            }
        }
    }

    fn from_cli(cli: Cli) -> Init {
        Init {
            verbose: cli.verbose,
            request: Request::from(cli),
        }
    }
}

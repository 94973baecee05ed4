/// Functions to handle the command line interface (CLI)
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::PathBuf;

use crate::logger::ConsoleOutput;
use crate::options::StatParams;

/// Exit code for any argument parse or validation failure, including --help.
pub const INVALID_ARG: i32 = 1;

#[derive(Debug, Parser)]
#[clap(name = "rastat", author, version, long_about = None)]
#[clap(about = "Small analysis module to extract stats and histograms from geoTIFF bathymetry maps")]
#[clap(term_width = 120)]
#[clap(allow_negative_numbers = true)]
pub struct Args {
    /// Input bathymetry map. geoTIFF file or XYZ point collection
    #[clap(long)]
    input: Option<PathBuf>,

    /// Output file
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Define verbosity level
    #[clap(long)]
    verbose: Option<i32>,

    /// Number of multithread workers. Used as a hint for the parallel processing stages
    #[clap(long)]
    nthreads: Option<usize>,

    /// Lower limit of the histogram range
    #[clap(long, default_value_t = 0.0)]
    hmin: f64,

    /// Upper limit of the histogram range
    #[clap(long, default_value_t = 1.0)]
    hmax: f64,

    /// Number of histogram bins
    #[clap(long, default_value_t = 100)]
    nbins: u32,

    /// Disable histogram calculation and only compute stats, reducing calculation overhead (~20% faster)
    #[clap(long)]
    nohist: bool,

    /// ROI dimension and position units: px, mm, cm, m or percent
    #[clap(long, default_value = "px")]
    units: String,

    /// Disable exporting the header row containing information about each column. It will export just the data
    #[clap(long)]
    noheader: Option<i32>,

    /// User defined parameter INTEGER for testing purposes
    #[clap(long = "int")]
    int_param: Option<i32>,

    /// User defined parameter FLOAT for testing purposes
    #[clap(long = "float")]
    float_param: Option<f32>,

    /// ROI width in dimension units (px, mm, cm, m, %). If not specified, the complete image width will be used
    #[clap(long = "roiwidth")]
    roi_width: Option<f64>,

    /// ROI height in dimension units (px, mm, cm, m, %). If not specified, the complete image height will be used
    #[clap(long = "roiheight")]
    roi_height: Option<f64>,

    /// Print bash completion data and exit
    #[clap(long)]
    complete: bool,
}

enum ParsedArgs {
    Params(Box<StatParams>),
    Error(String),
    Done,
}

impl Args {
    fn parse(&self) -> ParsedArgs {
        // If the user only wants completion data, stop here.
        if self.complete {
            print_completions();
            return ParsedArgs::Done;
        };

        // The input path is the only mandatory field. It is checked here
        // instead of through clap so the message can name the field.
        let input = match &self.input {
            Some(path) => path.clone(),
            None => {
                return ParsedArgs::Error(
                    "Mandatory <input> file name missing\nUse -h, --help command to see usage"
                        .to_string(),
                )
            }
        };

        ParsedArgs::Params(Box::new(StatParams {
            input,
            output: self.output.clone(),
            verbose: self.verbose,
            nthreads: self.nthreads,
            hmin: self.hmin,
            hmax: self.hmax,
            nbins: self.nbins,
            nohist: self.nohist,
            units: self.units.clone(),
            noheader: self.noheader,
            int_param: self.int_param,
            float_param: self.float_param,
            roi_width: self.roi_width,
            roi_height: self.roi_height,
        }))
    }
}

/// Parse the process arguments and run the main CLI functionality
///
/// # Returns
/// The appropriate exit code.
pub fn run() -> i32 {
    match Args::try_parse() {
        Ok(arguments) => main(arguments),
        Err(err) => finish_failed_parse(err),
    }
}

/// Run the main CLI functionality based on the given arguments
///
/// # Arguments
/// - `arguments`: The Args object containing the parsed arguments.
///
/// # Returns
/// The appropriate exit code.
pub fn main(arguments: Args) -> i32 {
    match arguments.parse() {
        ParsedArgs::Params(params) => {
            print_banner();

            let log = ConsoleOutput::new();
            if params.verbose.unwrap_or(0) > 0 {
                for line in params.describe() {
                    log.debug("cli", &line);
                }
            }
            // Validation is done; the decoding, stats and export stages take
            // over from here with the populated params.
            0
        }
        ParsedArgs::Error(message) => error(&message, INVALID_ARG),
        ParsedArgs::Done => 0,
    }
}

/// Report a failed command line parse and return an exit code
///
/// Help output is not a success: the process was not asked to do any work, so
/// it exits with INVALID_ARG just like a malformed invocation would.
fn finish_failed_parse(err: clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp => {
            print!("{}", err);
            INVALID_ARG
        }
        ErrorKind::DisplayVersion => {
            print!("{}", err);
            0
        }
        _ => error(
            &format!("{}\nUse -h, --help command to see usage", parse_failure_message(&err)),
            INVALID_ARG,
        ),
    }
}

/// The message describing a failed parse
///
/// Syntax errors (unknown flags, malformed or mistyped values) surface clap's
/// own detail; violations of inter-argument rules get a generic message.
fn parse_failure_message(err: &clap::Error) -> String {
    match err.kind() {
        ErrorKind::ArgumentConflict | ErrorKind::MissingRequiredArgument => {
            "Bad input commands".to_string()
        }
        _ => err.to_string().trim_end().to_string(),
    }
}

/// Print an error to /dev/stderr and return an exit code
///
/// # Arguments
/// - `message`: The message to print to /dev/stderr
/// - `code`: The exit code
///
/// # Returns
/// The same exit code that was provided
fn error(message: &str, code: i32) -> i32 {
    eprintln!("{}", message);
    code
}

/// Print the one-time identification banner: program name, source commit and
/// build time. Meant for reproducibility logging, not machine parsing.
fn print_banner() {
    println!("{}", "rastat".cyan());
    println!("\tGit commit:\t{}", env!("RASTAT_GIT_COMMIT").yellow());
    println!("\tBuilt:\t{}", env!("RASTAT_BUILD_TIME"));
}

/// Print a bash completion script for the full flag surface to stdout
fn print_completions() {
    let mut cmd = Args::command();
    clap_complete::generate(clap_complete::Shell::Bash, &mut cmd, "rastat", &mut std::io::stdout());
}

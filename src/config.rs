use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "vregion",
    version,
    about = "Extract the primer-bounded variable region from amplicon sequences"
)]
pub struct Cli {
    /// Input FASTA file, '-' for standard input (.gz supported)
    #[arg(value_name = "IN_FILE")]
    pub input: String,

    /// Output FASTA file, '-' for standard output (.gz supported)
    #[arg(value_name = "OUT_FILE")]
    pub output: String,

    /// FASTA file containing the forward and reverse primers
    #[arg(value_name = "PRIMER_FILE")]
    pub primers: String,

    /// Which primer sides to trim away from the kept region
    #[arg(short = 't', long = "trim", value_enum, default_value = "none")]
    pub trim: Sides,

    /// Which primer sides must be present for a record to be retained
    #[arg(short = 'r', long = "require", value_enum, default_value = "none")]
    pub require: Sides,

    /// Min and max lengths for the final sequence; omitted = no size filtering
    #[arg(short = 's', long = "sizes", num_args = 2, value_names = ["MIN", "MAX"])]
    pub sizes: Option<Vec<usize>>,

    /// Allow a single mismatch (substitution/indel) against each primer
    #[arg(short = 'm', long = "mismatch", action = ArgAction::SetTrue)]
    pub mismatch: bool,

    /// Maximum allowable number of ambiguous characters (-1 disables the filter)
    #[arg(
        short = 'b',
        long = "badchars",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    pub badchars: i64,

    /// Number of worker threads
    #[arg(
        short = 'n',
        long = "numprocs",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=15)
    )]
    pub numprocs: u32,

    /// Log file recording per-record rejection reasons
    #[arg(short = 'l', long = "logfile")]
    pub logfile: Option<String>,

    /// Write a JSON run report to this path
    #[arg(long = "json")]
    pub json: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sides {
    None,
    Forward,
    Reverse,
    Both,
}

impl Sides {
    pub fn forward(self) -> bool {
        matches!(self, Sides::Forward | Sides::Both)
    }

    pub fn reverse(self) -> bool {
        matches!(self, Sides::Reverse | Sides::Both)
    }
}

impl Cli {
    /// The size interval as an ordered pair; an out-of-order pair on the
    /// command line is sorted rather than rejected.
    pub fn size_interval(&self) -> Option<(usize, usize)> {
        self.sizes.as_ref().map(|v| {
            let (min, max) = (v[0], v[1]);
            if min <= max {
                (min, max)
            } else {
                (max, min)
            }
        })
    }
}

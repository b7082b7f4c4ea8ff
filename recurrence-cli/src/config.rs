//! Configuration resolution from CLI args

use std::io::{BufRead, Write};

use crate::cli::{Args, BackendKind, ParallelizeBy, Width};
use crate::error::CliError;

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Requested row index
    pub n: i64,
    /// Requested column index
    pub m: i64,
    /// Integer width of the engines
    pub width: Width,
    /// Memo cache backend
    pub backend: BackendKind,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Whether the triangles were asked for
    pub table: bool,
    /// Largest `n` for which the triangles are built
    pub max_table_rows: u32,
    /// Quiet mode
    pub quiet: bool,
    /// Verbose mode
    pub verbose: bool,
}

impl Config {
    /// Build config from CLI args, prompting on stdin for missing indices
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let stdin = std::io::stdin();
        Self::from_args_with_input(args, &mut stdin.lock())
    }

    /// Build config from CLI args, reading missing indices from `input`
    pub fn from_args_with_input(args: Args, input: &mut impl BufRead) -> Result<Self, CliError> {
        let n = match args.n {
            Some(n) => n,
            None => prompt_index("n", input)?,
        };
        let m = match args.m {
            Some(m) => m,
            None => prompt_index("m", input)?,
        };

        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config(
                    "Thread count must be at least 1".to_string(),
                ));
            }
            Some(threads) => threads,
            None => num_cpus(),
        };

        Ok(Config {
            n,
            m,
            width: args.width,
            backend: args.backend,
            thread_count,
            parallelize_by: args.parallelize_by,
            table: !args.no_table,
            max_table_rows: args.max_table_rows,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    /// Whether the triangles are built for this request
    pub fn builds_table(&self) -> bool {
        self.table && self.n <= i64::from(self.max_table_rows)
    }

    /// Whether the triangles were asked for but `n` is past the row limit
    pub fn table_exceeds_limit(&self) -> bool {
        self.table && !self.builds_table()
    }

    /// Log level forced by `--quiet` / `--verbose`, if any
    pub fn log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else if self.verbose {
            Some("debug")
        } else {
            None
        }
    }
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Prompt user for an index
fn prompt_index(name: &str, input: &mut impl BufRead) -> Result<i64, CliError> {
    println!("What is value `{}`?", name);
    print!(">>> ");
    std::io::stdout().flush().ok();

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::Config(format!("No value given for `{}`", name)));
    }

    line.trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid `{}`: must be an integer", name)))
}

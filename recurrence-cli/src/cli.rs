//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};

/// Integer width the engines evaluate into
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum Width {
    /// 32-bit values (full triangle up to n = 16)
    U32,
    /// 64-bit values (full triangle up to n = 26)
    #[default]
    U64,
    /// 128-bit values (full triangle up to n = 43)
    U128,
}

/// Cache backend of the memoized engine
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum BackendKind {
    /// Sharded concurrent map
    #[default]
    Dashmap,
    /// RwLock around a HashMap
    Rwlock,
}

/// Parallelization level for the triangle computation
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; evaluate every cell in order
    Sequential,
    /// Parallelize across rows; cells of a row run sequentially (default)
    #[default]
    Row,
    /// Parallelize across all cells
    Cell,
}

/// Evaluate A(n, m) = A(n-1, m-1) + m*A(n-1, m) with both engines and cross-check them
#[derive(Parser, Debug)]
#[command(name = "recurrence", version)]
pub struct Args {
    /// Row index n (prompted for if omitted)
    #[arg(allow_negative_numbers = true)]
    pub n: Option<i64>,

    /// Column index m (prompted for if omitted)
    #[arg(allow_negative_numbers = true)]
    pub m: Option<i64>,

    /// Integer width: u32, u64 or u128
    #[arg(short, long, value_enum, default_value = "u64")]
    pub width: Width,

    /// Memo cache backend: dashmap or rwlock
    #[arg(short, long, value_enum, default_value = "dashmap")]
    pub backend: BackendKind,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, row, or cell
    #[arg(long, value_enum, default_value = "row")]
    pub parallelize_by: ParallelizeBy,

    /// Only evaluate A(n, m); skip the triangles of A(i, j) for i <= n, j <= m
    #[arg(long)]
    pub no_table: bool,

    /// Largest n for which the triangles are computed; above it only A(n, m) is evaluated
    #[arg(long, default_value_t = 64)]
    pub max_table_rows: u32,

    /// Quiet mode - only output the value
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode - debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["recurrence", "5", "3"]).unwrap();
        assert_eq!(args.n, Some(5));
        assert_eq!(args.m, Some(3));
        assert_eq!(args.width, Width::U64);
        assert_eq!(args.backend, BackendKind::Dashmap);
        assert_eq!(args.parallelize_by, ParallelizeBy::Row);
        assert_eq!(args.threads, None);
        assert_eq!(args.max_table_rows, 64);
        assert!(!args.no_table && !args.quiet && !args.verbose);
    }

    #[test]
    fn test_options() {
        let args = Args::try_parse_from([
            "recurrence",
            "30",
            "15",
            "--width",
            "u128",
            "--backend",
            "rwlock",
            "--threads",
            "4",
            "--parallelize-by",
            "cell",
            "--no-table",
            "--max-table-rows",
            "200",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.width, Width::U128);
        assert_eq!(args.backend, BackendKind::Rwlock);
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.parallelize_by, ParallelizeBy::Cell);
        assert!(args.no_table && args.quiet);
        assert_eq!(args.max_table_rows, 200);
    }

    #[test]
    fn test_negative_and_missing_indices() {
        let args = Args::try_parse_from(["recurrence", "-3", "0"]).unwrap();
        assert_eq!((args.n, args.m), (Some(-3), Some(0)));

        let args = Args::try_parse_from(["recurrence"]).unwrap();
        assert_eq!((args.n, args.m), (None, None));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["recurrence", "4", "2", "-q", "-v"]).is_err());
    }
}

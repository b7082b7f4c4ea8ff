//! Parallel executor running both engines over the triangle

use std::time::{Duration, Instant};

use rayon::prelude::*;
use recurrence_engine::memo::MemoBackend;
use recurrence_engine::{Recurrence, RecurrenceEngine, RecurrenceError, RecurrenceValue};
use tracing::{debug, info};

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::CliError;

/// Outcome of a single cell; cells past the integer width hold the overflow error
pub type Cell<V> = Result<V, RecurrenceError>;

/// Values `A(i, j)` for `1 <= i <= n` and `1 <= j <= min(i, m)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangle<V> {
    rows: Vec<Vec<Cell<V>>>,
}

impl<V> Triangle<V> {
    /// Rows in order of `i`, starting at `i = 1`
    pub fn rows(&self) -> &[Vec<Cell<V>>] {
        &self.rows
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Cells in row-major order with their `(i, j)` coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64, &Cell<V>)> {
        self.rows.iter().zip(1..).flat_map(|(row, i)| {
            row.iter().zip(1..).map(move |(cell, j)| (i, j, cell))
        })
    }
}

/// Result of running one engine
#[derive(Debug)]
pub struct EngineRun<V> {
    pub engine: &'static str,
    pub value: V,
    pub triangle: Option<Triangle<V>>,
    pub duration: Duration,
}

/// Results of both engines for one request
#[derive(Debug)]
pub struct Report<V> {
    pub n: i64,
    pub m: i64,
    pub recursive: EngineRun<V>,
    pub iterative: EngineRun<V>,
    /// Pairs held by the memo cache after both runs
    pub cached_pairs: usize,
}

/// Parallel executor for evaluating the triangle with both engines
pub struct Executor<V, B>
where
    B: MemoBackend<V>,
{
    recurrence: Recurrence<V, B>,
    thread_pool: rayon::ThreadPool,
    parallelize_by: ParallelizeBy,
}

impl<V, B> Executor<V, B>
where
    V: RecurrenceValue,
    B: MemoBackend<V>,
{
    /// Create a new executor from config
    pub fn new(recurrence: Recurrence<V, B>, config: &Config) -> Result<Self, CliError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| CliError::ThreadPool(e.to_string()))?;

        Ok(Self {
            recurrence,
            thread_pool,
            parallelize_by: config.parallelize_by,
        })
    }

    /// Evaluate `A(n, m)` with both engines, optionally with their triangles,
    /// and check that they agree
    pub fn execute(&self, n: i64, m: i64, table: bool) -> Result<Report<V>, CliError> {
        let recursive = self.run(self.recurrence.recursive(), n, m, table)?;
        let iterative = self.run(self.recurrence.iterative(), n, m, table)?;

        cross_check(n, m, &recursive, &iterative)?;

        Ok(Report {
            n,
            m,
            recursive,
            iterative,
            cached_pairs: self.recurrence.recursive().cache_len(),
        })
    }

    /// Run one engine on the request and, if asked, on its triangle
    fn run<E>(&self, engine: &E, n: i64, m: i64, table: bool) -> Result<EngineRun<V>, CliError>
    where
        E: RecurrenceEngine<V> + Sync,
    {
        let start = Instant::now();
        let value = engine.evaluate(n, m)?;
        let triangle = table.then(|| self.triangle(engine, n, m));
        let duration = start.elapsed();

        info!(engine = engine.name(), n, m, ?duration, "engine finished");
        Ok(EngineRun {
            engine: engine.name(),
            value,
            triangle,
            duration,
        })
    }

    /// Evaluate every cell of the triangle for a validated `(n, m)`
    fn triangle<E>(&self, engine: &E, n: i64, m: i64) -> Triangle<V>
    where
        E: RecurrenceEngine<V> + Sync,
    {
        debug!(engine = engine.name(), n, m, parallelize_by = ?self.parallelize_by, "computing triangle");

        let row = |i: i64| -> Vec<Cell<V>> {
            (1..=i.min(m)).map(|j| engine.evaluate(i, j)).collect()
        };
        let row_by_cell = |i: i64| -> Vec<Cell<V>> {
            (1..=i.min(m))
                .into_par_iter()
                .map(|j| engine.evaluate(i, j))
                .collect()
        };

        let rows = match self.parallelize_by {
            ParallelizeBy::Sequential => (1..=n).map(row).collect(),
            ParallelizeBy::Row => self
                .thread_pool
                .install(|| (1..=n).into_par_iter().map(row).collect()),
            ParallelizeBy::Cell => self
                .thread_pool
                .install(|| (1..=n).into_par_iter().map(row_by_cell).collect()),
        };

        Triangle { rows }
    }
}

/// Fails on the first value or cell where the engines disagree
fn cross_check<V: RecurrenceValue>(
    n: i64,
    m: i64,
    recursive: &EngineRun<V>,
    iterative: &EngineRun<V>,
) -> Result<(), CliError> {
    if recursive.value != iterative.value {
        return Err(CliError::Mismatch {
            n,
            m,
            recursive: recursive.value.to_string(),
            iterative: iterative.value.to_string(),
        });
    }

    if let (Some(left), Some(right)) = (&recursive.triangle, &iterative.triangle)
        && let Some(((i, j, a), (_, _, b))) = left
            .cells()
            .zip(right.cells())
            .find(|((_, _, a), (_, _, b))| a != b)
    {
        return Err(CliError::Mismatch {
            n: i,
            m: j,
            recursive: describe(a),
            iterative: describe(b),
        });
    }

    Ok(())
}

/// Cell text used in reports
pub fn describe<V: RecurrenceValue>(cell: &Cell<V>) -> String {
    match cell {
        Ok(value) => value.to_string(),
        Err(RecurrenceError::Overflow { .. }) => "overflow".to_string(),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;
    use proptest::prelude::*;
    use recurrence_engine::memo::{DashMapBackend, RwLockHashMapBackend};

    fn config(parallelize_by: ParallelizeBy) -> Config {
        Config::from_args_with_input(
            Args::try_parse_from(["recurrence", "1", "1", "--threads", "4"]).unwrap(),
            &mut &b""[..],
        )
        .map(|config| Config {
            parallelize_by,
            ..config
        })
        .unwrap()
    }

    fn executor<V: RecurrenceValue>(
        parallelize_by: ParallelizeBy,
    ) -> Executor<V, DashMapBackend<V>> {
        Executor::new(Recurrence::new(), &config(parallelize_by)).unwrap()
    }

    #[test]
    fn test_execute_value_and_triangle() {
        let report = executor::<u64>(ParallelizeBy::Sequential)
            .execute(5, 3, true)
            .unwrap();

        assert_eq!(report.recursive.value, 25);
        assert_eq!(report.iterative.value, 25);
        assert_eq!(report.recursive.engine, "recursive");
        assert_eq!(report.iterative.engine, "iterative");

        let triangle = report.recursive.triangle.as_ref().unwrap();
        let rows: Vec<Vec<u64>> = triangle
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| *cell.as_ref().unwrap()).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec![1],
                vec![1, 1],
                vec![1, 3, 1],
                vec![1, 7, 6],
                vec![1, 15, 25],
            ]
        );
        assert_eq!(triangle.cell_count(), 12);
        assert_eq!(report.iterative.triangle.as_ref(), Some(triangle));
    }

    #[test]
    fn test_parallelization_levels_agree() {
        let expected = executor::<u128>(ParallelizeBy::Sequential)
            .execute(30, 12, true)
            .unwrap();

        for level in [ParallelizeBy::Row, ParallelizeBy::Cell] {
            let report = executor::<u128>(level).execute(30, 12, true).unwrap();
            assert_eq!(report.recursive.triangle, expected.recursive.triangle);
            assert_eq!(report.iterative.triangle, expected.iterative.triangle);
            assert_eq!(report.cached_pairs, expected.cached_pairs);
        }
    }

    #[test]
    fn test_without_table() {
        let report = executor::<u64>(ParallelizeBy::Row)
            .execute(10, 4, false)
            .unwrap();
        assert_eq!(report.recursive.value, 34105);
        assert!(report.recursive.triangle.is_none());
        assert!(report.iterative.triangle.is_none());
    }

    #[test]
    fn test_narrow_request_with_deep_recursion() {
        // A(n, n - 1) = n(n - 1)/2; the memoized engine recurses once per row
        let report = executor::<u64>(ParallelizeBy::Row)
            .execute(100_000, 99_999, false)
            .unwrap();
        assert_eq!(report.recursive.value, 4_999_950_000);
        assert_eq!(report.iterative.value, 4_999_950_000);
        assert_eq!(report.cached_pairs, 99_998);
    }

    #[test]
    fn test_overflowing_cells_are_kept() {
        // A(17, 2) fits in u32 but A(17, 9) and others in the triangle do not
        let executor = Executor::new(
            Recurrence::with_backend(RwLockHashMapBackend::<u32>::new()),
            &config(ParallelizeBy::Cell),
        )
        .unwrap();
        let report = executor.execute(17, 9, false);
        assert!(matches!(
            report,
            Err(CliError::Recurrence(RecurrenceError::Overflow { n: 17, m: 9, bits: 32 }))
        ));

        let report = executor.execute(17, 16, true).unwrap();
        let triangle = report.iterative.triangle.unwrap();
        let overflowed: Vec<(i64, i64)> = triangle
            .cells()
            .filter(|(_, _, cell)| cell.is_err())
            .map(|(i, j, _)| (i, j))
            .collect();
        assert!(overflowed.contains(&(17, 8)));
        assert!(!overflowed.contains(&(16, 8)));
        assert_eq!(report.recursive.triangle.unwrap(), triangle);
    }

    #[test]
    fn test_invalid_request() {
        let err = executor::<u64>(ParallelizeBy::Row)
            .execute(2, 5, true)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument for A(2, 5): n < m");
    }

    #[test]
    fn test_cross_check_reports_first_difference() {
        let run = |value: u64, cells: Vec<Vec<Cell<u64>>>| EngineRun {
            engine: "test",
            value,
            triangle: Some(Triangle { rows: cells }),
            duration: Duration::ZERO,
        };

        let left = run(7, vec![vec![Ok(1)], vec![Ok(1), Ok(1)], vec![Ok(1), Ok(3), Ok(1)]]);
        let right = run(7, vec![vec![Ok(1)], vec![Ok(1), Ok(1)], vec![Ok(1), Ok(4), Ok(1)]]);
        let err = cross_check(4, 2, &left, &right).unwrap_err();
        assert!(matches!(
            err,
            CliError::Mismatch { n: 3, m: 2, ref recursive, ref iterative }
                if recursive == "3" && iterative == "4"
        ));

        let other = run(8, vec![]);
        assert!(matches!(
            cross_check(4, 2, &left, &other),
            Err(CliError::Mismatch { n: 4, m: 2, .. })
        ));
        assert!(cross_check(4, 2, &left, &left).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// **Property 1: Triangle cells match direct evaluation**
        ///
        /// Every cell of a cross-checked triangle equals a direct windowed
        /// evaluation of the same pair.
        #[test]
        fn prop_triangle_cells_match_direct_evaluation(
            (n, m) in (1i64..=24).prop_flat_map(|n| (Just(n), 1..=n)),
        ) {
            let executor = executor::<u64>(ParallelizeBy::Cell);
            let report = executor.execute(n, m, true).unwrap();
            let triangle = report.recursive.triangle.unwrap();

            prop_assert_eq!(triangle.rows().len() as i64, n);
            for (i, j, cell) in triangle.cells() {
                prop_assert!(j <= i.min(m));
                prop_assert_eq!(cell, &executor.recurrence.evaluate_iterative(i, j));
            }
        }
    }
}

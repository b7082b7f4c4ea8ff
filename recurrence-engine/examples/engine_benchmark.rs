//! Benchmark comparing the recurrence engines.
//!
//! Run with: cargo run --example engine_benchmark --release
//!
//! Evaluates A(n, m) over the full triangle 1 <= m <= n <= MAX_N and compares:
//! - Naive recursion (no cache) - baseline, small n only
//! - Memoized recursion with each cache backend, fresh and shared
//! - Windowed iteration
//!
//! All cached results are verified against the windowed engine.

use recurrence_engine::memo::{DashMapBackend, RwLockHashMapBackend};
use recurrence_engine::{MemoizedRecursiveEngine, WindowedIterativeEngine};
use rayon::prelude::*;
use std::time::Instant;

/// Direct recursive computation for verification (exponentially slow)
fn naive(n: u64, m: u64) -> u128 {
    if m == 1 || n == m {
        1
    } else {
        naive(n - 1, m - 1) + m as u128 * naive(n - 1, m)
    }
}

const MAX_N: i64 = 43; // Largest n whose whole row fits in u128
const NAIVE_MAX_N: i64 = 22;

fn triangle(max_n: i64) -> Vec<(i64, i64)> {
    (1..=max_n)
        .flat_map(|n| (1..=n).map(move |m| (n, m)))
        .collect()
}

fn main() {
    println!("Recurrence Engine Benchmark");
    println!("===========================");

    let queries = triangle(MAX_N);
    let small_queries = triangle(NAIVE_MAX_N);
    println!(
        "Testing {} queries (n <= {}), naive baseline on {} queries (n <= {})\n",
        queries.len(),
        MAX_N,
        small_queries.len(),
        NAIVE_MAX_N
    );

    // =========================================================================
    // Windowed baseline
    // =========================================================================
    println!("=== Windowed iteration ===");

    let windowed = WindowedIterativeEngine::<u128>::new();
    let start = Instant::now();
    let windowed_results: Vec<u128> = queries
        .iter()
        .map(|&(n, m)| windowed.evaluate(n, m).unwrap())
        .collect();
    println!("Windowed (sequential):       {:?}", start.elapsed());

    let start = Instant::now();
    let windowed_par_results: Vec<u128> = queries
        .par_iter()
        .map(|&(n, m)| windowed.evaluate(n, m).unwrap())
        .collect();
    println!("Windowed + par_iter:         {:?}", start.elapsed());

    // =========================================================================
    // Fresh engine per query
    // =========================================================================
    println!("\n=== Memoized, fresh engine per query ===");

    let start = Instant::now();
    let naive_results: Vec<u128> = small_queries
        .iter()
        .map(|&(n, m)| naive(n as u64, m as u64))
        .collect();
    println!("No cache (n<={}):            {:?}", NAIVE_MAX_N, start.elapsed());

    let start = Instant::now();
    let fresh_dashmap_results: Vec<u128> = queries
        .iter()
        .map(|&(n, m)| {
            let engine = MemoizedRecursiveEngine::with_backend(DashMapBackend::<u128>::new());
            engine.evaluate(n, m).unwrap()
        })
        .collect();
    println!("DashMapBackend (fresh):      {:?}", start.elapsed());

    let start = Instant::now();
    let fresh_rwlock_results: Vec<u128> = queries
        .iter()
        .map(|&(n, m)| {
            let engine = MemoizedRecursiveEngine::with_backend(RwLockHashMapBackend::<u128>::new());
            engine.evaluate(n, m).unwrap()
        })
        .collect();
    println!("RwLockHashMapBackend (fresh): {:?}", start.elapsed());

    // =========================================================================
    // Shared engine
    // =========================================================================
    println!("\n=== Memoized, one shared engine ===");

    let shared_dashmap = MemoizedRecursiveEngine::with_backend(DashMapBackend::<u128>::new());
    let start = Instant::now();
    let shared_dashmap_results: Vec<u128> = queries
        .iter()
        .map(|&(n, m)| shared_dashmap.evaluate(n, m).unwrap())
        .collect();
    println!("DashMapBackend (shared):     {:?}", start.elapsed());

    let shared_rwlock = MemoizedRecursiveEngine::with_backend(RwLockHashMapBackend::<u128>::new());
    let start = Instant::now();
    let shared_rwlock_results: Vec<u128> = queries
        .par_iter()
        .map(|&(n, m)| shared_rwlock.evaluate(n, m).unwrap())
        .collect();
    println!("RwLockHashMapBackend + par_iter (shared): {:?}", start.elapsed());

    let shared_par = MemoizedRecursiveEngine::with_backend(DashMapBackend::<u128>::new());
    let start = Instant::now();
    let shared_par_results: Vec<u128> = queries
        .par_iter()
        .map(|&(n, m)| shared_par.evaluate(n, m).unwrap())
        .collect();
    println!("DashMapBackend + par_iter (shared): {:?}", start.elapsed());
    println!("Cached pairs after shared run: {}", shared_par.cache_len());

    // =========================================================================
    // Verification
    // =========================================================================
    println!("\n=== Verification ===");

    assert_eq!(windowed_results, windowed_par_results);
    assert_eq!(windowed_results, fresh_dashmap_results);
    assert_eq!(windowed_results, fresh_rwlock_results);
    assert_eq!(windowed_results, shared_dashmap_results);
    assert_eq!(windowed_results, shared_rwlock_results);
    assert_eq!(windowed_results, shared_par_results);
    assert_eq!(&windowed_results[..naive_results.len()], &naive_results[..]);
    println!("All engines agree on {} values.", windowed_results.len());
}

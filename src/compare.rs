//! 格子ソルバーと Frei ソルバーの比較ハーネス。

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::fmt;
use tracing::debug;

use crate::error::SolveError;
use crate::frei::{solve_with_frei_config, FreiConfig};
use crate::lattice::{solve_lattice_with, LatticeConfig};

/// 既定の被演算子ビット幅（[1, 2^100]）
pub const DEFAULT_BITS: u64 = 100;

/// 1問分の初期量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub a: BigUint,
    pub b: BigUint,
    pub c: BigUint,
}

impl Instance {
    pub fn new(a: BigUint, b: BigUint, c: BigUint) -> Self {
        Instance { a, b, c }
    }

    /// a+b+c のビット長（レポートの1列目）
    pub fn sum_bits(&self) -> u64 {
        (&self.a + &self.b + &self.c).bits()
    }
}

/// シード付き乱数で [1, 2^bits] から一様に3数を引く。
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    rng: StdRng,
    low: BigUint,
    high: BigUint,
}

impl InstanceGenerator {
    pub fn seeded(seed: u64, bits: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), bits)
    }

    pub fn with_rng(rng: StdRng, bits: u64) -> Self {
        let high = (BigUint::one() << bits) + 1u32; // 上端は排他
        InstanceGenerator {
            rng,
            low: BigUint::one(),
            high,
        }
    }

    pub fn next_operand(&mut self) -> BigUint {
        self.rng.gen_biguint_range(&self.low, &self.high)
    }

    pub fn next_instance(&mut self) -> Instance {
        let a = self.next_operand();
        let b = self.next_operand();
        let c = self.next_operand();
        Instance::new(a, b, c)
    }
}

impl Iterator for InstanceGenerator {
    type Item = Instance;

    fn next(&mut self) -> Option<Instance> {
        Some(self.next_instance())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Lattice,
    Frei,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Winner::Lattice => "Lattice",
            Winner::Frei => "Frei",
        })
    }
}

/// 格子が成功し、かつ Frei より厳密に短いときだけ格子の勝ち。
/// 同数・どちらかの失敗は Frei。
pub fn pick_winner(lattice: &Result<u64, SolveError>, frei: &Result<u64, SolveError>) -> Winner {
    match (lattice, frei) {
        (Ok(l), Ok(f)) if l < f => Winner::Lattice,
        _ => Winner::Frei,
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompareConfig {
    pub trials: usize,
    pub lattice: LatticeConfig,
    pub frei: FreiConfig,
}

impl CompareConfig {
    pub fn with_trials(trials: usize) -> Self {
        CompareConfig {
            trials,
            ..CompareConfig::default()
        }
    }
}

/// 1試行の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialResult {
    pub index: usize,
    pub instance: Instance,
    pub lattice: Result<u64, SolveError>,
    pub frei: Result<u64, SolveError>,
    pub winner: Winner,
}

fn steps_or_fail(r: &Result<u64, SolveError>) -> String {
    match r {
        Ok(n) => n.to_string(),
        Err(_) => "FAIL".to_string(),
    }
}

impl TrialResult {
    /// レポートの1行
    pub fn row(&self) -> String {
        format!(
            "{:<15} | {:<15} | {:<15} | {}",
            self.instance.sum_bits(),
            steps_or_fail(&self.lattice),
            steps_or_fail(&self.frei),
            self.winner
        )
    }
}

pub fn header_line() -> String {
    format!(
        "{:<15} | {:<15} | {:<15} | {}",
        "n bits", "Lattice (BFS)", "Frei (Greedy)", "Winner"
    )
}

pub fn rule_line() -> String {
    "-".repeat(75)
}

#[derive(Debug, Clone, Default)]
pub struct ComparisonResult {
    pub trials: Vec<TrialResult>,
    pub lattice_wins: u64,
    pub frei_wins: u64,
}

impl ComparisonResult {
    fn from_trials(trials: Vec<TrialResult>) -> Self {
        let lattice_wins = trials
            .iter()
            .filter(|t| t.winner == Winner::Lattice)
            .count() as u64;
        let frei_wins = trials.len() as u64 - lattice_wins;
        ComparisonResult {
            trials,
            lattice_wins,
            frei_wins,
        }
    }

    pub fn lattice_failures(&self) -> usize {
        self.trials.iter().filter(|t| t.lattice.is_err()).count()
    }

    pub fn frei_failures(&self) -> usize {
        self.trials.iter().filter(|t| t.frei.is_err()).count()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Summary: Lattice Wins: {}, Frei Wins: {}",
            self.lattice_wins, self.frei_wins
        )
    }
}

/// 同じ初期量で両ソルバーを走らせる。
pub fn run_trial(index: usize, instance: Instance, config: &CompareConfig) -> TrialResult {
    let Instance { a, b, c } = &instance;
    let lattice = solve_lattice_with(a, b, c, &config.lattice);
    let frei = solve_with_frei_config(a, b, c, &config.frei);
    let winner = pick_winner(&lattice, &frei);

    if let Err(e) = &lattice {
        debug!(index, error = %e, "lattice run failed");
    }
    if let Err(e) = &frei {
        debug!(index, error = %e, "frei run failed");
    }

    TrialResult {
        index,
        instance,
        lattice,
        frei,
        winner,
    }
}

/// 逐次版。各試行の完了ごとに on_trial を呼ぶ。
pub fn run_comparison(
    generator: &mut InstanceGenerator,
    config: &CompareConfig,
    mut on_trial: impl FnMut(&TrialResult),
) -> ComparisonResult {
    let mut trials = Vec::with_capacity(config.trials);
    for index in 0..config.trials {
        let instance = generator.next_instance();
        let trial = run_trial(index, instance, config);
        on_trial(&trial);
        trials.push(trial);
    }
    ComparisonResult::from_trials(trials)
}

/// 並列版（Rayon）。問題は先に逐次で全て生成するので、
/// 同じシードなら逐次版と同じ結果・同じ順序になる。
pub fn run_comparison_parallel(
    generator: &mut InstanceGenerator,
    config: &CompareConfig,
) -> ComparisonResult {
    let instances: Vec<Instance> = generator.by_ref().take(config.trials).collect();
    let trials: Vec<TrialResult> = instances
        .into_par_iter()
        .enumerate()
        .map(|(index, instance)| run_trial(index, instance, config))
        .collect();
    ComparisonResult::from_trials(trials)
}

use clap::{Args, Parser, Subcommand};
use doubling_pour::compare::{header_line, rule_line};
use doubling_pour::*;
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// 3容器の倍化注ぎパズル: 格子ソルバーと Frei ソルバーの比較
#[derive(Parser, Debug)]
#[command(name = "doubling-pour", version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// ランダムな問題で両ソルバーを比較する
    Compare {
        /// 試行回数
        #[arg(long, default_value_t = 1000)]
        trials: usize,
        /// 乱数シード（省略時はエントロピーから生成して表示）
        #[arg(long)]
        seed: Option<u64>,
        /// 被演算子のビット幅（[1, 2^bits] から一様）
        #[arg(long, default_value_t = DEFAULT_BITS)]
        bits: u64,
        /// Rayon で試行を並列実行する
        #[arg(long)]
        parallel: bool,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// 1問を両ソルバーで解く
    Solve {
        a: BigUint,
        b: BigUint,
        c: BigUint,
        #[command(flatten)]
        solver: SolverArgs,
    },
}

#[derive(Args, Debug)]
struct SolverArgs {
    /// 格子ソルバーの初期係数を簡約済み核ベクトルにする
    #[arg(long)]
    reduced_seed: bool,
    /// 格子ソルバーの上限手数
    #[arg(long, default_value_t = LATTICE_MAX_STEPS)]
    lattice_max_steps: u64,
    /// Frei ソルバーの上限手数
    #[arg(long, default_value_t = FREI_MAX_STEPS)]
    frei_max_steps: u64,
}

impl SolverArgs {
    fn lattice(&self) -> LatticeConfig {
        LatticeConfig {
            max_steps: self.lattice_max_steps,
            seed: if self.reduced_seed {
                CoeffSeed::Reduced
            } else {
                CoeffSeed::Naive
            },
        }
    }

    fn frei(&self) -> FreiConfig {
        FreiConfig {
            max_steps: self.frei_max_steps,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Compare {
            trials,
            seed,
            bits,
            parallel,
            solver,
        } => cmd_compare(trials, seed, bits, parallel, &solver),
        Cmd::Solve { a, b, c, solver } => cmd_solve(&a, &b, &c, &solver),
    }
}

fn cmd_compare(trials: usize, seed: Option<u64>, bits: u64, parallel: bool, solver: &SolverArgs) {
    let seed = seed.unwrap_or_else(|| StdRng::from_entropy().gen());
    eprintln!("seed = {}, trials = {}, bits = {}", seed, trials, bits);

    let config = CompareConfig {
        trials,
        lattice: solver.lattice(),
        frei: solver.frei(),
    };
    let mut generator = InstanceGenerator::seeded(seed, bits);

    println!("{}", header_line());
    println!("{}", rule_line());

    let timer = Instant::now();
    let result = if parallel {
        eprintln!("({}スレッド並列)", rayon::current_num_threads());
        let result = run_comparison_parallel(&mut generator, &config);
        for trial in &result.trials {
            println!("{}", trial.row());
        }
        result
    } else {
        run_comparison(&mut generator, &config, |trial| println!("{}", trial.row()))
    };
    let elapsed = timer.elapsed();

    println!("{}", rule_line());
    println!("{}", result.summary_line());
    eprintln!(
        "failures: lattice = {}, frei = {}; elapsed = {:?}",
        result.lattice_failures(),
        result.frei_failures(),
        elapsed
    );
}

fn cmd_solve(a: &BigUint, b: &BigUint, c: &BigUint, solver: &SolverArgs) {
    println!("vessels = ({}, {}, {})", a, b, c);

    let timer = Instant::now();
    let lattice = solve_lattice_with(a, b, c, &solver.lattice());
    let lattice_elapsed = timer.elapsed();

    let timer = Instant::now();
    let frei = solve_with_frei_config(a, b, c, &solver.frei());
    let frei_elapsed = timer.elapsed();

    let show = |r: &Result<u64, SolveError>| match r {
        Ok(n) => format!("{} steps", n),
        Err(e) => format!("FAIL ({})", e),
    };
    println!("Lattice: {} [{:?}]", show(&lattice), lattice_elapsed);
    println!("Frei:    {} [{:?}]", show(&frei), frei_elapsed);
    println!("Winner:  {}", pick_winner(&lattice, &frei));
}

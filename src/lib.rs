//! 3容器の倍化注ぎパズル
//!
//! 容器 i から j へ注ぐと j の量がちょうど倍になり、i はその分だけ減る。
//! いずれかの容器を空にする短い手順を、2つの戦略で求めて比較する。
//!
//! - 係数格子の貪欲法（[`lattice`]）: v·c = 0 を保つ係数ベクトルを 0 へ寄せる。
//! - Frei ラウンド法（[`frei`]）: 小さい2容器の間で二進ユークリッド法を1段ずつ進める。

pub mod compare;
pub mod error;
pub mod frei;
pub mod kernel;
pub mod lattice;
pub mod rounds;
pub mod vessels;

pub use compare::{
    pick_winner, run_comparison, run_comparison_parallel, run_trial, CompareConfig,
    ComparisonResult, Instance, InstanceGenerator, TrialResult, Winner, DEFAULT_BITS,
};
pub use error::{PourError, SolveError};
pub use frei::{solve_with_frei, solve_with_frei_callback, solve_with_frei_config, FreiConfig, FREI_MAX_STEPS};
pub use kernel::reduced_kernel_vector;
pub use lattice::{
    solve_lattice, solve_lattice_from, solve_lattice_with, solve_lattice_with_callback, CoeffSeed,
    Coeffs, LatticeConfig, LATTICE_MAX_STEPS,
};
pub use rounds::{frei_round, janson_round};
pub use vessels::{perform_move, Move, Vessels};

//! 係数格子による貪欲ソルバー。
//!
//! 容器ベクトル v と直交する整数係数ベクトル c（v·c = 0）を保ちながら、
//! 1手ごとに c の成分を 0 へ近づける手を選ぶ最急降下法。
//!
//! 手 j → i（i が倍、j が減る）に対し c[i] := (c[i] + c[j]) / 2 と更新すると
//! 2v[i]·(c[i]+c[j])/2 + (v[j]-v[i])·c[j] = v[i]·c[i] + v[j]·c[j]
//! となり内積は保存される。和が偶数である必要があるので c[i] ≡ c[j] (mod 2)。

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Signed, Zero};
use tracing::{debug, warn};

use crate::error::SolveError;
use crate::kernel;
use crate::vessels::{Move, Vessels};

/// 格子ソルバーの安全上限（手数）
pub const LATTICE_MAX_STEPS: u64 = 4_000_000;

/// 係数ベクトル
pub type Coeffs = [BigInt; 3];

/// 初期係数の選び方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoeffSeed {
    /// (-b, a, 0)
    #[default]
    Naive,
    /// 簡約済みの短い核ベクトル。局所最小で止まりやすい。
    Reduced,
}

#[derive(Debug, Clone)]
pub struct LatticeConfig {
    pub max_steps: u64,
    pub seed: CoeffSeed,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        LatticeConfig {
            max_steps: LATTICE_MAX_STEPS,
            seed: CoeffSeed::Naive,
        }
    }
}

/// 候補手。giver → recipient に注ぎ、c[recipient] を new_val にする。
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    score: BigInt,
    recipient: usize,
    giver: usize,
    new_val: BigInt,
}

pub fn naive_coeffs(a: &BigUint, b: &BigUint) -> Coeffs {
    [
        -BigInt::from(b.clone()),
        BigInt::from(a.clone()),
        BigInt::zero(),
    ]
}

pub fn initial_coeffs(a: &BigUint, b: &BigUint, c: &BigUint, seed: CoeffSeed) -> Coeffs {
    match seed {
        CoeffSeed::Naive => naive_coeffs(a, b),
        CoeffSeed::Reduced => kernel::reduced_kernel_vector(a, b, c).unwrap_or_else(|| {
            warn!("kernel reduction stalled; falling back to naive coefficients");
            naive_coeffs(a, b)
        }),
    }
}

/// Σ v[k]·c[k]
pub fn dot_product(vessels: &Vessels, coeffs: &Coeffs) -> BigInt {
    vessels
        .as_array()
        .iter()
        .zip(coeffs.iter())
        .map(|(v, c)| BigInt::from(v.clone()) * c)
        .sum()
}

/// 物理条件（v[j] ≥ v[i]）と偶奇条件を満たし、係数が実際に変わる手を
/// (i, j) = (0,0),(0,1),… の順に列挙する。
fn candidates(vessels: &Vessels, coeffs: &Coeffs) -> Vec<Candidate> {
    let two = BigInt::from(2);
    let mut out = Vec::new();

    for i in 0..3 {
        for j in 0..3 {
            if i == j {
                continue;
            }
            if vessels.get(j) < vessels.get(i) {
                continue;
            }
            if coeffs[i].is_even() != coeffs[j].is_even() {
                continue;
            }

            let new_val = (&coeffs[i] + &coeffs[j]).div_floor(&two);
            let score = (&coeffs[i] - &new_val).abs();
            if score.is_zero() {
                continue;
            }
            out.push(Candidate {
                score,
                recipient: i,
                giver: j,
                new_val,
            });
        }
    }
    out
}

/// 既定設定（初期係数 (-b, a, 0)、上限 4,000,000 手）で解く。
pub fn solve_lattice(a: &BigUint, b: &BigUint, c: &BigUint) -> Result<u64, SolveError> {
    solve_lattice_with(a, b, c, &LatticeConfig::default())
}

pub fn solve_lattice_with(
    a: &BigUint,
    b: &BigUint,
    c: &BigUint,
    config: &LatticeConfig,
) -> Result<u64, SolveError> {
    solve_lattice_with_callback(a, b, c, config, |_, _, _| {})
}

/// 各反復の先頭（不変条件の検証直後）で callback(step, 容器, 係数) を呼ぶ。
pub fn solve_lattice_with_callback(
    a: &BigUint,
    b: &BigUint,
    c: &BigUint,
    config: &LatticeConfig,
    callback: impl FnMut(u64, &Vessels, &Coeffs),
) -> Result<u64, SolveError> {
    let coeffs = initial_coeffs(a, b, c, config.seed);
    let vessels = Vessels::new(a.clone(), b.clone(), c.clone());
    solve_lattice_from(vessels, coeffs, config.max_steps, callback)
}

/// 任意の初期状態から解く。
///
/// # Panics
///
/// 反復の先頭で v·c ≠ 0 なら panic する（係数更新の破損であり、回復不能）。
pub fn solve_lattice_from(
    mut vessels: Vessels,
    mut coeffs: Coeffs,
    max_steps: u64,
    mut callback: impl FnMut(u64, &Vessels, &Coeffs),
) -> Result<u64, SolveError> {
    let mut steps = 0u64;

    while steps < max_steps {
        let d = dot_product(&vessels, &coeffs);
        assert!(
            d.is_zero(),
            "lattice invariant broken at step {}: v·c = {} (v={}, c=[{}, {}, {}])",
            steps,
            d,
            vessels,
            coeffs[0],
            coeffs[1],
            coeffs[2]
        );
        callback(steps, &vessels, &coeffs);

        if vessels.has_empty() {
            debug!(steps, "lattice solved");
            return Ok(steps);
        }

        // 同点は列挙順で先のもの
        let best = candidates(&vessels, &coeffs)
            .into_iter()
            .min_by(|x, y| x.score.cmp(&y.score));
        let Some(best) = best else {
            warn!(steps, vessels = %vessels, "lattice stuck: no valid moves (local minimum)");
            return Err(SolveError::Stuck { steps });
        };

        vessels
            .pour(Move::new(best.giver, best.recipient))
            .map_err(|source| SolveError::IllegalMove { steps, source })?;
        coeffs[best.recipient] = best.new_val;
        steps += 1;
    }

    // 最後の1手で空になった場合は成功
    if vessels.has_empty() {
        debug!(steps, "lattice solved at the cap");
        return Ok(steps);
    }
    warn!(
        cap = max_steps,
        vessels = %vessels,
        "lattice failed: max steps reached"
    );
    Err(SolveError::Exhausted { cap: max_steps })
}

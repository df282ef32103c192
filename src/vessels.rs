use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;

use crate::error::PourError;

/// 1回の注ぎ操作。`from` の液体で `to` を倍にする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub const fn new(from: usize, to: usize) -> Self {
        Move { from, to }
    }
}

impl From<(usize, usize)> for Move {
    fn from((from, to): (usize, usize)) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// 3つの容器の現在量。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vessels {
    v: [BigUint; 3],
}

impl Vessels {
    pub fn new(a: BigUint, b: BigUint, c: BigUint) -> Self {
        Vessels { v: [a, b, c] }
    }

    pub fn from_u64(a: u64, b: u64, c: u64) -> Self {
        Vessels::new(BigUint::from(a), BigUint::from(b), BigUint::from(c))
    }

    #[inline]
    pub fn get(&self, i: usize) -> &BigUint {
        &self.v[i]
    }

    pub fn as_array(&self) -> &[BigUint; 3] {
        &self.v
    }

    /// いずれかの容器が空か（ゴール判定）
    #[inline]
    pub fn has_empty(&self) -> bool {
        self.v.iter().any(|x| x.is_zero())
    }

    pub fn total(&self) -> BigUint {
        self.v.iter().sum()
    }

    /// 量の昇順に並べた添字。同値は添字順を保つ（安定ソート）。
    pub fn sorted_indices(&self) -> [usize; 3] {
        let mut idx = [0usize, 1, 2];
        idx.sort_by(|&x, &y| self.v[x].cmp(&self.v[y]));
        idx
    }

    pub fn min_value(&self) -> &BigUint {
        self.v.iter().min().unwrap_or(&self.v[0])
    }

    /// 注ぐ: to の量が倍になり、from はその元の量だけ減る。
    /// from < to の量なら物理的に不可能として状態を変えずに失敗する。
    pub fn pour(&mut self, mv: Move) -> Result<(), PourError> {
        perform_move(self, mv.from, mv.to)
    }

    /// 移動列を順に適用する。失敗した時点で止まり、その添字を返す。
    pub fn apply_all(&mut self, moves: &[Move]) -> Result<(), (usize, PourError)> {
        for (k, &mv) in moves.iter().enumerate() {
            self.pour(mv).map_err(|e| (k, e))?;
        }
        Ok(())
    }
}

impl fmt::Display for Vessels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.v[0], self.v[1], self.v[2])
    }
}

/// 注ぎ操作の唯一の判定規則。
///
/// `amount = state[tgt]` を読み、`state[src] < amount` なら
/// [`PourError::Overdraw`]。そうでなければ `state[tgt] *= 2`,
/// `state[src] -= amount`。
pub fn perform_move(state: &mut Vessels, src: usize, tgt: usize) -> Result<(), PourError> {
    if src >= 3 {
        return Err(PourError::BadIndex(src));
    }
    if tgt >= 3 {
        return Err(PourError::BadIndex(tgt));
    }
    if src == tgt {
        return Err(PourError::SameVessel(src));
    }
    if state.v[src] < state.v[tgt] {
        return Err(PourError::Overdraw { src, tgt });
    }

    let amount = state.v[tgt].clone();
    state.v[src] -= &amount;
    state.v[tgt] <<= 1u32;
    Ok(())
}

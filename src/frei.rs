//! Frei ラウンドを繰り返して解くソルバー。

use num_bigint::BigUint;
use tracing::{debug, warn};

use crate::error::SolveError;
use crate::rounds::frei_round;
use crate::vessels::{Move, Vessels};

/// ラウンドソルバーの上限（手数）
pub const FREI_MAX_STEPS: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct FreiConfig {
    pub max_steps: u64,
}

impl Default for FreiConfig {
    fn default() -> Self {
        FreiConfig {
            max_steps: FREI_MAX_STEPS,
        }
    }
}

pub fn solve_with_frei(a: &BigUint, b: &BigUint, c: &BigUint) -> Result<u64, SolveError> {
    solve_with_frei_config(a, b, c, &FreiConfig::default())
}

pub fn solve_with_frei_config(
    a: &BigUint,
    b: &BigUint,
    c: &BigUint,
    config: &FreiConfig,
) -> Result<u64, SolveError> {
    solve_with_frei_callback(a, b, c, config, |_, _, _| {})
}

/// ラウンドを適用するたびに callback(累計手数, ラウンドの移動列, 適用後の容器) を呼ぶ。
pub fn solve_with_frei_callback(
    a: &BigUint,
    b: &BigUint,
    c: &BigUint,
    config: &FreiConfig,
    mut callback: impl FnMut(u64, &[Move], &Vessels),
) -> Result<u64, SolveError> {
    let mut vessels = Vessels::new(a.clone(), b.clone(), c.clone());
    let mut steps = 0u64;

    while steps < config.max_steps {
        if vessels.has_empty() {
            debug!(steps, "frei solved");
            return Ok(steps);
        }

        let moves = frei_round(&vessels);
        if moves.is_empty() {
            warn!(steps, vessels = %vessels, "frei round made no progress");
            return Err(SolveError::NoProgress { steps });
        }

        // 生成直後のスナップショットに適用するので失敗しないはず
        for &mv in &moves {
            vessels
                .pour(mv)
                .map_err(|source| SolveError::IllegalMove { steps, source })?;
            steps += 1;
        }
        callback(steps, &moves, &vessels);
    }

    // 最後のラウンドが上限を跨いで空にした場合は成功
    if vessels.has_empty() {
        debug!(steps, "frei solved past the cap");
        return Ok(steps);
    }
    warn!(cap = config.max_steps, "frei failed: max steps reached");
    Err(SolveError::Exhausted {
        cap: config.max_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frei(a: u64, b: u64, c: u64) -> Result<u64, SolveError> {
        solve_with_frei(&BigUint::from(a), &BigUint::from(b), &BigUint::from(c))
    }

    #[test]
    fn test_small_instances() {
        assert_eq!(frei(1, 1, 1), Ok(1));
        assert_eq!(frei(2, 3, 5), Ok(4));
        assert_eq!(frei(1, 2, 3), Ok(2));
        assert_eq!(frei(2, 2, 3), Ok(1));
        assert_eq!(frei(3, 5, 7), Ok(5));
        assert_eq!(frei(4, 6, 9), Ok(4));
        assert_eq!(frei(5, 8, 13), Ok(5));
        assert_eq!(frei(6, 10, 15), Ok(9));
        assert_eq!(frei(7, 11, 100), Ok(10));
    }

    #[test]
    fn test_zero_operand_is_already_solved() {
        assert_eq!(frei(0, 5, 7), Ok(0));
    }

    #[test]
    fn test_rounds_2_3_5() {
        let mut rounds: Vec<(u64, Vec<Move>, Vessels)> = Vec::new();
        let r = solve_with_frei_callback(
            &BigUint::from(2u8),
            &BigUint::from(3u8),
            &BigUint::from(5u8),
            &FreiConfig::default(),
            |steps, moves, v| rounds.push((steps, moves.to_vec(), v.clone())),
        );
        assert_eq!(r, Ok(4));
        assert_eq!(
            rounds,
            vec![
                (1, vec![Move::new(1, 0)], Vessels::from_u64(4, 1, 5)),
                (
                    4,
                    vec![Move::new(2, 1), Move::new(2, 1), Move::new(0, 1)],
                    Vessels::from_u64(0, 8, 2)
                ),
            ]
        );
    }

    #[test]
    fn test_cap_reports_exhausted() {
        let config = FreiConfig { max_steps: 3 };
        let r = solve_with_frei_config(
            &BigUint::from(7u8),
            &BigUint::from(11u8),
            &BigUint::from(100u8),
            &config,
        );
        // 1ラウンド目(2手)の後、2ラウンド目(3手)で上限を越える
        assert_eq!(r, Err(SolveError::Exhausted { cap: 3 }));
    }

    #[test]
    fn test_round_crossing_cap_still_solves() {
        // 2ラウンド目で 1 → 4 手。上限 3 を跨ぐが容器は空になる
        let config = FreiConfig { max_steps: 3 };
        let r = solve_with_frei_config(
            &BigUint::from(2u8),
            &BigUint::from(3u8),
            &BigUint::from(5u8),
            &config,
        );
        assert_eq!(r, Ok(4));
    }
}

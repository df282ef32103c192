//! a·x + b·y + c·z = 0 の短い整数解（核ベクトル）を求める。
//!
//! 1. 単位行列に値列を付けた 3×4 行列をユークリッド互除で簡約し、
//!    値列が 0 になった行を2本集めて核の基底とする。
//! 2. その2次元基底を Lagrange（Gauss）簡約し、短い方を返す。
//!
//! 格子ソルバーの初期係数（[`crate::lattice::CoeffSeed::Reduced`]）に使う。

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Signed, Zero};

type Row = [BigInt; 4];

fn norm_sq(v: &[BigInt; 3]) -> BigInt {
    v.iter().map(|x| x * x).sum()
}

fn dot(u: &[BigInt; 3], v: &[BigInt; 3]) -> BigInt {
    u.iter().zip(v.iter()).map(|(x, y)| x * y).sum()
}

/// ユークリッド互除で核の基底2本を得る。簡約が止まった場合は None。
fn kernel_basis(a: &BigUint, b: &BigUint, c: &BigUint) -> Option<([BigInt; 3], [BigInt; 3])> {
    let one = || BigInt::from(1);
    let zero = BigInt::zero;
    let mut rows: Vec<Row> = vec![
        [one(), zero(), zero(), BigInt::from(a.clone())],
        [zero(), one(), zero(), BigInt::from(b.clone())],
        [zero(), zero(), one(), BigInt::from(c.clone())],
    ];
    let mut basis: Vec<Row> = Vec::with_capacity(2);

    while basis.len() < 2 {
        if rows.is_empty() {
            return None;
        }
        rows.sort_by_key(|r| r[3].abs());

        if rows[0][3].is_zero() {
            basis.push(rows.remove(0));
            continue;
        }

        let smallest = rows[0].clone();
        let mut changed = false;
        for row in rows.iter_mut().skip(1) {
            let factor = row[3].div_floor(&smallest[3]);
            if !factor.is_zero() {
                for (x, s) in row.iter_mut().zip(smallest.iter()) {
                    *x -= &factor * s;
                }
                changed = true;
            }
        }
        if !changed {
            return None;
        }
    }

    let [first, second]: [Row; 2] = basis.try_into().ok()?;
    let head = |r: Row| -> [BigInt; 3] {
        let [x, y, z, _] = r;
        [x, y, z]
    };
    Some((head(first), head(second)))
}

/// 簡約済みの短い核ベクトル。a·x + b·y + c·z = 0 を満たす。
pub fn reduced_kernel_vector(a: &BigUint, b: &BigUint, c: &BigUint) -> Option<[BigInt; 3]> {
    let (mut u, mut v) = kernel_basis(a, b, c)?;

    loop {
        if norm_sq(&v) < norm_sq(&u) {
            std::mem::swap(&mut u, &mut v);
        }

        let d = dot(&u, &v);
        let mag = norm_sq(&u);
        if mag.is_zero() || d < mag {
            break;
        }

        // 最近接整数への丸め
        let (mut factor, rem) = d.div_mod_floor(&mag);
        if rem > &mag / 2 {
            factor += 1;
        }
        for (vi, ui) in v.iter_mut().zip(u.iter()) {
            *vi -= &factor * ui;
        }
    }

    debug_assert!(is_kernel_vector(a, b, c, &u));
    debug_assert!(is_kernel_vector(a, b, c, &v));

    Some(if norm_sq(&u) <= norm_sq(&v) { u } else { v })
}

pub fn is_kernel_vector(a: &BigUint, b: &BigUint, c: &BigUint, x: &[BigInt; 3]) -> bool {
    let vals = [
        BigInt::from(a.clone()),
        BigInt::from(b.clone()),
        BigInt::from(c.clone()),
    ];
    dot(&vals, x).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kv(a: u64, b: u64, c: u64) -> [i64; 3] {
        let x = reduced_kernel_vector(&BigUint::from(a), &BigUint::from(b), &BigUint::from(c))
            .expect("kernel");
        let conv = |n: &BigInt| -> i64 { n.try_into().unwrap() };
        [conv(&x[0]), conv(&x[1]), conv(&x[2])]
    }

    #[test]
    fn test_small_kernels() {
        assert_eq!(kv(2, 3, 5), [-1, -1, 1]);
        assert_eq!(kv(3, 5, 7), [1, -2, 1]);
        assert_eq!(kv(6, 10, 15), [5, 0, -2]);
        assert_eq!(kv(7, 11, 100), [27, 1, -2]);
    }

    #[test]
    fn test_kernel_property_large() {
        let a = (BigUint::from(1u8) << 100u32) - BigUint::from(3u8);
        let b = (BigUint::from(1u8) << 99u32) + BigUint::from(12345u32);
        let c = BigUint::from(987654321987654321u64);
        let x = reduced_kernel_vector(&a, &b, &c).expect("kernel");
        assert!(is_kernel_vector(&a, &b, &c, &x));
        assert!(x.iter().any(|n| !n.is_zero()));
        // 初期係数 (-b, a, 0) より短い
        let naive = [-BigInt::from(b.clone()), BigInt::from(a.clone()), BigInt::zero()];
        assert!(norm_sq(&x) < norm_sq(&naive));
    }
}

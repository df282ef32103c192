//! 二進ユークリッド法の1ラウンド（マクロステップ）生成。
//!
//! 小さい2つの容器 a ≤ b について、b を a で割った余りまで減らす移動列を
//! 倍化だけで組み立てる。生成器は状態を変更せず、移動列を返すだけ。

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use crate::vessels::{Move, Vessels};

/// 倍率 m のビットを LSB から `len` 桁ぶん移動列に変換する。
/// ビット 1: b → a（加算つき倍化）, ビット 0: c → a（倍化のみ）。
fn bit_moves(m: &BigUint, len: u64, a_idx: usize, b_idx: usize, c_idx: usize) -> Vec<Move> {
    (0..len)
        .map(|i| {
            if m.bit(i) {
                Move::new(b_idx, a_idx)
            } else {
                Move::new(c_idx, a_idx)
            }
        })
        .collect()
}

/// Janson のラウンド: p = ⌊b/a⌋ のビット分解で a を p 倍しつつ b から引く。
///
/// a = 0 または p = 0 なら空。
pub fn janson_round(vessels: &Vessels) -> Vec<Move> {
    let [a_idx, b_idx, c_idx] = vessels.sorted_indices();
    let a = vessels.get(a_idx);
    let b = vessels.get(b_idx);

    if a.is_zero() {
        return Vec::new();
    }
    let p = b / a;
    if p.is_zero() {
        return Vec::new();
    }

    bit_moves(&p, p.bits(), a_idx, b_idx, c_idx)
}

/// Frei のラウンド: 切り上げ商 q の余りの方が小さければ q で倍化し、
/// 最後に a → b で1回分の行き過ぎを戻す。そうでなければ Janson と同じ。
pub fn frei_round(vessels: &Vessels) -> Vec<Move> {
    let [a_idx, b_idx, c_idx] = vessels.sorted_indices();
    let a = vessels.get(a_idx);
    let b = vessels.get(b_idx);

    if a.is_zero() {
        return Vec::new();
    }

    let r1 = b % a;
    let q = Integer::div_ceil(b, a);
    let r2 = &q * a - b;

    if r1 <= r2 {
        return janson_round(vessels);
    }

    // 最上位ビットは末尾の a → b が担う
    let mut moves = bit_moves(&q, q.bits() - 1, a_idx, b_idx, c_idx);
    moves.push(Move::new(a_idx, b_idx));
    moves
}

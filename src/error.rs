use thiserror::Error;

/// 注ぎ操作の失敗（物理的違反）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PourError {
    #[error("vessel {src} holds less than vessel {tgt}; cannot pour")]
    Overdraw { src: usize, tgt: usize },
    #[error("cannot pour vessel {0} into itself")]
    SameVessel(usize),
    #[error("vessel index {0} out of range")]
    BadIndex(usize),
}

/// ソルバーの失敗。ハーネスではいずれも FAIL として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// 候補手が1つもない（局所最小）
    #[error("stuck after {steps} steps: no valid move (local minimum)")]
    Stuck { steps: u64 },
    /// ステップ上限に到達
    #[error("step cap {cap} reached without emptying a vessel")]
    Exhausted { cap: u64 },
    /// ラウンドが空を返したが空の容器がない
    #[error("round generator made no progress after {steps} steps")]
    NoProgress { steps: u64 },
    #[error("illegal move after {steps} steps: {source}")]
    IllegalMove {
        steps: u64,
        #[source]
        source: PourError,
    },
}

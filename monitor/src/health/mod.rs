//! ヘルスチェック監視
//!
//! PULL型の監視サイクル。レジストラからプロダクトを検出し、既知の全ターゲットに対して
//! `{endpoint}/health` と `{endpoint}/metrics` を定期的に取得する。

pub mod cycle;
pub mod scheduler;

pub use cycle::{CycleReport, ProbeCycle, ProbeKind, TargetOutcome};
pub use scheduler::{Cycle, Scheduler};

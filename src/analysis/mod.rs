//! 分析层（Analysis Layer）
//!
//! 读取评测日志之后的所有离线处理：
//!
//! ```text
//! EvalLog → extract::analyze_log → aggregate::aggregate → csv / plot
//! ```
//!
//! 本层不发起任何模型调用，全部为同步计算。

pub mod aggregate;
pub mod csv;
pub mod extract;
pub mod plot;

pub use aggregate::{aggregate, cell, games_present, mean_by_player, AggregateRow};
pub use csv::{render_csv, write_csv};
pub use extract::{analyze_log, AnalysisRow, Detected};

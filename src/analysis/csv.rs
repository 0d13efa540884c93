//! 汇总结果的 CSV 输出

use std::fmt::Write as _;
use std::path::Path;

use crate::analysis::aggregate::AggregateRow;
use crate::error::{AppError, AppResult};

pub const CSV_HEADER: [&str; 6] = [
    "game_key",
    "player_variant",
    "move_order_variant",
    "prop_superrational",
    "prop_send",
    "n_samples",
];

/// 渲染 CSV 文本；`prop_send` 没有值时留空
///
/// 比例保留小数点（`1.0` 而不是 `1`）
pub fn render_csv(rows: &[AggregateRow]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');

    for row in rows {
        let prop_send = row.prop_send.map(|p| format!("{:?}", p)).unwrap_or_default();
        let _ = writeln!(
            out,
            "{},{},{},{:?},{},{}",
            escape_field(row.game.key()),
            escape_field(&row.player_variant.to_string()),
            escape_field(&row.move_order.to_string()),
            row.prop_superrational,
            prop_send,
            row.n_samples
        );
    }

    out
}

/// 写出 CSV 文件
pub fn write_csv(path: &Path, rows: &[AggregateRow]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    std::fs::write(path, render_csv(rows))
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

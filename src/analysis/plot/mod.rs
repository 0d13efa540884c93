//! 图表渲染
//!
//! 所有图表输出为 SVG，纵轴固定为 [0, 1] 的超理性得分

pub mod bars;
pub mod heatmap;
pub mod lines;
pub mod svg;

pub use bars::render_grouped_bars;
pub use heatmap::render_heatmap;
pub use lines::{games_comparison, model_comparison, render_line_panels, two_models_comparison, LineChart, Series};
pub use svg::save_svg;

use svg::{Anchor, SvgDocument, TextStyle};

/// 多模型图表中优先排列的模型（按名称最后一段匹配），其余按字母序追加
pub const MODEL_ORDER: [&str; 8] = [
    "gpt-5",
    "gpt-5-mini",
    "gpt-4o",
    "claude-sonnet-4.5",
    "claude-3.5-haiku",
    "gemini-2.5-pro",
    "gemini-2.5-flash-lite",
    "grok-4",
];

/// 绘图区域
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PlotArea {
    /// 得分对应的纵坐标
    pub fn y_for(&self, value: f64) -> f64 {
        self.y + self.h * (1.0 - value.clamp(0.0, 1.0))
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// 画纵轴：刻度、网格线和纵轴说明
pub fn draw_value_axis(doc: &mut SvgDocument, area: PlotArea, label: &str) {
    for step in 0..=5 {
        let value = step as f64 * 0.2;
        let y = area.y_for(value);
        doc.line(area.x, y, area.x + area.w, y, "#000000", 1.0, 0.3);
        doc.text(
            area.x - 8.0,
            y + 4.0,
            &format!("{:.1}", value),
            TextStyle::new(11.0).anchor(Anchor::End),
        );
    }
    doc.line(area.x, area.y, area.x, area.bottom(), "#000000", 1.0, 1.0);
    doc.line(area.x, area.bottom(), area.x + area.w, area.bottom(), "#000000", 1.0, 1.0);

    doc.text(
        area.x - 55.0,
        area.y + area.h / 2.0,
        label,
        TextStyle::new(12.0).rotate(-90.0),
    );
}

/// 画图例
pub fn draw_legend(doc: &mut SvgDocument, x: f64, y: f64, title: &str, entries: &[(String, &str)]) {
    doc.text(x, y, title, TextStyle::new(12.0).anchor(Anchor::Start).bold());
    for (i, (label, color)) in entries.iter().enumerate() {
        let row_y = y + 20.0 + i as f64 * 18.0;
        doc.rect(x, row_y - 10.0, 12.0, 12.0, color, 1.0);
        doc.text(
            x + 18.0,
            row_y,
            label,
            TextStyle::new(11.0).anchor(Anchor::Start),
        );
    }
}

/// 对模型名称排序：`MODEL_ORDER` 中的在前，其余按字母序
pub fn order_models(names: &[String]) -> Vec<String> {
    let short = |name: &str| name.rsplit('/').next().unwrap_or(name).to_string();

    let mut ordered: Vec<String> = Vec::with_capacity(names.len());
    for preferred in MODEL_ORDER {
        for name in names {
            if short(name) == preferred && !ordered.contains(name) {
                ordered.push(name.clone());
            }
        }
    }

    let mut rest: Vec<String> = names
        .iter()
        .filter(|n| !ordered.contains(n))
        .cloned()
        .collect();
    rest.sort();
    rest.dedup();
    ordered.extend(rest);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_models() {
        let names = vec![
            "openrouter/x-ai/grok-4".to_string(),
            "openrouter/qwen/qwen3-max".to_string(),
            "openai/gpt-4o".to_string(),
            "openai/gpt-5".to_string(),
            "anthropic/alpha".to_string(),
        ];
        assert_eq!(
            order_models(&names),
            vec![
                "openai/gpt-5",
                "openai/gpt-4o",
                "openrouter/x-ai/grok-4",
                "anthropic/alpha",
                "openrouter/qwen/qwen3-max",
            ]
        );
    }

    #[test]
    fn test_y_for_clamps() {
        let area = PlotArea {
            x: 0.0,
            y: 10.0,
            w: 100.0,
            h: 100.0,
        };
        assert_eq!(area.y_for(1.0), 10.0);
        assert_eq!(area.y_for(0.0), 110.0);
        assert_eq!(area.y_for(-1.0), 110.0);
    }
}

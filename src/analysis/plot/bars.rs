//! 单个博弈的分组柱状图：横轴为对手设定，每组按出手顺序分柱

use crate::analysis::aggregate::{cell, AggregateRow};
use crate::analysis::plot::svg::{palette, SvgDocument, TextStyle};
use crate::analysis::plot::{draw_legend, draw_value_axis, PlotArea};
use crate::models::game::GameType;
use crate::models::variant::{MoveOrderVariant, PlayersVariant};

/// 渲染柱状图；该博弈没有数据时返回 `None`
pub fn render_grouped_bars(rows: &[AggregateRow], game: GameType) -> Option<String> {
    if !rows.iter().any(|r| r.game == game) {
        return None;
    }

    let mut doc = SvgDocument::new(1000.0, 600.0);
    let area = PlotArea {
        x: 100.0,
        y: 60.0,
        w: 700.0,
        h: 420.0,
    };

    doc.text(
        area.x + area.w / 2.0,
        32.0,
        &format!("Superrationality Scores: {}", game.title()),
        TextStyle::new(16.0).bold(),
    );
    draw_value_axis(&mut doc, area, game.score_label());

    let groups = PlayersVariant::PLOT_ORDER;
    let orders = MoveOrderVariant::ALL;
    let group_width = area.w / groups.len() as f64;
    let bar_width = group_width * 0.25;
    let group_pad = (group_width - bar_width * orders.len() as f64) / 2.0;

    for (g, player) in groups.iter().enumerate() {
        let group_x = area.x + g as f64 * group_width;

        for (o, order) in orders.iter().enumerate() {
            // 缺失的格子按 0 处理
            let value = cell(rows, game, *player, *order).unwrap_or(0.0);
            let x = group_x + group_pad + o as f64 * bar_width;
            let y = area.y_for(value);
            doc.rect(x, y, bar_width, area.bottom() - y, palette(o), 1.0);
        }

        doc.text(
            group_x + group_width / 2.0,
            area.bottom() + 20.0,
            &wrap_label(player.bar_label(), 22),
            TextStyle::new(11.0),
        );
    }

    doc.text(
        area.x + area.w / 2.0,
        area.bottom() + 85.0,
        "Other players are said to be...",
        TextStyle::new(13.0),
    );

    let legend: Vec<(String, &str)> = orders
        .iter()
        .enumerate()
        .map(|(o, order)| (order.label().to_string(), palette(o)))
        .collect();
    draw_legend(&mut doc, area.x + area.w + 30.0, area.y + 10.0, "Move Order", &legend);

    Some(doc.finish())
}

/// 按单词把长标签折成多行
pub(crate) fn wrap_label(label: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in label.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

//! 热力图：行是模型，列是对手设定，格子为各出手顺序的平均得分

use crate::analysis::aggregate::{mean_by_player, AggregateRow};
use crate::analysis::plot::bars::wrap_label;
use crate::analysis::plot::order_models;
use crate::analysis::plot::svg::{viridis, Anchor, SvgDocument, TextStyle};
use crate::models::game::GameType;
use crate::models::variant::PlayersVariant;

const CELL_W: f64 = 140.0;
const CELL_H: f64 = 40.0;

/// 渲染某个博弈的热力图
///
/// `models` 为 (模型名称, 该模型日志的汇总结果)
pub fn render_heatmap(models: &[(String, Vec<AggregateRow>)], game: GameType) -> String {
    let names: Vec<String> = models.iter().map(|(name, _)| name.clone()).collect();
    let ordered = order_models(&names);
    let columns = PlayersVariant::PLOT_ORDER;

    let label_w = 260.0;
    let top = 80.0;
    let grid_w = CELL_W * columns.len() as f64;
    let grid_h = CELL_H * ordered.len().max(1) as f64;

    let mut doc = SvgDocument::new(label_w + grid_w + 140.0, top + grid_h + 110.0);

    doc.text(
        label_w + grid_w / 2.0,
        36.0,
        &format!("Superrationality Heatmap: {}", game.title()),
        TextStyle::new(18.0).bold(),
    );

    for (r, name) in ordered.iter().enumerate() {
        let y = top + r as f64 * CELL_H;
        doc.text(
            label_w - 10.0,
            y + CELL_H / 2.0 + 5.0,
            name,
            TextStyle::new(13.0).anchor(Anchor::End),
        );

        let rows = models
            .iter()
            .find(|(model, _)| model == name)
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or(&[]);

        for (c, player) in columns.iter().enumerate() {
            let x = label_w + c as f64 * CELL_W;
            match mean_by_player(rows, game, *player) {
                Some(value) => {
                    doc.rect(x, y, CELL_W, CELL_H, &viridis(value), 1.0);
                    let fill = if value > 0.6 { "#000000" } else { "#ffffff" };
                    doc.text(
                        x + CELL_W / 2.0,
                        y + CELL_H / 2.0 + 5.0,
                        &format!("{:.2}", value),
                        TextStyle::new(13.0).fill(fill),
                    );
                }
                None => {
                    doc.rect(x, y, CELL_W, CELL_H, "#dddddd", 1.0);
                }
            }
        }
    }

    for (c, player) in columns.iter().enumerate() {
        doc.text(
            label_w + c as f64 * CELL_W + CELL_W / 2.0,
            top + grid_h + 22.0,
            &wrap_label(player.short_label(), 18),
            TextStyle::new(12.0),
        );
    }

    doc.text(
        label_w + grid_w / 2.0,
        top + grid_h + 85.0,
        "Other players are said to be...",
        TextStyle::new(15.0),
    );
    doc.text(
        label_w - 200.0,
        top + grid_h / 2.0,
        "Model",
        TextStyle::new(15.0).rotate(-90.0),
    );

    draw_colorbar(&mut doc, label_w + grid_w + 30.0, top, grid_h);

    doc.finish()
}

fn draw_colorbar(doc: &mut SvgDocument, x: f64, y: f64, h: f64) {
    let steps = 50;
    let step_h = h / steps as f64;
    for i in 0..steps {
        let value = 1.0 - i as f64 / (steps - 1) as f64;
        doc.rect(x, y + i as f64 * step_h, 20.0, step_h + 0.5, &viridis(value), 1.0);
    }
    doc.outline(x, y, 20.0, h, "#000000");
    doc.text(x + 26.0, y + 10.0, "1.0", TextStyle::new(11.0).anchor(Anchor::Start));
    doc.text(x + 26.0, y + h, "0.0", TextStyle::new(11.0).anchor(Anchor::Start));
    doc.text(
        x + 60.0,
        y + h / 2.0,
        "Proportion Superrational",
        TextStyle::new(12.0).rotate(90.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extract::Detected;
    use crate::models::variant::MoveOrderVariant;

    fn agg(player: PlayersVariant, value: f64) -> AggregateRow {
        AggregateRow {
            game: GameType::PrisonerDilemma,
            player_variant: Detected::Known(player),
            move_order: Detected::Known(MoveOrderVariant::Default),
            prop_superrational: value,
            prop_send: None,
            n_samples: 10,
        }
    }

    #[test]
    fn test_heatmap_annotates_cells() {
        let models = vec![
            ("openai/gpt-4o".to_string(), vec![agg(PlayersVariant::SameModel, 0.25)]),
            ("openai/gpt-5".to_string(), vec![agg(PlayersVariant::OtherHumans, 0.9)]),
        ];
        let svg = render_heatmap(&models, GameType::PrisonerDilemma);
        assert!(svg.contains("Superrationality Heatmap: Prisoner Dilemma"));
        assert!(svg.contains(">0.25<"));
        assert!(svg.contains(">0.90<"));
        // gpt-5 排在 gpt-4o 之前
        let gpt5 = svg.find("openai/gpt-5").unwrap();
        let gpt4o = svg.find("openai/gpt-4o").unwrap();
        assert!(gpt5 < gpt4o);
    }
}

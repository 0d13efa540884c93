//! 折线对比图
//!
//! 三种对比共用同一个渲染函数：
//! - 多模型对比：每个模型一条线，横轴为对手设定
//! - 博弈对比：每个博弈一条线，分"理性"与"一般"两个面板
//! - 两模型对比：每个博弈一条线，横轴为两个模型

use std::collections::HashSet;

use crate::analysis::aggregate::{mean_by_player, AggregateRow};
use crate::analysis::plot::bars::wrap_label;
use crate::analysis::plot::svg::{palette, SvgDocument, TextStyle};
use crate::analysis::plot::{draw_legend, draw_value_axis, order_models, PlotArea};
use crate::models::game::GameType;
use crate::models::variant::PlayersVariant;

/// 一条折线；`None` 表示缺失，折线在此断开
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// 一个折线图面板
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

const PANEL_W: f64 = 560.0;
const PANEL_H: f64 = 420.0;

/// 横向排列多个面板，图例放在最右侧
pub fn render_line_panels(panels: &[LineChart], legend_title: &str) -> String {
    let legend_w = 240.0;
    let width = 110.0 + panels.len().max(1) as f64 * (PANEL_W + 110.0) + legend_w;
    let mut doc = SvgDocument::new(width, PANEL_H + 190.0);

    for (p, chart) in panels.iter().enumerate() {
        let area = PlotArea {
            x: 110.0 + p as f64 * (PANEL_W + 110.0),
            y: 70.0,
            w: PANEL_W,
            h: PANEL_H,
        };
        draw_panel(&mut doc, area, chart);
    }

    if let Some(first) = panels.first() {
        let legend: Vec<(String, &str)> = first
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), palette(i)))
            .collect();
        draw_legend(&mut doc, width - legend_w + 10.0, 80.0, legend_title, &legend);
    }

    doc.finish()
}

fn draw_panel(doc: &mut SvgDocument, area: PlotArea, chart: &LineChart) {
    doc.text(
        area.x + area.w / 2.0,
        area.y - 25.0,
        &chart.title,
        TextStyle::new(15.0).bold(),
    );
    draw_value_axis(doc, area, &chart.y_label);

    let n = chart.categories.len().max(1);
    let step = area.w / n as f64;
    let x_for = |i: usize| area.x + step * (i as f64 + 0.5);

    for (i, category) in chart.categories.iter().enumerate() {
        doc.text(
            x_for(i),
            area.bottom() + 20.0,
            &wrap_label(category, 20),
            TextStyle::new(11.0),
        );
    }
    doc.text(
        area.x + area.w / 2.0,
        area.bottom() + 80.0,
        &chart.x_label,
        TextStyle::new(13.0),
    );

    for (s, series) in chart.series.iter().enumerate() {
        let color = palette(s);
        let mut previous: Option<(f64, f64)> = None;

        for (i, value) in series.values.iter().enumerate() {
            match value {
                Some(v) => {
                    let point = (x_for(i), area.y_for(*v));
                    if let Some((px, py)) = previous {
                        doc.line(px, py, point.0, point.1, color, 2.0, 0.8);
                    }
                    doc.circle(point.0, point.1, 5.0, color, 0.8);
                    previous = Some(point);
                }
                None => previous = None,
            }
        }
    }
}

/// 多模型对比：某个博弈下各模型随对手设定的变化
pub fn model_comparison(models: &[(String, Vec<AggregateRow>)], game: GameType) -> LineChart {
    let names: Vec<String> = models.iter().map(|(name, _)| name.clone()).collect();
    let players = PlayersVariant::PLOT_ORDER;

    let series = order_models(&names)
        .into_iter()
        .map(|name| {
            let rows = models
                .iter()
                .find(|(model, _)| *model == name)
                .map(|(_, rows)| rows.as_slice())
                .unwrap_or(&[]);
            Series {
                values: players
                    .iter()
                    .map(|p| mean_by_player(rows, game, *p))
                    .collect(),
                name,
            }
        })
        .collect();

    LineChart {
        title: format!("Model Comparison: {}", game.title()),
        x_label: "Other players are said to be...".to_string(),
        y_label: game.score_label().to_string(),
        categories: players.iter().map(|p| p.short_label().to_string()).collect(),
        series,
    }
}

/// 博弈对比：左面板为理性 AI / 理性人类，右面板为 AI / 人类
///
/// 排除后没有可画的博弈时返回 `None`
pub fn games_comparison(rows: &[AggregateRow], excluded: &HashSet<GameType>) -> Option<[LineChart; 2]> {
    let games: Vec<GameType> = GameType::ALL
        .into_iter()
        .filter(|g| !excluded.contains(g))
        .filter(|g| rows.iter().any(|r| r.game == *g))
        .collect();

    if games.is_empty() {
        return None;
    }

    let panel = |title: &str, players: [(PlayersVariant, &str); 2]| LineChart {
        title: title.to_string(),
        x_label: "Other players are said to be...".to_string(),
        y_label: "Superrational Score".to_string(),
        categories: players.iter().map(|(_, label)| label.to_string()).collect(),
        series: games
            .iter()
            .map(|game| Series {
                name: game.display_name().to_string(),
                values: players
                    .iter()
                    .map(|(p, _)| mean_by_player(rows, *game, *p))
                    .collect(),
            })
            .collect(),
    };

    Some([
        panel(
            "Rational Agents Comparison",
            [
                (PlayersVariant::DiffModelSimilarlyRational, "Rational AI"),
                (PlayersVariant::OtherRationalHumans, "Rational Humans"),
            ],
        ),
        panel(
            "General Agents Comparison",
            [
                (PlayersVariant::DiffModelOtherAgents, "AI"),
                (PlayersVariant::OtherHumans, "Humans"),
            ],
        ),
    ])
}

/// 两模型对比：对手设定为"同一模型的实例"，每个博弈一条线
///
/// 两个模型都没有数据的博弈不画；全部缺失时返回 `None`
pub fn two_models_comparison(
    first: (&str, &[AggregateRow]),
    second: (&str, &[AggregateRow]),
) -> Option<LineChart> {
    let player = PlayersVariant::SameModel;

    let series: Vec<Series> = GameType::ALL
        .into_iter()
        .map(|game| Series {
            name: game.display_name().to_string(),
            values: vec![
                mean_by_player(first.1, game, player),
                mean_by_player(second.1, game, player),
            ],
        })
        .filter(|s| s.values.iter().any(Option::is_some))
        .collect();

    if series.is_empty() {
        return None;
    }

    Some(LineChart {
        title: "Model Comparison Across Games\n(Instances of Same Model)".to_string(),
        x_label: "Model".to_string(),
        y_label: "Superrational Score".to_string(),
        categories: vec![first.0.to_string(), second.0.to_string()],
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extract::Detected;
    use crate::models::variant::MoveOrderVariant;

    fn agg(game: GameType, player: PlayersVariant, value: f64) -> AggregateRow {
        AggregateRow {
            game,
            player_variant: Detected::Known(player),
            move_order: Detected::Known(MoveOrderVariant::Default),
            prop_superrational: value,
            prop_send: None,
            n_samples: 10,
        }
    }

    #[test]
    fn test_model_comparison_series_per_model() {
        let models = vec![
            ("a/m1".to_string(), vec![agg(GameType::WolfDilemma, PlayersVariant::SameModel, 0.5)]),
            ("a/m2".to_string(), vec![]),
        ];
        let chart = model_comparison(&models, GameType::WolfDilemma);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.categories.len(), 5);
        assert_eq!(chart.series[0].values[0], Some(0.5));
        assert!(chart.series[1].values.iter().all(Option::is_none));
    }

    #[test]
    fn test_games_comparison_respects_exclusions() {
        let rows = vec![
            agg(GameType::PrisonerDilemma, PlayersVariant::OtherHumans, 0.2),
            agg(GameType::WolfDilemma, PlayersVariant::OtherRationalHumans, 0.7),
        ];

        let panels = games_comparison(&rows, &HashSet::new()).unwrap();
        assert_eq!(panels[0].series.len(), 2);
        assert_eq!(panels[1].series[0].name, "Prisoner's Dilemma (2P)");
        assert_eq!(panels[1].series[0].values, vec![None, Some(0.2)]);
        assert_eq!(panels[0].series[1].values, vec![None, Some(0.7)]);

        let excluded: HashSet<_> = [GameType::PrisonerDilemma, GameType::WolfDilemma].into();
        assert!(games_comparison(&rows, &excluded).is_none());
    }

    #[test]
    fn test_two_models_skips_empty_games() {
        let first = vec![agg(GameType::PrisonerDilemma, PlayersVariant::SameModel, 1.0)];
        let second = vec![agg(GameType::PrisonerDilemma, PlayersVariant::OtherHumans, 0.0)];
        let chart = two_models_comparison(("m1", &first), ("m2", &second)).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].values, vec![Some(1.0), None]);

        assert!(two_models_comparison(("m1", &[]), ("m2", &[])).is_none());
    }

    #[test]
    fn test_render_breaks_lines_on_gaps() {
        let chart = LineChart {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            categories: vec!["a".into(), "b".into(), "c".into()],
            series: vec![Series {
                name: "s".into(),
                values: vec![Some(0.1), None, Some(0.9)],
            }],
        };
        let svg = render_line_panels(&[chart], "Game");
        assert_eq!(svg.matches("<circle").count(), 2);
        // 只有网格线和坐标轴，没有连线
        assert!(!svg.contains("stroke-width=\"2.0\""));
    }
}

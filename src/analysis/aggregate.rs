//! 按 (博弈, 对手设定, 出手顺序) 汇总

use std::collections::BTreeMap;

use crate::analysis::extract::{AnalysisRow, Detected};
use crate::models::game::GameType;
use crate::models::variant::{MoveOrderVariant, PlayersVariant};

/// 汇总后的一行
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub game: GameType,
    pub player_variant: Detected<PlayersVariant>,
    pub move_order: Detected<MoveOrderVariant>,
    pub prop_superrational: f64,
    /// 只有 Platonia 博弈有值
    pub prop_send: Option<f64>,
    pub n_samples: usize,
}

type GroupKey = (GameType, Detected<PlayersVariant>, Detected<MoveOrderVariant>);

/// 分组汇总，结果按三个键的字符串排序
pub fn aggregate(rows: &[AnalysisRow]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<GroupKey, Vec<&AnalysisRow>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.game, row.player_variant, row.move_order))
            .or_default()
            .push(row);
    }

    let mut aggregated: Vec<AggregateRow> = groups
        .into_iter()
        .map(|((game, player_variant, move_order), group)| {
            let total = group.len();
            let superrational = group.iter().filter(|r| r.is_superrational).count();

            let sends: Vec<bool> = group.iter().filter_map(|r| r.is_send).collect();
            let prop_send = (!sends.is_empty())
                .then(|| sends.iter().filter(|s| **s).count() as f64 / sends.len() as f64);

            AggregateRow {
                game,
                player_variant,
                move_order,
                prop_superrational: superrational as f64 / total as f64,
                prop_send,
                n_samples: total,
            }
        })
        .collect();

    aggregated.sort_by_cached_key(|r| {
        (
            r.game.key(),
            r.player_variant.to_string(),
            r.move_order.to_string(),
        )
    });
    aggregated
}

/// 某个博弈、某个对手设定下，各出手顺序的平均得分
pub fn mean_by_player(rows: &[AggregateRow], game: GameType, player: PlayersVariant) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .filter(|r| r.game == game && r.player_variant == Detected::Known(player))
        .map(|r| r.prop_superrational)
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// 某个格子的得分
pub fn cell(
    rows: &[AggregateRow],
    game: GameType,
    player: PlayersVariant,
    move_order: MoveOrderVariant,
) -> Option<f64> {
    rows.iter()
        .find(|r| {
            r.game == game
                && r.player_variant == Detected::Known(player)
                && r.move_order == Detected::Known(move_order)
        })
        .map(|r| r.prop_superrational)
}

/// 出现过的博弈（按 key 排序）
pub fn games_present(rows: &[AggregateRow]) -> Vec<GameType> {
    let mut games: Vec<GameType> = rows.iter().map(|r| r.game).collect();
    games.sort_by_key(|g| g.key());
    games.dedup();
    games
}

use async_trait::async_trait;
use std::sync::Arc;
use superrational_agents::analysis::{aggregate, analyze_log};
use superrational_agents::error::{AppResult, LlmError};
use superrational_agents::models::load_eval_log;
use superrational_agents::orchestrator::{analyze_file, plot_log};
use superrational_agents::{ChatModel, Config, EvalRunner, GameType};

/// 总是做出超理性选择的模型
struct SuperrationalModel;

#[async_trait]
impl ChatModel for SuperrationalModel {
    fn name(&self) -> &str {
        "fake/superrational"
    }

    async fn generate(&self, user_message: &str, _system_message: Option<&str>) -> AppResult<String> {
        let answer = if user_message.contains("NOTSEND") {
            "I will send with a small probability.\nANSWER: SEND"
        } else if user_message.contains("REFRAIN") {
            "Everyone reasons the same way.\nANSWER: REFRAIN"
        } else {
            "We are alike, so I cooperate.\nANSWER: C"
        };
        Ok(answer.to_string())
    }
}

/// 狼困境一律调用失败的模型
struct FlakyModel;

#[async_trait]
impl ChatModel for FlakyModel {
    fn name(&self) -> &str {
        "fake/flaky"
    }

    async fn generate(&self, user_message: &str, _system_message: Option<&str>) -> AppResult<String> {
        if user_message.contains("REFRAIN") {
            return Err(LlmError::EmptyContent {
                model: self.name().to_string(),
            }
            .into());
        }
        Ok("ANSWER: D".to_string())
    }
}

/// 总是调用失败的模型
struct DownModel;

#[async_trait]
impl ChatModel for DownModel {
    fn name(&self) -> &str {
        "fake/down"
    }

    async fn generate(&self, _user_message: &str, _system_message: Option<&str>) -> AppResult<String> {
        Err(LlmError::EmptyResponse {
            model: self.name().to_string(),
        }
        .into())
    }
}

struct FixedGrader;

#[async_trait]
impl ChatModel for FixedGrader {
    fn name(&self) -> &str {
        "fake/grader"
    }

    async fn generate(&self, _user_message: &str, _system_message: Option<&str>) -> AppResult<String> {
        Ok("The submission uses randomization.\nGRADE: C".to_string())
    }
}

fn test_config(log_dir: &std::path::Path, epochs: usize) -> Config {
    Config {
        epochs,
        max_connections: 8,
        log_dir: log_dir.display().to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_full_eval_then_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let runner = EvalRunner::new(
        test_config(dir.path(), 2),
        Arc::new(SuperrationalModel),
        Arc::new(FixedGrader),
    );

    let outcome = runner.run().await.unwrap();
    assert_eq!(outcome.log.samples.len(), 180);
    assert_eq!(outcome.log.results.completed_samples, 180);
    assert!((outcome.log.results.accuracy - 1.0).abs() < 1e-9);
    assert_eq!(outcome.log.results.stderr, 0.0);
    assert!(outcome.log_path.exists());
    assert!(outcome.log.error.is_none());

    // 日志可以重新加载
    let log = load_eval_log(&outcome.log_path).await.unwrap();
    assert_eq!(log.eval.model, "fake/superrational");
    assert_eq!(log.eval.grader_model, "fake/grader");

    let rows = analyze_log(&log);
    assert_eq!(rows.len(), 180);
    assert!(rows.iter().all(|r| r.is_superrational));

    let aggregated = aggregate(&rows);
    assert_eq!(aggregated.len(), 90);
    assert_eq!(aggregated.iter().map(|r| r.n_samples).sum::<usize>(), 180);
    for row in &aggregated {
        let is_platonia = matches!(
            row.game,
            GameType::PlatoniaDilemma | GameType::PlatoniaDilemmaWithProvidedRandomness
        );
        assert_eq!(row.prop_send.is_some(), is_platonia);
    }

    let csv_path = dir.path().join("out").join("results.csv");
    analyze_file(&outcome.log_path, &csv_path).await.unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("game_key,player_variant,move_order_variant,prop_superrational,prop_send,n_samples"));
    assert_eq!(csv.lines().count(), 91);

    let plots = plot_log(&outcome.log_path, &dir.path().join("plots")).await.unwrap();
    assert_eq!(plots.len(), 6);
    assert!(plots.iter().all(|p| p.extension().unwrap() == "svg"));
}

#[tokio::test]
async fn test_failed_generations_are_recorded_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        limit: Some(90),
        ..test_config(dir.path(), 1)
    };
    let runner = EvalRunner::new(config, Arc::new(FlakyModel), Arc::new(FixedGrader));

    let outcome = runner.run().await.unwrap();
    let failed: Vec<_> = outcome.log.samples.iter().filter(|r| r.error.is_some()).collect();
    // 两个狼困境 × 15 个变体
    assert_eq!(failed.len(), 30);
    assert!(failed.iter().all(|r| r.scores.is_empty()));
    assert_eq!(outcome.log.results.completed_samples, 60);

    let rows = analyze_log(&outcome.log);
    assert_eq!(rows.len(), 60);
    assert!(rows
        .iter()
        .filter(|r| r.game == GameType::PrisonerDilemma)
        .all(|r| !r.is_superrational));
}

#[tokio::test]
async fn test_run_error_recorded_when_nothing_scored() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        limit: Some(3),
        ..test_config(dir.path(), 1)
    };
    let runner = EvalRunner::new(config, Arc::new(DownModel), Arc::new(FixedGrader));

    let outcome = runner.run().await.unwrap();
    assert_eq!(outcome.log.results.completed_samples, 0);
    let message = outcome.log.error.clone().unwrap();
    assert!(message.contains("fake/down"));

    let reloaded = load_eval_log(&outcome.log_path).await.unwrap();
    assert_eq!(reloaded.error, outcome.log.error);
    assert!(analyze_log(&reloaded).is_empty());
}

#[tokio::test]
async fn test_limit_truncates_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        limit: Some(5),
        ..test_config(dir.path(), 3)
    };
    let runner = EvalRunner::new(config, Arc::new(SuperrationalModel), Arc::new(FixedGrader));

    let outcome = runner.run().await.unwrap();
    assert_eq!(outcome.log.eval.dataset_samples, 5);
    assert_eq!(outcome.log.samples.len(), 15);
    assert_eq!(outcome.log.samples[0].epoch, 1);
    assert_eq!(outcome.log.samples[14].epoch, 3);
}

#[tokio::test]
async fn test_zero_epochs_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let runner = EvalRunner::new(
        test_config(dir.path(), 0),
        Arc::new(SuperrationalModel),
        Arc::new(FixedGrader),
    );
    assert!(runner.run().await.is_err());
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_live_eval_single_sample() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        limit: Some(1),
        ..test_config(dir.path(), 1)
    };

    let runner = EvalRunner::from_config(config).expect("创建模型客户端失败");
    let outcome = runner.run().await.expect("评测失败");

    assert_eq!(outcome.log.samples.len(), 1);
}

pub mod answer;
pub mod llm_service;
pub mod log_writer;
pub mod model_grader;
pub mod scorer;

pub use llm_service::{ChatModel, LlmService, ModelRef, Provider};
pub use log_writer::LogWriter;
pub use model_grader::ModelGrader;
pub use scorer::{compute_metrics, Metrics, SuperrationalScorer};

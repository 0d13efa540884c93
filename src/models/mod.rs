pub mod eval_log;
pub mod game;
pub mod loaders;
pub mod sample;
pub mod variant;

pub use eval_log::{EvalLog, EvalResults, EvalSpec, SampleMetadata, SampleRecord, Score, ScoreValue};
pub use game::{GameFamily, GameType};
pub use loaders::{list_log_files, load_all_logs, load_eval_log};
pub use sample::{build_dataset, Sample, Target};
pub use variant::{MoveOrderVariant, PlayersVariant};

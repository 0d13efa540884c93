pub mod sample_ctx;
pub mod sample_flow;

pub use sample_ctx::SampleCtx;
pub use sample_flow::SampleFlow;

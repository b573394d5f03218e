pub mod error;
pub mod job;
pub mod pipeline;
pub mod report;
pub mod results;
pub mod runner;

pub use error::{PipelineError, PipelineResult};
pub use job::{CorrelationJob, JOB_FIELD_COUNT};
pub use pipeline::{CorrelationPipeline, PipelineOutcome};
pub use report::BatchSummary;
pub use results::{read_results, CorrelationResult, ResultsWriter};
pub use runner::JobRunner;

//! Middleware pipeline execution

use super::{Middleware, MiddlewareError, PipelineContext};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Threads a payload through an ordered list of middleware steps
#[async_trait]
pub trait PipelineExecutor: Send + Sync {
    /// Run every step in order. Step N+1 starts only after step N has
    /// completed; the first failure is returned and later steps are skipped.
    async fn run(
        &self,
        payload: PipelineContext,
        steps: &[Arc<dyn Middleware>],
    ) -> Result<PipelineContext, MiddlewareError>;
}

/// Default executor: a plain loop with early exit
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialPipeline;

impl SequentialPipeline {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PipelineExecutor for SequentialPipeline {
    async fn run(
        &self,
        mut payload: PipelineContext,
        steps: &[Arc<dyn Middleware>],
    ) -> Result<PipelineContext, MiddlewareError> {
        for (index, step) in steps.iter().enumerate() {
            debug!(middleware = step.name(), step = index, "Running middleware");
            payload = step.handle(payload).await.map_err(|err| {
                debug!(middleware = step.name(), error = %err, "Middleware aborted the pipeline");
                err
            })?;
        }
        Ok(payload)
    }
}

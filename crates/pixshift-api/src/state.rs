//! Application state shared by every handler.

use pixshift_core::Config;
use pixshift_processing::{PipelineOptions, RasterCodec, TransformPipeline};
use pixshift_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub pipeline: Arc<TransformPipeline>,
}

impl AppState {
    /// Wire the pipeline around `storage` with the `image`-backed codec.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let codec = Arc::new(RasterCodec::new(config.default_jpeg_quality()));
        let pipeline = TransformPipeline::new(
            codec,
            Arc::clone(&storage),
            PipelineOptions::from(&config),
        );

        Self {
            config,
            storage,
            pipeline: Arc::new(pipeline),
        }
    }
}

//! Request dispatch
//!
//! Thin layer that validates the request, picks the aggregator variant and
//! runs one streaming pipeline. Errors propagate to the caller with their
//! original classification; no failed run is ever converted into a default
//! or empty response.

use evreg_client::{Aggregator, ChunkSource, DatasetConfig, Error, Pipeline, Result, transport};

use crate::request::{DataTarget, StatsRequest, parse_request, validate};
use crate::response::StatsResponse;

/// Handle one raw request body against the production dataset.
pub async fn handle(raw: &str) -> Result<StatsResponse> {
    let request = parse_request(raw)?;
    let config = DatasetConfig::default();
    let source = transport::fetch(&config.url).await?;
    process(&request, &config, source).await
}

/// Run one request against an explicit configuration and chunk source.
pub async fn process<S: ChunkSource>(
    request: &StatsRequest,
    config: &DatasetConfig,
    source: S,
) -> Result<StatsResponse> {
    validate(request)?;
    let aggregator = match request.target {
        DataTarget::Count => Aggregator::counter(),
        DataTarget::AvgAutonomy => {
            let maker = request.maker.as_deref().ok_or_else(|| {
                Error::request_validation("\"maker\" is required for avg_autonomy")
            })?;
            Aggregator::average(maker, config.bev_marker.clone())
        }
    };

    tracing::debug!(target = ?request.target, "starting aggregation pipeline");
    let mut pipeline = Pipeline::new(config, source);
    let output = pipeline.run(aggregator).await?;
    Ok(output.into())
}

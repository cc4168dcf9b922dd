//! Gateway selection from configuration.

use std::sync::Arc;

use tracing::info;

use seathold_core::config::{StoreConfig, StoreProvider};
use seathold_core::error::AppError;
use seathold_core::result::AppResult;

use crate::gateway::DocumentGateway;
use crate::providers::MemoryGateway;

/// Build the document gateway selected by `config.provider`.
pub async fn build_gateway(config: &StoreConfig) -> AppResult<Arc<dyn DocumentGateway>> {
    let gateway: Arc<dyn DocumentGateway> = match config.provider {
        #[cfg(feature = "json-file")]
        StoreProvider::JsonFile => Arc::new(
            crate::providers::JsonFileGateway::new(&config.path, config.pretty).await?,
        ),
        #[cfg(not(feature = "json-file"))]
        StoreProvider::JsonFile => {
            return Err(AppError::configuration(
                "json_file provider requires the `json-file` feature",
            ));
        }
        StoreProvider::Memory => Arc::new(MemoryGateway::new()),
    };

    if !gateway.health_check().await? {
        return Err(AppError::service_unavailable(format!(
            "Document gateway '{}' is not reachable",
            gateway.provider_type()
        )));
    }

    info!(provider = %config.provider, "Document gateway ready");
    Ok(gateway)
}

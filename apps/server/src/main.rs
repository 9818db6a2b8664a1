mod dto;
mod routes;

use std::sync::Arc;

use ai_file_common::{init_logging, AppConfig};
use ai_file_engine::{AnalysisProvider, HttpAnalysisProvider};

fn main() {
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let provider: Arc<dyn AnalysisProvider> = match HttpAnalysisProvider::new(&config) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            log::error!("failed to build analysis client: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");
    let server = tiny_http::Server::http(&config.listen_addr)
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", config.listen_addr, e));

    log::info!(
        "[AiFileManager] listening on {}, analysis endpoint: {}",
        config.listen_addr,
        config.analysis_endpoint
    );

    for request in server.incoming_requests() {
        routes::handle(request, &config, &provider, runtime.handle());
    }
}

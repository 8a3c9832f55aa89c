use crate::api::routes;
use crate::config::SharedConfig;
use crate::probe::DynProbeExecutor;
use std::future::Future;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub executor: DynProbeExecutor,
}

pub fn new(
    config: SharedConfig,
    executor: DynProbeExecutor,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.api_bind_addr)
        .serve(routes::new(AppState { config, executor }).into_make_service())
}

use std::sync::Arc;

use salvo::async_trait;

use crate::error::AppResult;
use fipe_core::error::CoreError;
use fipe_store::store::HistoryStore;

pub struct StoreProviderHandler {
    pub store: Arc<HistoryStore>,
}

#[async_trait]
impl salvo::Handler for StoreProviderHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the history store from the depot.
///
/// ## Errors
/// Returns an error if the history store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<HistoryStore>> {
    depot
        .obtain::<Arc<HistoryStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("History store not found in depot").into())
}

//! The dependent lookup cache: one table per stage of the
//! type → brand → model → year chain.
//!
//! ## Summary
//! `CachedCatalog` wraps the upstream client with three keyed tables and
//! fills each entry wholesale on first use. Entries are never partially
//! updated: a key is either absent, replaced in full, or dropped by
//! `clear`. A failed fetch leaves its entry absent so the next call hits
//! upstream again instead of pinning the failure.
//!
//! The cache is an explicit object with an owner-defined lifetime,
//! constructed per session and injected where needed; there is no
//! module-global state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fipe_core::types::{Brand, Model, PricedVehicle, VehicleType, YearEntry};

use crate::client::CatalogClient;
use crate::error::CatalogResult;

#[derive(Debug, Default)]
struct Tables {
    brands: HashMap<VehicleType, Arc<Vec<Brand>>>,
    models: HashMap<(VehicleType, String), Arc<Vec<Model>>>,
    years: HashMap<(VehicleType, String, i64), Arc<Vec<YearEntry>>>,
}

/// Caching front over the upstream catalog.
#[derive(Debug)]
pub struct CachedCatalog {
    client: CatalogClient,
    tables: Mutex<Tables>,
}

impl CachedCatalog {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            tables: Mutex::new(Tables::default()),
        }
    }

    /// ## Summary
    /// Returns the brand list for `vehicle_type`, fetching and caching it on
    /// first use.
    ///
    /// ## Errors
    /// Returns an error when the upstream fetch fails; the cache entry stays
    /// absent so the next call retries.
    pub async fn brands(&self, vehicle_type: VehicleType) -> CatalogResult<Arc<Vec<Brand>>> {
        if let Some(cached) = self.tables().brands.get(&vehicle_type).cloned() {
            tracing::trace!(%vehicle_type, "Brand cache hit");
            return Ok(cached);
        }

        let fetched = Arc::new(self.client.fetch_brands(vehicle_type).await?);
        self.tables()
            .brands
            .insert(vehicle_type, Arc::clone(&fetched));
        Ok(fetched)
    }

    /// ## Summary
    /// Returns the model list for `(vehicle_type, brand_code)`, fetching and
    /// caching it on first use. Only the `modelos` half of the upstream
    /// response is cached.
    ///
    /// ## Errors
    /// Returns an error when the upstream fetch fails; the cache entry stays
    /// absent so the next call retries.
    pub async fn models(
        &self,
        vehicle_type: VehicleType,
        brand_code: &str,
    ) -> CatalogResult<Arc<Vec<Model>>> {
        let key = (vehicle_type, brand_code.to_string());
        if let Some(cached) = self.tables().models.get(&key).cloned() {
            tracing::trace!(%vehicle_type, brand_code, "Model cache hit");
            return Ok(cached);
        }

        let response = self.client.fetch_models(vehicle_type, brand_code).await?;
        let fetched = Arc::new(response.models);
        self.tables().models.insert(key, Arc::clone(&fetched));
        Ok(fetched)
    }

    /// ## Summary
    /// Returns the year-entry list for `(vehicle_type, brand_code,
    /// model_code)`, fetching and caching it on first use.
    ///
    /// ## Errors
    /// Returns an error when the upstream fetch fails; the cache entry stays
    /// absent so the next call retries.
    pub async fn years(
        &self,
        vehicle_type: VehicleType,
        brand_code: &str,
        model_code: i64,
    ) -> CatalogResult<Arc<Vec<YearEntry>>> {
        let key = (vehicle_type, brand_code.to_string(), model_code);
        if let Some(cached) = self.tables().years.get(&key).cloned() {
            tracing::trace!(%vehicle_type, brand_code, model_code, "Year cache hit");
            return Ok(cached);
        }

        let fetched = Arc::new(
            self.client
                .fetch_years(vehicle_type, brand_code, model_code)
                .await?,
        );
        self.tables().years.insert(key, Arc::clone(&fetched));
        Ok(fetched)
    }

    /// ## Summary
    /// Fetches the priced result for a fully specified tuple. Prices are
    /// never cached; every consultation hits upstream.
    ///
    /// ## Errors
    /// Returns an error when the upstream fetch fails.
    pub async fn price(
        &self,
        vehicle_type: VehicleType,
        brand_code: &str,
        model_code: i64,
        year_code: &str,
    ) -> CatalogResult<PricedVehicle> {
        self.client
            .fetch_price(vehicle_type, brand_code, model_code, year_code)
            .await
    }

    /// Empties all three tables unconditionally. Subsequent lookups
    /// re-fetch from upstream. Invocable at any time; selection state is
    /// not this object's concern.
    pub fn clear(&self) {
        let mut tables = self.tables();
        tables.brands.clear();
        tables.models.clear();
        tables.years.clear();
        tracing::debug!("Lookup cache cleared");
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

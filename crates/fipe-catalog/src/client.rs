//! Typed HTTP client for the upstream read-only catalog.

use std::time::Duration;

use serde::de::DeserializeOwned;

use fipe_core::config::CatalogConfig;
use fipe_core::constants::{BRANDS_PATH_SEGMENT, MODELS_PATH_SEGMENT, YEARS_PATH_SEGMENT};
use fipe_core::types::{Brand, ModelsResponse, PricedVehicle, VehicleType, YearEntry};

use crate::error::{CatalogError, CatalogResult};

/// HTTP client over the hierarchical catalog
/// (`/{tipo}/marcas/{brand}/modelos/{model}/anos/{year}`).
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// ## Summary
    /// Creates a client for the catalog rooted at `base_url`.
    ///
    /// ## Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> CatalogResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// ## Summary
    /// Creates a client from the `catalog` configuration section.
    ///
    /// ## Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// ## Summary
    /// Fetches the brand list for a vehicle type.
    ///
    /// ## Errors
    /// Returns an error on transport failure, a non-2xx upstream status, or
    /// an undecodable body.
    pub async fn fetch_brands(&self, vehicle_type: VehicleType) -> CatalogResult<Vec<Brand>> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            vehicle_type.as_path_segment(),
            BRANDS_PATH_SEGMENT
        );
        self.get_json(&url).await
    }

    /// ## Summary
    /// Fetches the model list for a brand.
    ///
    /// ## Errors
    /// Returns an error on transport failure, a non-2xx upstream status, or
    /// an undecodable body.
    pub async fn fetch_models(
        &self,
        vehicle_type: VehicleType,
        brand_code: &str,
    ) -> CatalogResult<ModelsResponse> {
        let url = format!(
            "{}/{}/{}/{}/{}",
            self.base_url,
            vehicle_type.as_path_segment(),
            BRANDS_PATH_SEGMENT,
            brand_code,
            MODELS_PATH_SEGMENT
        );
        self.get_json(&url).await
    }

    /// ## Summary
    /// Fetches the year-entry list for a model.
    ///
    /// ## Errors
    /// Returns an error on transport failure, a non-2xx upstream status, or
    /// an undecodable body.
    pub async fn fetch_years(
        &self,
        vehicle_type: VehicleType,
        brand_code: &str,
        model_code: i64,
    ) -> CatalogResult<Vec<YearEntry>> {
        let url = format!(
            "{}/{}/{}/{}/{}/{}/{}",
            self.base_url,
            vehicle_type.as_path_segment(),
            BRANDS_PATH_SEGMENT,
            brand_code,
            MODELS_PATH_SEGMENT,
            model_code,
            YEARS_PATH_SEGMENT
        );
        self.get_json(&url).await
    }

    /// ## Summary
    /// Fetches the priced result for a fully specified tuple.
    ///
    /// ## Errors
    /// Returns an error on transport failure, a non-2xx upstream status, or
    /// an undecodable body.
    pub async fn fetch_price(
        &self,
        vehicle_type: VehicleType,
        brand_code: &str,
        model_code: i64,
        year_code: &str,
    ) -> CatalogResult<PricedVehicle> {
        let url = format!(
            "{}/{}/{}/{}/{}/{}/{}/{}",
            self.base_url,
            vehicle_type.as_path_segment(),
            BRANDS_PATH_SEGMENT,
            brand_code,
            MODELS_PATH_SEGMENT,
            model_code,
            YEARS_PATH_SEGMENT,
            year_code
        );
        self.get_json(&url).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> CatalogResult<T> {
        tracing::debug!("Fetching from upstream catalog");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Upstream catalog request failed");
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

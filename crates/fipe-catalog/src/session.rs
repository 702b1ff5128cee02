//! Per-session selection state over the cached catalog.
//!
//! ## Summary
//! A `LookupSession` walks the `Idle → TypeSelected → BrandSelected →
//! ModelSelected → YearSelected → ResultReady` chain. Any upstream
//! selection change rewinds the downstream selections and visible option
//! lists; the cache tables themselves are untouched and stay reusable for
//! other keys.
//!
//! ## Stale responses
//! Option-list fetches are tagged with the selection generation active when
//! they were issued. A completion whose tag no longer matches the current
//! generation is discarded without touching visible state, which stands in
//! for cancellation of in-flight upstream requests.

use std::sync::Arc;

use fipe_core::types::{Brand, HistoryRecord, Model, PricedVehicle, VehicleType, YearEntry};
use fipe_core::util::year_label;

use crate::cache::CachedCatalog;
use crate::error::{CatalogError, CatalogResult};

/// Progress of a lookup session through the dependency chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    TypeSelected,
    BrandSelected,
    ModelSelected,
    YearSelected,
    ResultReady,
}

/// Identifies the selection a fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTag(u64);

/// Whether a tagged completion reached visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Committed,
    Discarded,
}

impl Applied {
    #[must_use]
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// One user-visible lookup session.
#[derive(Debug)]
pub struct LookupSession {
    catalog: Arc<CachedCatalog>,
    generation: u64,
    vehicle_type: Option<VehicleType>,
    brands: Arc<Vec<Brand>>,
    models: Arc<Vec<Model>>,
    years: Arc<Vec<YearEntry>>,
    selected_brand: Option<Brand>,
    selected_model: Option<Model>,
    selected_year: Option<YearEntry>,
    result: Option<PricedVehicle>,
}

impl LookupSession {
    #[must_use]
    pub fn new(catalog: Arc<CachedCatalog>) -> Self {
        Self {
            catalog,
            generation: 0,
            vehicle_type: None,
            brands: Arc::new(Vec::new()),
            models: Arc::new(Vec::new()),
            years: Arc::new(Vec::new()),
            selected_brand: None,
            selected_model: None,
            selected_year: None,
            result: None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        if self.result.is_some() {
            Stage::ResultReady
        } else if self.selected_year.is_some() {
            Stage::YearSelected
        } else if self.selected_model.is_some() {
            Stage::ModelSelected
        } else if self.selected_brand.is_some() {
            Stage::BrandSelected
        } else if self.vehicle_type.is_some() {
            Stage::TypeSelected
        } else {
            Stage::Idle
        }
    }

    /// The tag identifying the current selection; capture it when issuing a
    /// fetch and pass it back to the matching `apply_*` on completion.
    #[must_use]
    pub fn fetch_tag(&self) -> FetchTag {
        FetchTag(self.generation)
    }

    #[must_use]
    pub fn vehicle_type(&self) -> Option<VehicleType> {
        self.vehicle_type
    }

    #[must_use]
    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    #[must_use]
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    #[must_use]
    pub fn years(&self) -> &[YearEntry] {
        &self.years
    }

    #[must_use]
    pub fn selected_brand(&self) -> Option<&Brand> {
        self.selected_brand.as_ref()
    }

    #[must_use]
    pub fn selected_model(&self) -> Option<&Model> {
        self.selected_model.as_ref()
    }

    #[must_use]
    pub fn selected_year(&self) -> Option<&YearEntry> {
        self.selected_year.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&PricedVehicle> {
        self.result.as_ref()
    }

    /// Distinct year values offered by the current year-entry list.
    #[must_use]
    pub fn available_years(&self) -> Vec<String> {
        year_label::year_values(&self.years)
    }

    /// The fuel qualifier of the current year selection.
    #[must_use]
    pub fn selected_fuel(&self) -> Option<String> {
        self.selected_year
            .as_ref()
            .map(|entry| year_label::split_year_label(&entry.label).fuel)
    }

    /// Selects the vehicle type. Rewinds brand, model, and year selections
    /// and their option lists; cache tables are untouched.
    pub fn select_vehicle_type(&mut self, vehicle_type: VehicleType) {
        if self.vehicle_type == Some(vehicle_type) {
            return;
        }
        tracing::debug!(%vehicle_type, "Vehicle type selected");
        self.generation += 1;
        self.vehicle_type = Some(vehicle_type);
        self.brands = Arc::new(Vec::new());
        self.rewind_from_brand();
    }

    /// Selects a brand by code from the current brand list. Rewinds model
    /// and year selections, whether or not the new brand's model list is
    /// already cached.
    pub fn select_brand(&mut self, brand_code: &str) {
        self.generation += 1;
        self.selected_brand = self
            .brands
            .iter()
            .find(|brand| brand.code == brand_code)
            .cloned();
        tracing::debug!(brand_code, found = self.selected_brand.is_some(), "Brand selected");
        self.rewind_from_model();
    }

    /// Selects a model by code from the current model list. Rewinds the
    /// year selection.
    pub fn select_model(&mut self, model_code: i64) {
        self.generation += 1;
        self.selected_model = self
            .models
            .iter()
            .find(|model| model.code == model_code)
            .cloned();
        tracing::debug!(model_code, found = self.selected_model.is_some(), "Model selected");
        self.rewind_from_year();
    }

    /// Selects a year by its 4-digit value, picking the preferred entry
    /// among those sharing the year (diesel-named models prefer diesel,
    /// then gasoline, then the first entry).
    pub fn select_year(&mut self, year: &str) {
        let model_name = self
            .selected_model
            .as_ref()
            .map_or("", |model| model.name.as_str());
        self.selected_year = year_label::preferred_entry(model_name, year, &self.years).cloned();
        self.result = None;
        tracing::debug!(year, found = self.selected_year.is_some(), "Year selected");
    }

    /// ## Summary
    /// Loads the brand list for the selected vehicle type through the cache
    /// and applies it.
    ///
    /// ## Errors
    /// Returns an error when no vehicle type is selected or the upstream
    /// fetch fails; the option list is left as it was.
    pub async fn refresh_brands(&mut self) -> CatalogResult<()> {
        let vehicle_type = self
            .vehicle_type
            .ok_or(CatalogError::IncompleteSelection("vehicle type"))?;
        let tag = self.fetch_tag();
        let brands = self.catalog.brands(vehicle_type).await?;
        self.apply_brands(tag, brands);
        Ok(())
    }

    /// Applies a completed brand fetch. Discarded when `tag` no longer
    /// matches the current selection.
    pub fn apply_brands(&mut self, tag: FetchTag, brands: Arc<Vec<Brand>>) -> Applied {
        if tag != self.fetch_tag() {
            tracing::debug!("Discarding stale brand list");
            return Applied::Discarded;
        }
        self.brands = brands;
        Applied::Committed
    }

    /// ## Summary
    /// Loads the model list for the selected (type, brand) through the
    /// cache and applies it.
    ///
    /// ## Errors
    /// Returns an error when the selection is incomplete or the upstream
    /// fetch fails; the option list is left as it was.
    pub async fn refresh_models(&mut self) -> CatalogResult<()> {
        let vehicle_type = self
            .vehicle_type
            .ok_or(CatalogError::IncompleteSelection("vehicle type"))?;
        let brand = self
            .selected_brand
            .clone()
            .ok_or(CatalogError::IncompleteSelection("brand"))?;
        let tag = self.fetch_tag();
        let models = self.catalog.models(vehicle_type, &brand.code).await?;
        self.apply_models(tag, models);
        Ok(())
    }

    /// Applies a completed model fetch. Discarded when `tag` no longer
    /// matches the current selection.
    pub fn apply_models(&mut self, tag: FetchTag, models: Arc<Vec<Model>>) -> Applied {
        if tag != self.fetch_tag() {
            tracing::debug!("Discarding stale model list");
            return Applied::Discarded;
        }
        self.models = models;
        Applied::Committed
    }

    /// ## Summary
    /// Loads the year-entry list for the selected (type, brand, model)
    /// through the cache and applies it.
    ///
    /// ## Errors
    /// Returns an error when the selection is incomplete or the upstream
    /// fetch fails; the option list is left as it was.
    pub async fn refresh_years(&mut self) -> CatalogResult<()> {
        let vehicle_type = self
            .vehicle_type
            .ok_or(CatalogError::IncompleteSelection("vehicle type"))?;
        let brand = self
            .selected_brand
            .clone()
            .ok_or(CatalogError::IncompleteSelection("brand"))?;
        let model = self
            .selected_model
            .clone()
            .ok_or(CatalogError::IncompleteSelection("model"))?;
        let tag = self.fetch_tag();
        let years = self
            .catalog
            .years(vehicle_type, &brand.code, model.code)
            .await?;
        self.apply_years(tag, years);
        Ok(())
    }

    /// Applies a completed year fetch and reconciles the fuel qualifier of
    /// any existing year selection against the new list. Discarded when
    /// `tag` no longer matches the current selection.
    pub fn apply_years(&mut self, tag: FetchTag, years: Arc<Vec<YearEntry>>) -> Applied {
        if tag != self.fetch_tag() {
            tracing::debug!("Discarding stale year list");
            return Applied::Discarded;
        }
        self.years = years;
        self.reconcile_fuel();
        Applied::Committed
    }

    /// ## Summary
    /// Fetches the priced result for the fully specified tuple. On success
    /// the session reaches `ResultReady` and exactly one history record is
    /// produced for the caller to persist.
    ///
    /// ## Errors
    /// Returns an error when the selection is incomplete or the upstream
    /// fetch fails; the session stays at `YearSelected` so the caller can
    /// retry.
    pub async fn consult(&mut self) -> CatalogResult<(PricedVehicle, HistoryRecord)> {
        let vehicle_type = self
            .vehicle_type
            .ok_or(CatalogError::IncompleteSelection("vehicle type"))?;
        let brand = self
            .selected_brand
            .clone()
            .ok_or(CatalogError::IncompleteSelection("brand"))?;
        let model = self
            .selected_model
            .clone()
            .ok_or(CatalogError::IncompleteSelection("model"))?;
        let year = self
            .selected_year
            .clone()
            .ok_or(CatalogError::IncompleteSelection("year"))?;

        let priced = self
            .catalog
            .price(vehicle_type, &brand.code, model.code, &year.code)
            .await?;

        let record = HistoryRecord {
            vehicle_type: vehicle_type.as_path_segment().to_string(),
            brand: brand.name,
            model: model.name,
            year: year_label::split_year_label(&year.label).year,
        };

        tracing::info!(
            brand = %record.brand,
            model = %record.model,
            year = %record.year,
            "Consultation completed"
        );
        self.result = Some(priced.clone());
        Ok((priced, record))
    }

    fn rewind_from_brand(&mut self) {
        self.selected_brand = None;
        self.rewind_from_model();
    }

    fn rewind_from_model(&mut self) {
        self.selected_model = None;
        self.models = Arc::new(Vec::new());
        self.rewind_from_year();
    }

    fn rewind_from_year(&mut self) {
        self.selected_year = None;
        self.years = Arc::new(Vec::new());
        self.result = None;
    }

    /// Re-applies the fuel preference when the qualifier set for the
    /// selected year changed under the selection.
    fn reconcile_fuel(&mut self) {
        let Some(current) = self.selected_year.clone() else {
            return;
        };

        // The exact entry survived the refresh: re-bind and keep it
        if let Some(entry) = self.years.iter().find(|entry| entry.code == current.code) {
            self.selected_year = Some(entry.clone());
            return;
        }

        let split = year_label::split_year_label(&current.label);
        if split.year.is_empty() {
            self.selected_year = None;
            return;
        }
        let model_name = self
            .selected_model
            .as_ref()
            .map_or("", |model| model.name.as_str());
        self.selected_year =
            year_label::preferred_entry(model_name, &split.year, &self.years).cloned();
    }
}

/// Route component constants shared across crates
pub const HISTORY_ROUTE_COMPONENT: &str = "historico";
pub const HISTORY_ROUTE_PREFIX: &str = const_str::concat!("/", HISTORY_ROUTE_COMPONENT);

pub const HEALTHCHECK_ROUTE_COMPONENT: &str = "healthcheck";

/// Upstream catalog path segments (`/{tipo}/marcas/{brand}/modelos/{model}/anos/{year}`)
pub const BRANDS_PATH_SEGMENT: &str = "marcas";
pub const MODELS_PATH_SEGMENT: &str = "modelos";
pub const YEARS_PATH_SEGMENT: &str = "anos";

/// Public reference-price API used when no `catalog.base_url` is configured
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://parallelum.com.br/fipe/api/v1";

/// A leading 4-digit run above this value is not a model year; the whole
/// label is then treated as a fuel qualifier.
pub const YEAR_SANITY_CEILING: u32 = 2300;

/// Fuel-qualifier markers, matched case-insensitively against catalog labels
pub const DIESEL_MARKER: &str = "diesel";
pub const GASOLINE_MARKER: &str = "gasolina";

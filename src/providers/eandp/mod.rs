//! International E&P client.
//!
//! Supports:
//! - Field header lookup by field id
//! - Reservoir lookup by reservoir id
//! - Flattening every published reservoir view into one table
//!
//! Field and reservoir tables keep positional row numbering; view rows are
//! labelled with their view name.

use std::fmt;

use crate::core::credentials::EandpCredentials;
use crate::core::decode::decode_elements;
use crate::core::http::Session;
use crate::core::query::{encode_id, require_id, select_fragment};
use crate::core::table::Table;
use crate::core::vendor::Vendor;
use crate::core::views::fetch_views;
use crate::error::{RefDataError, Result};
use crate::storage::config::ResolvedConfig;

use super::{ClientOptions, VendorClient};

/// Field header retrieval endpoint, relative to the API root.
const FIELD_HEADER_PATH: &str = "adm/eandp/retrieve/field_header";

/// Reservoir retrieval endpoint, relative to the API root.
const RESERVOIR_PATH: &str = "adm/reservoir/retrieve/field_reservoirs";

/// Reservoir views listing, relative to the API root.
const VIEWS_PATH: &str = "adm/reservoir/views";

/// Columns selected for field header lookups.
pub const FIELD_COLUMNS: &[&str] = &[
    "fie_id",
    "field_name",
    "country_names",
    "region_name",
    "general_hc_type",
    "hc_type",
    "field_sqkm",
    "prod_status",
    "basin_name",
    "gp_id",
    "political_province",
    "ons_offshore",
    "terrain",
    "porosity_max_val_pct",
    "permeab_max_val_md",
    "latitude_dec_deg",
    "longitude_dec_deg",
    "cur_operator_names",
    "operator_puh_id",
];

/// Columns selected for reservoir lookups.
pub const RESERVOIR_COLUMNS: &[&str] = &[
    "resv_id",
    "reservoir_unit_name",
    "field_name",
    "parent_lithostrat_unit",
    "lithostrat_unit",
    "lithologies",
    "play_name",
    "depth_ref_elevation_meter",
    "top_depth_meter",
    "top_depth_type",
    "gross_thickn_max_val_meter",
    "gross_thickn_max_val_feet",
    "gross_thickn_qual_unit",
    "net_thickn_max_val_meter",
    "net_thickn_max_val_feet",
    "net_thickn_qual_unit",
    "porosity_min_pct",
    "porosity_avg_pct",
    "porosity_max_pct",
    "permeab_min_md",
    "permeab_avg_md",
    "permeab_max_md",
    "pressure_psi",
    "salinity_max_val_ppm",
];

// =============================================================================
// Client
// =============================================================================

/// Client for the International E&P service.
#[derive(Debug, Clone)]
pub struct EandpClient {
    session: Session,
    base_url: String,
    view_concurrency: usize,
}

impl EandpClient {
    /// Client with default options.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(credentials: &EandpCredentials) -> Result<Self> {
        Self::with_options(credentials, ClientOptions::default())
    }

    /// Client with explicit transport options.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn with_options(credentials: &EandpCredentials, options: ClientOptions) -> Result<Self> {
        Ok(Self {
            session: Session::new(credentials, options.timeout)?,
            base_url: Vendor::Eandp.base_url().to_string(),
            view_concurrency: options.view_concurrency.max(1),
        })
    }

    /// Client built from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::AuthNotConfigured`] when no Connect API key is
    /// configured.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let key = config
            .connect_api_key
            .as_deref()
            .ok_or_else(|| RefDataError::AuthNotConfigured {
                vendor: Vendor::Eandp.display_name().to_string(),
            })?;
        Self::with_options(&EandpCredentials::new(key)?, ClientOptions::from_config(config))
    }

    /// Point the client at another API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Configured view fetch concurrency.
    #[must_use]
    pub const fn view_concurrency(&self) -> usize {
        self.view_concurrency
    }

    /// Field header URL for `field_id`, with the column selection appended.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::InvalidArgument`] for a blank id.
    pub fn field_header_url(&self, field_id: &str) -> Result<String> {
        let id = require_id("field id", field_id)?;
        Ok(format!(
            "{}?$filter=fie_id={}{}",
            self.endpoint(FIELD_HEADER_PATH),
            encode_id(id),
            select_fragment(FIELD_COLUMNS)?
        ))
    }

    /// Reservoir URL for `reservoir_id`, with the column selection appended.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::InvalidArgument`] for a blank id.
    pub fn reservoir_url(&self, reservoir_id: &str) -> Result<String> {
        let id = require_id("reservoir id", reservoir_id)?;
        Ok(format!(
            "{}?%24filter=resv_id%3D{}{}",
            self.endpoint(RESERVOIR_PATH),
            encode_id(id),
            select_fragment(RESERVOIR_COLUMNS)?
        ))
    }

    /// Reservoir views listing URL.
    #[must_use]
    pub fn views_url(&self) -> String {
        self.endpoint(VIEWS_PATH)
    }

    /// Field header record(s) for `field_id`.
    ///
    /// # Errors
    ///
    /// Returns the classified error when the request fails. A successful
    /// response of an unexpected shape yields an empty table instead.
    pub async fn field_data_by_id(&self, field_id: impl fmt::Display) -> Result<Table> {
        let url = self.field_header_url(&field_id.to_string())?;
        tracing::info!(%url, "fetching field header");
        let response = self.session.get_classified(&url, &[]).await?;
        Ok(decode_elements(&url, &response.body))
    }

    /// Reservoir record(s) for `reservoir_id`.
    ///
    /// # Errors
    ///
    /// Returns the classified error when the request fails. A successful
    /// response of an unexpected shape yields an empty table instead.
    pub async fn reservoir_data_by_id(&self, reservoir_id: impl fmt::Display) -> Result<Table> {
        let url = self.reservoir_url(&reservoir_id.to_string())?;
        tracing::info!(%url, "fetching reservoir");
        let response = self.session.get_classified(&url, &[]).await?;
        Ok(decode_elements(&url, &response.body))
    }

    /// Every published reservoir view, flattened into one deduplicated
    /// table indexed by view name.
    ///
    /// # Errors
    ///
    /// Returns the first classified error from the listing or any view
    /// detail, or [`RefDataError::ParseResponse`] for a listing or detail of
    /// the wrong shape. No partial table is returned.
    pub async fn get_views_from_api(&self) -> Result<Table> {
        fetch_views(&self.session, &self.views_url(), self.view_concurrency).await
    }
}

impl VendorClient for EandpClient {
    fn vendor(&self) -> Vendor {
        Vendor::Eandp
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn session(&self) -> &Session {
        &self.session
    }
}

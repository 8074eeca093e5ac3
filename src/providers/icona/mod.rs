//! ICONA company database client.
//!
//! Both lookups label every returned row with the requested company id.

use std::fmt;

use crate::core::credentials::IconaCredentials;
use crate::core::decode::{decode_labeled, decode_single_labeled};
use crate::core::http::Session;
use crate::core::query::{encode_id, require_id};
use crate::core::table::Table;
use crate::core::vendor::Vendor;
use crate::error::{RefDataError, Result};
use crate::storage::config::ResolvedConfig;

use super::{ClientOptions, VendorClient};

const COMPANY_PATH: &str = "company";
const PARENT_CHILD_TREE_PATH: &str = "company/parentchildtree";

/// Client for the ICONA company API.
#[derive(Debug, Clone)]
pub struct IconaClient {
    session: Session,
    base_url: String,
}

impl IconaClient {
    /// Client with default options.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(credentials: &IconaCredentials) -> Result<Self> {
        Self::with_options(credentials, ClientOptions::default())
    }

    /// Client with explicit transport options.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn with_options(credentials: &IconaCredentials, options: ClientOptions) -> Result<Self> {
        Ok(Self {
            session: Session::new(credentials, options.timeout)?,
            base_url: Vendor::Icona.base_url().to_string(),
        })
    }

    /// Client built from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::AuthNotConfigured`] when no ICONA key is
    /// configured.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let key = config
            .icona_key
            .as_deref()
            .ok_or_else(|| RefDataError::AuthNotConfigured {
                vendor: Vendor::Icona.display_name().to_string(),
            })?;
        Self::with_options(&IconaCredentials::new(key)?, ClientOptions::from_config(config))
    }

    /// Point the client at another API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Company search URL for `company_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::InvalidArgument`] for a blank id.
    pub fn company_url(&self, company_id: &str) -> Result<String> {
        let id = require_id("company id", company_id)?;
        Ok(format!(
            "{}?SearchString=C%3A{}",
            self.endpoint(COMPANY_PATH),
            encode_id(id)
        ))
    }

    /// Parent/child tree URL for `company_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::InvalidArgument`] for a blank id.
    pub fn parent_child_tree_url(&self, company_id: &str) -> Result<String> {
        let id = require_id("company id", company_id)?;
        Ok(format!(
            "{}/{}",
            self.endpoint(PARENT_CHILD_TREE_PATH),
            encode_id(id)
        ))
    }

    /// Basic company record for `company_id`: one row labelled with the id.
    ///
    /// # Errors
    ///
    /// Returns the classified error when the request fails. A successful
    /// response that is not exactly one record yields an empty table instead.
    pub async fn get_basics_by_company_id(&self, company_id: impl fmt::Display) -> Result<Table> {
        let company_id = company_id.to_string();
        let url = self.company_url(&company_id)?;
        let label = company_id.trim();
        tracing::info!(%url, company_id = label, "fetching company basics");
        let response = self.session.get_classified(&url, &[]).await?;
        Ok(decode_single_labeled(&url, &response.body, label))
    }

    /// Corporate parent/child tree for `company_id`, labelled with the id.
    ///
    /// # Errors
    ///
    /// Returns the classified error when the request fails. A successful
    /// response of an unexpected shape yields an empty table instead.
    pub async fn get_parent_child_tree_by_id(
        &self,
        company_id: impl fmt::Display,
    ) -> Result<Table> {
        let company_id = company_id.to_string();
        let url = self.parent_child_tree_url(&company_id)?;
        let label = company_id.trim();
        tracing::info!(%url, company_id = label, "fetching company tree");
        let response = self.session.get_classified(&url, &[]).await?;
        Ok(decode_labeled(&url, &response.body, label))
    }
}

impl VendorClient for IconaClient {
    fn vendor(&self) -> Vendor {
        Vendor::Icona
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn session(&self) -> &Session {
        &self.session
    }
}

//! HTTP client for the SharePoint REST surface.
//!
//! Both endpoints speak the verbose OData dialect, so every request
//! carries `application/json;odata=verbose` accept and content types.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::auth::BearerToken;
use super::constants::{LIST_TITLE, ODATA_VERBOSE, SITE_URL};
use super::models::{ListItemPayload, ResolvedIdentity, SiteUserResponse};
use crate::upload::types::RowError;

/// Remote operations the row loop needs from the site.
#[async_trait]
pub trait SiteClient {
    /// Resolve an email address to its site user id.
    async fn resolve_user(&self, email: &str) -> Result<ResolvedIdentity, RowError>;

    /// Create one list item. Succeeds only on HTTP 201.
    async fn add_item(&self, payload: &ListItemPayload) -> Result<(), RowError>;
}

pub struct SharePointClient {
    http: reqwest::Client,
    site_url: String,
    token: BearerToken,
}

impl SharePointClient {
    pub fn new(token: BearerToken) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ODATA_VERBOSE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(ODATA_VERBOSE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build the HTTP client")?;

        Ok(Self {
            http,
            site_url: SITE_URL.to_string(),
            token,
        })
    }
}

#[async_trait]
impl SiteClient for SharePointClient {
    async fn resolve_user(&self, email: &str) -> Result<ResolvedIdentity, RowError> {
        let url = user_lookup_url(&self.site_url, email);
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.secret())
            .send()
            .await
            .map_err(RowError::request)?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(RowError::Lookup {
                email: email.to_string(),
                status,
            });
        }

        let body: SiteUserResponse = response.json().await.map_err(RowError::request)?;
        log::debug!("resolved {} to site user id {}", email, body.d.id);
        Ok(ResolvedIdentity {
            email: email.to_string(),
            id: body.d.id,
        })
    }

    async fn add_item(&self, payload: &ListItemPayload) -> Result<(), RowError> {
        let body = serde_json::to_vec(payload).map_err(RowError::request)?;
        let response = self
            .http
            .post(add_item_url(&self.site_url))
            .bearer_auth(self.token.secret())
            .body(body)
            .send()
            .await
            .map_err(RowError::request)?;

        let status = response.status().as_u16();
        if status == 201 {
            Ok(())
        } else {
            Err(RowError::Submission { status })
        }
    }
}

fn user_lookup_url(site_url: &str, email: &str) -> String {
    format!(
        "{site_url}/_api/web/siteusers/getbyemail('{}')",
        urlencoding::encode(email)
    )
}

fn add_item_url(site_url: &str) -> String {
    format!("{site_url}/_api/web/lists/getbytitle('{LIST_TITLE}')/items")
}

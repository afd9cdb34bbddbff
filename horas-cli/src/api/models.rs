//! Wire types for the token endpoint and the SharePoint REST surface.

use serde::{Deserialize, Serialize};

use super::constants::LIST_ITEM_METADATA_TYPE;
use crate::upload::types::TrainingRecord;

/// Dates are sent as midnight timestamps, the shape the list columns expect.
const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%dT00:00:00";

/// Successful response from the token endpoint. Fields the flow does not
/// consume (token_type and friends) are left to serde's default skipping.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
}

/// Error body the identity provider returns on a rejected grant.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

/// Verbose OData envelope of `siteusers/getbyemail`.
#[derive(Debug, Deserialize)]
pub struct SiteUserResponse {
    pub d: SiteUser,
}

#[derive(Debug, Deserialize)]
pub struct SiteUser {
    #[serde(rename = "Id")]
    pub id: i64,
}

/// A site user resolved from an email address.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIdentity {
    pub email: String,
    pub id: i64,
}

/// Item body POSTed to the training list.
///
/// Property names are the internal names of the list columns, encoded the
/// way SharePoint encodes spaces and accents. The resolved user id goes
/// into both person columns.
#[derive(Debug, Clone, Serialize)]
pub struct ListItemPayload {
    #[serde(rename = "__metadata")]
    pub metadata: ItemMetadata,
    #[serde(rename = "NOMEDOINTEGRANTEId")]
    pub member_id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "CARGAHORARIA")]
    pub hours: String,
    #[serde(rename = "TIPO_x0020_DO_x0020_TREINAMENTO_")]
    pub training_type: String,
    #[serde(rename = "INICIO_x0020_DO_x0020_TREINAMENT")]
    pub start_date: String,
    #[serde(rename = "TERMINO_x0020_DO_x0020_TREINAMEN")]
    pub end_date: String,
    #[serde(rename = "TIPO_")]
    pub category: String,
    #[serde(rename = "INSTITUI_x00c7__x00c3_O_x002f_IN")]
    pub institution: String,
    #[serde(rename = "UNIDADE")]
    pub unit: String,
    #[serde(rename = "E_x002d_MAILId")]
    pub email_user_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemMetadata {
    #[serde(rename = "type")]
    pub item_type: String,
}

impl ListItemPayload {
    /// Build the list item for a record and its resolved user id.
    pub fn from_record(record: &TrainingRecord, user_id: i64) -> Self {
        Self {
            metadata: ItemMetadata {
                item_type: LIST_ITEM_METADATA_TYPE.to_string(),
            },
            member_id: user_id,
            title: record.training_name.clone(),
            hours: record.hours.clone(),
            training_type: record.training_type.clone(),
            start_date: record.start_date.format(DATE_OUTPUT_FORMAT).to_string(),
            end_date: record.end_date.format(DATE_OUTPUT_FORMAT).to_string(),
            category: record.category.clone(),
            institution: record.institution_or_instructor.clone(),
            unit: record.unit.clone(),
            email_user_id: user_id,
        }
    }
}

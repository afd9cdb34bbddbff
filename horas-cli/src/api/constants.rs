//! Deployment constants for the SharePoint tenant and target list.

/// Site that hosts the training list.
pub const SITE_URL: &str = "https://queirozcavalcanti.sharepoint.com/sites/qca360";

/// Resource scope requested for the client-credentials grant.
pub const SCOPE: &str = "https://queirozcavalcanti.sharepoint.com/.default";

/// Display title of the target list.
pub const LIST_TITLE: &str = "Treinamento de atividades";

/// OData type tag expected by the list's item endpoint.
pub const LIST_ITEM_METADATA_TYPE: &str = "SP.Data.Treinamentos_x005f_qcaListItem";

/// Accept/Content-Type used by the verbose OData surface.
pub const ODATA_VERBOSE: &str = "application/json;odata=verbose";

pub const CLIENT_ASSERTION_TYPE: &str = "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";

/// Lifetime of the signed client assertion, in seconds.
pub const ASSERTION_VALIDITY_SECS: i64 = 600;

/// v2.0 token endpoint for a tenant.
pub fn token_endpoint(tenant_id: &str) -> String {
    format!("https://login.microsoftonline.com/{tenant_id}/oauth2/v2.0/token")
}

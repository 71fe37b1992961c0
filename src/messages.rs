/// Messages exchanged between surfaces, the background worker and the content script
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Background → page: resolve the current site URL
    GetSiteUrl,
    /// Any surface → background: rebuild the context menu
    UpdateContextMenus,
}

/// Page answer to `getSiteUrl`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteUrlResponse {
    #[serde(default)]
    pub site_url: Option<String>,
}

impl SiteUrlResponse {
    pub fn new(site_url: String) -> Self {
        SiteUrlResponse { site_url: Some(site_url) }
    }

    /// The URL if the page gave a non-empty one
    pub fn usable_url(&self) -> Option<&str> {
        self.site_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Acknowledgement for `updateContextMenus`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        assert_eq!(serde_json::to_value(Request::GetSiteUrl).unwrap(), json!({"action": "getSiteUrl"}));
        assert_eq!(
            serde_json::to_value(Request::UpdateContextMenus).unwrap(),
            json!({"action": "updateContextMenus"})
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(serde_json::from_value::<Request>(json!({"action": "other"})).is_err());
    }

    #[test]
    fn test_site_url_response() {
        let response: SiteUrlResponse =
            serde_json::from_value(json!({"siteUrl": "https://t.sharepoint.com"})).unwrap();
        assert_eq!(response.usable_url(), Some("https://t.sharepoint.com"));

        let empty: SiteUrlResponse = serde_json::from_value(json!({"siteUrl": ""})).unwrap();
        assert_eq!(empty.usable_url(), None);

        let missing: SiteUrlResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.usable_url(), None);
    }

    #[test]
    fn test_ack_wire_format() {
        assert_eq!(serde_json::to_value(Ack { success: true }).unwrap(), json!({"success": true}));
    }
}

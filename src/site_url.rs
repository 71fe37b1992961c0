/// SharePoint site base URL resolution
///
/// Order, first match wins:
/// 1. `_spPageContextInfo.webAbsoluteUrl` when the page exposes it
/// 2. `.sharepoint.com` host: `/sites/<name>` site collection, else the host root
/// 3. `msapplication-starturl` / `og:url` meta content on `.sharepoint.com`,
///    cut to the first three path segments (`/sites/hr/SitePages/Home.aspx` → `/sites/hr/SitePages`)
/// 4. The page origin
///
/// Examples:
/// - https://t.sharepoint.com/sites/hr/Lists/x.aspx → https://t.sharepoint.com/sites/hr
/// - https://t.sharepoint.com/SitePages/home.aspx → https://t.sharepoint.com
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

const SHAREPOINT_HOST: &str = ".sharepoint.com";

/// What the content script reads from the visited page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    /// `_spPageContextInfo.webAbsoluteUrl`, if the global exists
    pub web_absolute_url: Option<String>,
    /// `window.location.href`
    pub href: String,
    /// `window.location.origin`
    pub origin: String,
    /// `content` of the `msapplication-starturl` and `og:url` meta tags, in document order
    pub meta_urls: Vec<String>,
}

#[derive(Debug)]
enum ResolveError {
    Url(url::ParseError),
}

impl From<url::ParseError> for ResolveError {
    fn from(e: url::ParseError) -> Self {
        ResolveError::Url(e)
    }
}

/// Best-guess base URL of the current site. Never fails; falls back to the origin.
pub fn resolve_site_url(page: &PageSnapshot) -> String {
    match try_resolve(page) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Error extracting SharePoint site URL: {:?}", e);
            page.origin.clone()
        }
    }
}

fn try_resolve(page: &PageSnapshot) -> Result<String, ResolveError> {
    if let Some(url) = page.web_absolute_url.as_deref().filter(|u| !u.is_empty()) {
        return Ok(url.to_string());
    }

    let location = Url::parse(&page.href)
        .ok()
        .filter(|url| url.host_str().is_some_and(|host| host.contains(SHAREPOINT_HOST)));
    if let Some(location) = location {
        return Ok(from_location(&location));
    }

    for content in &page.meta_urls {
        if content.contains(SHAREPOINT_HOST) {
            return from_meta(content);
        }
    }

    Ok(page.origin.clone())
}

fn sites_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/sites/([^/]+)").unwrap())
}

fn from_location(url: &Url) -> String {
    let base = origin_of(url);

    let name = sites_segment()
        .captures(url.path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    match name {
        Some(name) => format!("{}/sites/{}", base, name),
        None => base,
    }
}

fn from_meta(content: &str) -> Result<String, ResolveError> {
    let url = Url::parse(content)?;
    let prefix: Vec<&str> = url.path().split('/').take(4).collect();
    Ok(format!("{}{}", origin_of(&url), prefix.join("/")))
}

/// `<scheme>://<host[:port]>`
fn origin_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}

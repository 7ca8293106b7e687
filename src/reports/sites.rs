//! Property-level listings: accessible properties and submitted sitemaps.

use serde::Serialize;

use crate::auth::Authenticator;
use crate::client::{SearchConsoleClient, SiteEntry, Sitemap};
use crate::error::GscResult;
use crate::format::{Render, Tabular, format_table, format_timestamp};

use super::ReportKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertiesReport {
    pub report: ReportKind,
    pub sites: Vec<SiteEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Render for PropertiesReport {
    fn tabular(&self) -> Tabular {
        let mut data = Tabular::new(["siteUrl", "permissionLevel"]);
        for site in &self.sites {
            data.push(vec![site.site_url.clone(), site.permission_level.clone()]);
        }
        data
    }

    fn render_table(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format_table(&self.tabular()),
        }
    }
}

/// List every property the credentials can access.
pub async fn properties<A: Authenticator>(
    client: &SearchConsoleClient<A>,
) -> GscResult<PropertiesReport> {
    let sites = client.list_sites().await?;
    let message = sites
        .is_empty()
        .then(|| "No Search Console properties found.".to_string());
    Ok(PropertiesReport {
        report: ReportKind::Properties,
        sites,
        message,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapsReport {
    pub report: ReportKind,
    pub site_url: String,
    pub sitemaps: Vec<Sitemap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Render for SitemapsReport {
    fn tabular(&self) -> Tabular {
        let mut data = Tabular::new(["Path", "Last Downloaded", "Type", "URLs", "Errors"]);
        for sitemap in &self.sitemaps {
            data.push(sitemap_cells(sitemap));
        }
        data
    }

    fn render_table(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format_table(&self.tabular()),
        }
    }
}

fn sitemap_cells(sitemap: &Sitemap) -> Vec<String> {
    let last_downloaded = sitemap
        .last_downloaded
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| "Never".to_string());

    let kind = if sitemap.is_sitemaps_index.unwrap_or(false) {
        "Index"
    } else {
        "Sitemap"
    };

    // URL count comes from the "web" content entry only
    let url_count = sitemap
        .contents
        .iter()
        .find(|c| c.kind.as_deref() == Some("web"))
        .map(|c| c.submitted.unwrap_or(0).to_string())
        .unwrap_or_else(|| "N/A".to_string());

    vec![
        sitemap
            .path
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        last_downloaded,
        kind.to_string(),
        url_count,
        sitemap.errors.unwrap_or(0).to_string(),
    ]
}

/// List sitemaps submitted for a property.
pub async fn sitemaps<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: &str,
) -> GscResult<SitemapsReport> {
    let sitemaps = client.list_sitemaps(site_url).await?;
    let message = sitemaps
        .is_empty()
        .then(|| format!("No sitemaps found for {}.", site_url));
    Ok(SitemapsReport {
        report: ReportKind::Sitemaps,
        site_url: site_url.to_string(),
        sitemaps,
        message,
    })
}

// Integration API: DNS policies (local record overrides).

use reqwest::Method;
use tracing::debug;

use super::IntegrationClient;
use super::types::{DnsPolicy, DnsPolicyRequest};
use crate::client::require;
use crate::error::{Error, ResultExt};
use crate::pagination::{Page, PageRequest};

impl IntegrationClient<'_> {
    pub async fn list_dns_policies(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<DnsPolicy>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["dns", "policies"]), page)
            .await
            .with_context("list_dns_policies", || format!("site={site}"))
    }

    pub async fn get_dns_policy(
        &self,
        site: Option<&str>,
        policy_id: &str,
    ) -> Result<DnsPolicy, Error> {
        let site = self.site(site);
        async {
            let id = require("policy_id", policy_id)?;
            self.get(self.site_url(site, &["dns", "policies", id])).await
        }
        .await
        .with_context("get_dns_policy", || format!("site={site} policy={policy_id}"))
    }

    pub async fn create_dns_policy(
        &self,
        site: Option<&str>,
        request: &DnsPolicyRequest,
    ) -> Result<DnsPolicy, Error> {
        let site = self.site(site);
        async {
            require("domain", &request.domain)?;
            debug!(site, domain = %request.domain, "creating DNS policy");
            self.send(Method::POST, self.site_url(site, &["dns", "policies"]), request)
                .await
        }
        .await
        .with_context("create_dns_policy", || {
            format!("site={site} domain={}", request.domain)
        })
    }

    pub async fn update_dns_policy(
        &self,
        site: Option<&str>,
        policy_id: &str,
        request: &DnsPolicyRequest,
    ) -> Result<DnsPolicy, Error> {
        let site = self.site(site);
        async {
            let id = require("policy_id", policy_id)?;
            require("domain", &request.domain)?;
            self.send(
                Method::PUT,
                self.site_url(site, &["dns", "policies", id]),
                request,
            )
            .await
        }
        .await
        .with_context("update_dns_policy", || {
            format!("site={site} policy={policy_id}")
        })
    }

    pub async fn delete_dns_policy(
        &self,
        site: Option<&str>,
        policy_id: &str,
    ) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let id = require("policy_id", policy_id)?;
            debug!(site, policy = id, "deleting DNS policy");
            self.delete(self.site_url(site, &["dns", "policies", id]))
                .await
        }
        .await
        .with_context("delete_dns_policy", || {
            format!("site={site} policy={policy_id}")
        })
    }
}

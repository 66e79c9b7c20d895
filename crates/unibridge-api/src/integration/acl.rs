// Integration API: ACL rules and their evaluation order.

use reqwest::Method;
use tracing::debug;

use super::IntegrationClient;
use super::types::{AclRule, AclRuleOrdering, AclRuleRequest};
use crate::client::require;
use crate::error::{Error, ResultExt};
use crate::merge;
use crate::pagination::{Page, PageRequest};

impl IntegrationClient<'_> {
    pub async fn list_acl_rules(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<AclRule>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["acl-rules"]), page)
            .await
            .with_context("list_acl_rules", || format!("site={site}"))
    }

    pub async fn get_acl_rule(&self, site: Option<&str>, rule_id: &str) -> Result<AclRule, Error> {
        let site = self.site(site);
        async {
            let id = require("rule_id", rule_id)?;
            self.get(self.site_url(site, &["acl-rules", id])).await
        }
        .await
        .with_context("get_acl_rule", || format!("site={site} rule={rule_id}"))
    }

    pub async fn create_acl_rule(
        &self,
        site: Option<&str>,
        request: &AclRuleRequest,
    ) -> Result<AclRule, Error> {
        let site = self.site(site);
        async {
            require("name", &request.name)?;
            debug!(site, name = %request.name, "creating ACL rule");
            self.send(Method::POST, self.site_url(site, &["acl-rules"]), request)
                .await
        }
        .await
        .with_context("create_acl_rule", || {
            format!("site={site} name={}", request.name)
        })
    }

    pub async fn update_acl_rule(
        &self,
        site: Option<&str>,
        rule_id: &str,
        request: &AclRuleRequest,
    ) -> Result<AclRule, Error> {
        let site = self.site(site);
        async {
            let id = require("rule_id", rule_id)?;
            self.send(Method::PUT, self.site_url(site, &["acl-rules", id]), request)
                .await
        }
        .await
        .with_context("update_acl_rule", || format!("site={site} rule={rule_id}"))
    }

    pub async fn delete_acl_rule(&self, site: Option<&str>, rule_id: &str) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let id = require("rule_id", rule_id)?;
            debug!(site, rule = id, "deleting ACL rule");
            self.delete(self.site_url(site, &["acl-rules", id])).await
        }
        .await
        .with_context("delete_acl_rule", || format!("site={site} rule={rule_id}"))
    }

    /// Enable or disable a rule via fetch-merge-write, so filters and other
    /// type-specific settings survive the toggle.
    pub async fn set_acl_rule_enabled(
        &self,
        site: Option<&str>,
        rule_id: &str,
        enabled: bool,
    ) -> Result<AclRule, Error> {
        let site = self.site(site);
        async {
            let id = require("rule_id", rule_id)?;
            debug!(site, rule = id, enabled, "toggling ACL rule");
            self.merge_update(self.site_url(site, &["acl-rules", id]), merge::enabled(enabled)?)
                .await
        }
        .await
        .with_context("set_acl_rule_enabled", || {
            format!("site={site} rule={rule_id} enabled={enabled}")
        })
    }

    // ── Ordering ─────────────────────────────────────────────────────

    /// `GET /integration/v1/sites/{site}/acl-rules/ordering`
    pub async fn get_acl_rule_ordering(
        &self,
        site: Option<&str>,
    ) -> Result<AclRuleOrdering, Error> {
        let site = self.site(site);
        self.get(self.site_url(site, &["acl-rules", "ordering"]))
            .await
            .with_context("get_acl_rule_ordering", || format!("site={site}"))
    }

    /// `PUT /integration/v1/sites/{site}/acl-rules/ordering` with the complete ordered
    /// list of rule IDs.
    pub async fn reorder_acl_rules(
        &self,
        site: Option<&str>,
        ordered_ids: &[String],
    ) -> Result<AclRuleOrdering, Error> {
        let site = self.site(site);
        async {
            if ordered_ids.is_empty() {
                return Err(Error::Validation("ordered rule IDs must not be empty".into()));
            }
            if let Some(blank) = ordered_ids.iter().position(|id| id.trim().is_empty()) {
                return Err(Error::Validation(format!(
                    "ordered rule ID at position {blank} is empty"
                )));
            }
            let body = AclRuleOrdering {
                ordered_acl_rule_ids: ordered_ids.to_vec(),
            };
            debug!(site, rules = ordered_ids.len(), "reordering ACL rules");
            self.send(
                Method::PUT,
                self.site_url(site, &["acl-rules", "ordering"]),
                &body,
            )
            .await
        }
        .await
        .with_context("reorder_acl_rules", || {
            format!("site={site} rules={}", ordered_ids.len())
        })
    }
}

// Integration API: hotspot vouchers.

use reqwest::Method;
use tracing::debug;

use super::IntegrationClient;
use super::types::{Voucher, VoucherCreateResponse, VoucherRequest};
use crate::client::require;
use crate::error::{Error, ResultExt};
use crate::pagination::{Page, PageRequest};

impl IntegrationClient<'_> {
    pub async fn list_vouchers(
        &self,
        site: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Voucher>, Error> {
        let site = self.site(site);
        self.get_page(self.site_url(site, &["hotspot", "vouchers"]), page)
            .await
            .with_context("list_vouchers", || format!("site={site}"))
    }

    pub async fn get_voucher(
        &self,
        site: Option<&str>,
        voucher_id: &str,
    ) -> Result<Voucher, Error> {
        let site = self.site(site);
        async {
            let id = require("voucher_id", voucher_id)?;
            self.get(self.site_url(site, &["hotspot", "vouchers", id]))
                .await
        }
        .await
        .with_context("get_voucher", || format!("site={site} voucher={voucher_id}"))
    }

    /// Generate `request.count` vouchers. The controller answers with
    /// `{"vouchers": [...]}` rather than a list envelope.
    pub async fn create_vouchers(
        &self,
        site: Option<&str>,
        request: &VoucherRequest,
    ) -> Result<Vec<Voucher>, Error> {
        let site = self.site(site);
        async {
            if request.count == 0 {
                return Err(Error::Validation("voucher count must be at least 1".into()));
            }
            if request.time_limit_minutes == 0 {
                return Err(Error::Validation(
                    "voucher time limit must be at least 1 minute".into(),
                ));
            }
            debug!(site, count = request.count, "creating vouchers");
            let created: VoucherCreateResponse = self
                .send(
                    Method::POST,
                    self.site_url(site, &["hotspot", "vouchers"]),
                    request,
                )
                .await?;
            Ok(created.vouchers)
        }
        .await
        .with_context("create_vouchers", || {
            format!("site={site} count={}", request.count)
        })
    }

    pub async fn delete_voucher(&self, site: Option<&str>, voucher_id: &str) -> Result<(), Error> {
        let site = self.site(site);
        async {
            let id = require("voucher_id", voucher_id)?;
            debug!(site, voucher = id, "revoking voucher");
            self.delete(self.site_url(site, &["hotspot", "vouchers", id]))
                .await
        }
        .await
        .with_context("delete_voucher", || format!("site={site} voucher={voucher_id}"))
    }
}

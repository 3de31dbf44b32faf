use crate::{
    access_control::domain::model::value_objects::tenant_id::TenantId,
    invoicing::domain::model::enums::invoicing_domain_error::InvoicingDomainError,
};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Clone, Debug)]
pub struct ListInvoicesQuery {
    tenant_id: Option<TenantId>,
    limit: u32,
}

impl ListInvoicesQuery {
    /// `tenant_id` narrows the listing to one tenant inside the caller's scope.
    pub fn new(tenant_id: Option<String>, limit: Option<u32>) -> Result<Self, InvoicingDomainError> {
        let tenant_id = tenant_id
            .filter(|value| !value.trim().is_empty())
            .map(TenantId::new)
            .transpose()?;

        Ok(Self {
            tenant_id,
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        })
    }

    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

use crate::invoicing::domain::model::{
    enums::invoicing_domain_error::InvoicingDomainError, value_objects::invoice_id::InvoiceId,
};

#[derive(Clone, Debug)]
pub struct GetInvoiceQuery {
    invoice_id: InvoiceId,
}

impl GetInvoiceQuery {
    pub fn new(invoice_id: String) -> Result<Self, InvoicingDomainError> {
        Ok(Self {
            invoice_id: InvoiceId::parse(&invoice_id)?,
        })
    }

    pub fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forno_core::{DomainError, DomainResult, RecordId, record_id_newtype};

/// Invoice identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub RecordId);

record_id_newtype!(InvoiceId, "invoice id");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Issued,
    Cancelled,
}

/// Fields supplied when issuing a nota fiscal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub customer_name: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    pub total_cents: u64,
    #[serde(default)]
    pub series: Option<String>,
}

/// A nota fiscal record.
///
/// Numbers are zero-padded 6-digit strings, sequential within a series.
/// The next number is derived from the count of invoices already stored in
/// the series; with a single back-office process writing, that is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub number: String,
    pub series: String,
    pub customer_name: String,
    pub cnpj: Option<String>,
    pub total_cents: u64,
    pub status: InvoiceStatus,
    pub issued_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Format a sequence position as an invoice number (`1` → `"000001"`).
pub fn format_invoice_number(seq: u64) -> String {
    format!("{seq:06}")
}

impl Invoice {
    pub fn issue(
        id: InvoiceId,
        number: String,
        draft: InvoiceDraft,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if draft.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }
        if number.trim().is_empty() {
            return Err(DomainError::validation("invoice number must not be empty"));
        }
        if draft.total_cents == 0 {
            return Err(DomainError::validation("invoice total must be positive"));
        }

        Ok(Self {
            id,
            number,
            series: draft.series.unwrap_or_else(|| "1".to_string()),
            customer_name: draft.customer_name,
            cnpj: draft.cnpj,
            total_cents: draft.total_cents,
            status: InvoiceStatus::Issued,
            issued_at: now,
            updated_at: now,
        })
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status == InvoiceStatus::Cancelled {
            return Err(DomainError::invariant("invoice is already cancelled"));
        }
        self.status = InvoiceStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn draft() -> InvoiceDraft {
        InvoiceDraft {
            customer_name: "pizzaria do bairro ltda".into(),
            cnpj: Some("12.345.678/0001-90".into()),
            total_cents: 15_050,
            series: None,
        }
    }

    #[test]
    fn numbers_are_zero_padded() {
        assert_eq!(format_invoice_number(1), "000001");
        assert_eq!(format_invoice_number(42), "000042");
        assert_eq!(format_invoice_number(1_234_567), "1234567");
    }

    #[test]
    fn issue_defaults_series_to_one() {
        let invoice = Invoice::issue(
            InvoiceId::generate(),
            format_invoice_number(1),
            draft(),
            test_time(),
        )
        .unwrap();
        assert_eq!(invoice.series, "1");
        assert_eq!(invoice.status, InvoiceStatus::Issued);
    }

    #[test]
    fn issue_rejects_zero_total() {
        let mut d = draft();
        d.total_cents = 0;
        let err = Invoice::issue(
            InvoiceId::generate(),
            format_invoice_number(1),
            d,
            test_time(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn cancel_is_single_shot() {
        let mut invoice = Invoice::issue(
            InvoiceId::generate(),
            format_invoice_number(2),
            draft(),
            test_time(),
        )
        .unwrap();

        invoice.cancel(test_time()).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Cancelled);

        let err = invoice.cancel(test_time()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}

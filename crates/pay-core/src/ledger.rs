//! # Transaction Loggers
//!
//! `TransactionLogger` implementations: one that emits structured tracing
//! events and one that keeps entries in memory for inspection.

use crate::customer::CustomerData;
use crate::error::{PaymentError, PaymentResult};
use crate::payment::{PaymentData, PaymentResponse, RefundResponse};
use crate::strategy::TransactionLogger;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Emits one `info` event per transaction or refund
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTransactionLogger;

impl TracingTransactionLogger {
    pub fn new() -> Self {
        Self
    }
}

impl TransactionLogger for TracingTransactionLogger {
    fn log_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
        response: &PaymentResponse,
    ) -> PaymentResult<()> {
        let response_json = serde_json::to_string(response)
            .map_err(|e| PaymentError::Observability(format!("Failed to encode response: {}", e)))?;

        info!(
            customer = %customer.name,
            amount = %payment.display_amount(),
            transaction_id = %response.transaction_id,
            response = %response_json,
            "Transaction recorded"
        );
        Ok(())
    }

    fn log_refund(&self, transaction_id: &str, response: &RefundResponse) -> PaymentResult<()> {
        info!(
            transaction_id = %transaction_id,
            refund_id = %response.refund_id,
            status = ?response.status,
            "Refund recorded"
        );
        Ok(())
    }
}

/// A recorded logger entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    Transaction {
        customer: CustomerData,
        payment: PaymentData,
        response: PaymentResponse,
        logged_at: DateTime<Utc>,
    },
    Refund {
        transaction_id: String,
        response: RefundResponse,
        logged_at: DateTime<Utc>,
    },
}

impl LogEntry {
    /// The transaction this entry refers to
    pub fn transaction_id(&self) -> &str {
        match self {
            LogEntry::Transaction { response, .. } => &response.transaction_id,
            LogEntry::Refund { transaction_id, .. } => transaction_id,
        }
    }

    pub fn is_refund(&self) -> bool {
        matches!(self, LogEntry::Refund { .. })
    }
}

/// Keeps every entry in memory, in logging order
#[derive(Debug, Default)]
pub struct InMemoryTransactionLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl InMemoryTransactionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries
    pub fn entries(&self) -> PaymentResult<Vec<LogEntry>> {
        Ok(self.store()?.clone())
    }

    /// Number of recorded entries
    pub fn len(&self) -> PaymentResult<usize> {
        Ok(self.store()?.len())
    }

    pub fn is_empty(&self) -> PaymentResult<bool> {
        Ok(self.store()?.is_empty())
    }

    fn store(&self) -> PaymentResult<MutexGuard<'_, Vec<LogEntry>>> {
        self.entries
            .lock()
            .map_err(|_| PaymentError::Observability("log store poisoned".to_string()))
    }

    fn push(&self, entry: LogEntry) -> PaymentResult<()> {
        self.store()?.push(entry);
        Ok(())
    }
}

impl TransactionLogger for InMemoryTransactionLogger {
    fn log_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
        response: &PaymentResponse,
    ) -> PaymentResult<()> {
        self.push(LogEntry::Transaction {
            customer: customer.clone(),
            payment: payment.clone(),
            response: response.clone(),
            logged_at: Utc::now(),
        })
    }

    fn log_refund(&self, transaction_id: &str, response: &RefundResponse) -> PaymentResult<()> {
        self.push(LogEntry::Refund {
            transaction_id: transaction_id.to_string(),
            response: response.clone(),
            logged_at: Utc::now(),
        })
    }
}

// ⚠️ Ledger errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Sale input field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CustomerName,
    Phone,
    TicketType,
    Quantity,
    Seller,

    /// Request body as a whole (not JSON, not an object)
    Body,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CustomerName => "customer_name",
            Field::Phone => "phone",
            Field::TicketType => "ticket_type",
            Field::Quantity => "quantity",
            Field::Seller => "seller",
            Field::Body => "body",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Caller input rejected before any mutation. Correct and re-submit.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: Field, reason: String },

    /// Startup configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LedgerError {
    pub fn invalid(field: Field, reason: impl Into<String>) -> Self {
        LedgerError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Field that failed, for input errors
    pub fn field(&self) -> Option<Field> {
        match self {
            LedgerError::InvalidInput { field, .. } => Some(*field),
            LedgerError::Config(_) => None,
        }
    }
}

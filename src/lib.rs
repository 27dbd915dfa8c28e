// Festival Sales - Core Library
// Ticket sales ledger, contact book and reports, used by the TUI and the API server

pub mod money;
pub mod phone;
pub mod tickets;
pub mod contacts;
pub mod error;
pub mod config;
pub mod ledger;
pub mod report;
pub mod session;

#[cfg(feature = "tui")]
pub mod ui;

#[cfg(feature = "server")]
pub mod api;

#[cfg(test)]
mod test_log;

// Re-export commonly used types
pub use money::Money;
pub use phone::{digits_only, format_phone, has_full_number, MIN_PHONE_DIGITS};
pub use tickets::{PriceTable, TicketType};
pub use contacts::{Contact, ContactBook};
pub use error::{Field, LedgerError};
pub use config::{Config, SeedContact, CONFIG_PATH_ENV};
pub use ledger::{today, Sale, SaleId, SaleInput, SalesLedger};
pub use report::{Report, SellerRevenue, TicketQuantity, RECENT_SALES_LIMIT};
pub use session::SharedLedger;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

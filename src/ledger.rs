// 🧾 Sales Ledger - append-only record of ticket sales
//
// record = validate everything, then append the sale and its contact.
// A rejected input leaves both the ledger and the contact book untouched.

use crate::config::Config;
use crate::contacts::ContactBook;
use crate::error::{Field, LedgerError};
use crate::money::Money;
use crate::phone::{digits_only, format_phone, MIN_PHONE_DIGITS};
use crate::report::Report;
use crate::tickets::{PriceTable, TicketType};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Today's date as the sale form shows it (`dd/mm/yyyy`)
pub fn today() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}

fn default_quantity() -> i64 {
    1
}

// ============================================================================
// SALE INPUT
// ============================================================================

/// What the operator typed into the sale form.
///
/// `ticket_type` is free text and `quantity` is signed; `record` rejects
/// bad values with a reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleInput {
    pub customer_name: String,

    /// Raw digits or an already formatted phone
    pub phone: String,

    pub ticket_type: String,

    #[serde(default = "default_quantity")]
    pub quantity: i64,

    pub seller: String,

    /// Display date, not validated as a calendar date
    #[serde(default = "today")]
    pub date: String,
}

impl SaleInput {
    /// One ticket dated today
    pub fn new(
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        ticket_type: TicketType,
        seller: impl Into<String>,
    ) -> Self {
        SaleInput {
            customer_name: customer_name.into(),
            phone: phone.into(),
            ticket_type: ticket_type.as_str().to_string(),
            quantity: 1,
            seller: seller.into(),
            date: today(),
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

// ============================================================================
// SALE
// ============================================================================

/// Sale identity. Later sales always get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub u64);

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub customer_name: String,

    /// `(DD) DDDDD-DDDD`
    pub customer_phone: String,

    pub ticket_type: TicketType,
    pub quantity: u32,
    pub seller: String,
    pub date: String,

    /// unit price at record time * quantity; never recomputed
    pub total: Money,
}

/// Checked input, ready to append
struct ValidatedSale {
    ticket_type: TicketType,
    quantity: u32,
    total: Money,
    revenue: Money,
}

// ============================================================================
// SALES LEDGER
// ============================================================================

pub struct SalesLedger {
    sales: Vec<Sale>,
    contacts: ContactBook,
    sellers: Vec<String>,
    prices: PriceTable,
    next_id: u64,

    /// Sum of every recorded total; a sale that would overflow it is rejected
    revenue: Money,
}

impl SalesLedger {
    /// Ledger for one application session; seed contacts go into the book
    pub fn new(config: Config) -> Result<Self, LedgerError> {
        config.validate()?;

        let mut contacts = ContactBook::new();
        for seed in &config.seed_contacts {
            contacts.append(seed.name.clone(), format_phone(&seed.phone));
        }

        Ok(SalesLedger {
            sales: Vec::new(),
            contacts,
            sellers: config.sellers,
            prices: config.prices,
            next_id: 1,
            revenue: Money::ZERO,
        })
    }

    /// Validate and append a sale, plus one new contact for its customer
    pub fn record(&mut self, input: SaleInput) -> Result<Sale, LedgerError> {
        let checked = match self.validate(&input) {
            Ok(checked) => checked,
            Err(err) => {
                tracing::debug!(error = %err, "sale rejected");
                return Err(err);
            }
        };

        let phone = format_phone(&input.phone);
        let sale = Sale {
            id: SaleId(self.next_id),
            customer_name: input.customer_name,
            customer_phone: phone,
            ticket_type: checked.ticket_type,
            quantity: checked.quantity,
            seller: input.seller,
            date: input.date,
            total: checked.total,
        };
        self.next_id += 1;
        self.revenue = checked.revenue;

        self.sales.push(sale.clone());
        self.contacts
            .append(sale.customer_name.clone(), sale.customer_phone.clone());

        tracing::info!(
            sale_id = %sale.id,
            seller = %sale.seller,
            ticket_type = %sale.ticket_type,
            quantity = sale.quantity,
            total = %sale.total,
            "sale recorded"
        );

        Ok(sale)
    }

    fn validate(&self, input: &SaleInput) -> Result<ValidatedSale, LedgerError> {
        if input.customer_name.trim().is_empty() {
            return Err(LedgerError::invalid(Field::CustomerName, "name is required"));
        }

        let digits = digits_only(&input.phone).len();
        if digits < MIN_PHONE_DIGITS {
            return Err(LedgerError::invalid(
                Field::Phone,
                format!(
                    "phone needs area code and number ({} digits), got {}",
                    MIN_PHONE_DIGITS, digits
                ),
            ));
        }

        let ticket_type = input
            .ticket_type
            .parse::<TicketType>()
            .map_err(|reason: String| LedgerError::invalid(Field::TicketType, reason))?;

        let quantity = u32::try_from(input.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| {
                LedgerError::invalid(
                    Field::Quantity,
                    format!("quantity must be a positive integer, got {}", input.quantity),
                )
            })?;

        if !self.sellers.iter().any(|s| *s == input.seller) {
            return Err(LedgerError::invalid(
                Field::Seller,
                format!("{:?} is not on the seller roster", input.seller),
            ));
        }

        let total = self
            .prices
            .unit_price(ticket_type)
            .checked_mul(quantity)
            .ok_or_else(|| LedgerError::invalid(Field::Quantity, "total is out of range"))?;

        let revenue = self.revenue.checked_add(total).ok_or_else(|| {
            LedgerError::invalid(Field::Quantity, "ledger revenue would be out of range")
        })?;

        Ok(ValidatedSale {
            ticket_type,
            quantity,
            total,
            revenue,
        })
    }

    /// Aggregates over the current sales
    pub fn report(&self) -> Report {
        Report::from_sales(&self.sales)
    }

    /// Every sale in recording order
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn contacts(&self) -> &ContactBook {
        &self.contacts
    }

    pub fn contacts_mut(&mut self) -> &mut ContactBook {
        &mut self.contacts
    }

    pub fn sellers(&self) -> &[String] {
        &self.sellers
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }
}

// ============================================================================
// TESTS
// ============================================================================

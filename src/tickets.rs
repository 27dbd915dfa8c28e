// 🎟️ Ticket Types - fixed enumeration + unit price table

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TICKET TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    /// Couple ticket
    Casal,

    /// Single adult
    Individual,

    /// Youth
    Jovem,

    /// Child
    Infantil,
}

impl TicketType {
    /// Every ticket type, in the order the sale form lists them
    pub const ALL: [TicketType; 4] = [
        TicketType::Casal,
        TicketType::Individual,
        TicketType::Jovem,
        TicketType::Infantil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Casal => "Casal",
            TicketType::Individual => "Individual",
            TicketType::Jovem => "Jovem",
            TicketType::Infantil => "Infantil",
        }
    }

    /// Default unit price
    pub fn default_price(&self) -> Money {
        match self {
            TicketType::Casal => Money::from_units(120),
            TicketType::Individual => Money::from_units(70),
            TicketType::Jovem => Money::from_units(50),
            TicketType::Infantil => Money::from_units(30),
        }
    }

    /// Next type in form order (wraps)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous type in form order (wraps)
    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = String;

    /// Exact match on the type name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown ticket type {:?}", s))
    }
}

// ============================================================================
// PRICE TABLE
// ============================================================================

/// Unit price per ticket type, supplied once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<TicketType, Money>", into = "HashMap<TicketType, Money>")]
pub struct PriceTable {
    prices: HashMap<TicketType, Money>,
}

impl PriceTable {
    /// Table with every type priced
    pub fn new(prices: HashMap<TicketType, Money>) -> Self {
        let mut table = PriceTable::default();
        for (ticket_type, price) in prices {
            table.set_price(ticket_type, price);
        }
        table
    }

    pub fn unit_price(&self, ticket_type: TicketType) -> Money {
        self.prices
            .get(&ticket_type)
            .copied()
            .unwrap_or_else(|| ticket_type.default_price())
    }

    pub fn set_price(&mut self, ticket_type: TicketType, price: Money) {
        self.prices.insert(ticket_type, price);
    }

    /// (type, price) pairs in form order
    pub fn iter(&self) -> impl Iterator<Item = (TicketType, Money)> + '_ {
        TicketType::ALL.iter().map(move |t| (*t, self.unit_price(*t)))
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        PriceTable {
            prices: TicketType::ALL
                .iter()
                .map(|t| (*t, t.default_price()))
                .collect(),
        }
    }
}

impl From<HashMap<TicketType, Money>> for PriceTable {
    fn from(prices: HashMap<TicketType, Money>) -> Self {
        PriceTable::new(prices)
    }
}

impl From<PriceTable> for HashMap<TicketType, Money> {
    fn from(table: PriceTable) -> Self {
        table.iter().collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prices() {
        let table = PriceTable::default();

        assert_eq!(table.unit_price(TicketType::Casal).to_string(), "120.00");
        assert_eq!(table.unit_price(TicketType::Individual).to_string(), "70.00");
        assert_eq!(table.unit_price(TicketType::Jovem).to_string(), "50.00");
        assert_eq!(table.unit_price(TicketType::Infantil).to_string(), "30.00");
    }

    #[test]
    fn test_parse_ticket_type() {
        for ticket_type in TicketType::ALL {
            assert_eq!(ticket_type.as_str().parse::<TicketType>().unwrap(), ticket_type);
        }

        assert!("casal".parse::<TicketType>().is_err());
        assert!(" Jovem ".parse::<TicketType>().is_err());
        assert!("INFANTIL".parse::<TicketType>().is_err());
        assert!("VIP".parse::<TicketType>().is_err());
        assert!("".parse::<TicketType>().is_err());
    }

    #[test]
    fn test_next_previous_wrap() {
        assert_eq!(TicketType::Casal.next(), TicketType::Individual);
        assert_eq!(TicketType::Infantil.next(), TicketType::Casal);
        assert_eq!(TicketType::Casal.previous(), TicketType::Infantil);
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let mut prices = HashMap::new();
        prices.insert(TicketType::Casal, Money::from_units(150));
        let table = PriceTable::new(prices);

        assert_eq!(table.unit_price(TicketType::Casal), Money::from_units(150));
        assert_eq!(table.unit_price(TicketType::Jovem), Money::from_units(50));
    }

    #[test]
    fn test_price_table_from_json() {
        let table: PriceTable = serde_json::from_str(r#"{"Casal": "100.00", "Infantil": 25}"#).unwrap();

        assert_eq!(table.unit_price(TicketType::Casal), Money::from_units(100));
        assert_eq!(table.unit_price(TicketType::Infantil), Money::from_units(25));
        assert_eq!(table.unit_price(TicketType::Individual), Money::from_units(70));

        let order: Vec<TicketType> = table.iter().map(|(t, _)| t).collect();
        assert_eq!(order, TicketType::ALL.to_vec());
    }
}

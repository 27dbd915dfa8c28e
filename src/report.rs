// 📊 Sales Report - read-only aggregates over the ledger
//
// Recomputed from scratch on every call. Grouped figures keep the order in
// which each seller / ticket type first appears among the sales.

use crate::ledger::Sale;
use crate::money::Money;
use crate::tickets::TicketType;
use serde::{Deserialize, Serialize};

/// How many sales the history section shows
pub const RECENT_SALES_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerRevenue {
    pub seller: String,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketQuantity {
    pub ticket_type: TicketType,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    pub total_revenue: Money,
    pub sale_count: usize,

    /// Only sellers with at least one sale, in order of first sale
    pub revenue_by_seller: Vec<SellerRevenue>,

    /// Only ticket types sold at least once, in order of first sale
    pub quantity_by_ticket_type: Vec<TicketQuantity>,

    /// Up to RECENT_SALES_LIMIT sales, most recent first
    pub recent_sales: Vec<Sale>,
}

impl Report {
    /// Sales are given in recording order
    pub fn from_sales(sales: &[Sale]) -> Self {
        let mut report = Report {
            sale_count: sales.len(),
            ..Report::default()
        };

        for sale in sales {
            report.total_revenue += sale.total;

            match report
                .revenue_by_seller
                .iter_mut()
                .find(|entry| entry.seller == sale.seller)
            {
                Some(entry) => entry.revenue += sale.total,
                None => report.revenue_by_seller.push(SellerRevenue {
                    seller: sale.seller.clone(),
                    revenue: sale.total,
                }),
            }

            match report
                .quantity_by_ticket_type
                .iter_mut()
                .find(|entry| entry.ticket_type == sale.ticket_type)
            {
                Some(entry) => entry.quantity += u64::from(sale.quantity),
                None => report.quantity_by_ticket_type.push(TicketQuantity {
                    ticket_type: sale.ticket_type,
                    quantity: u64::from(sale.quantity),
                }),
            }
        }

        report.recent_sales = sales
            .iter()
            .rev()
            .take(RECENT_SALES_LIMIT)
            .cloned()
            .collect();

        report
    }

    pub fn revenue_for(&self, seller: &str) -> Option<Money> {
        self.revenue_by_seller
            .iter()
            .find(|entry| entry.seller == seller)
            .map(|entry| entry.revenue)
    }

    pub fn quantity_for(&self, ticket_type: TicketType) -> Option<u64> {
        self.quantity_by_ticket_type
            .iter()
            .find(|entry| entry.ticket_type == ticket_type)
            .map(|entry| entry.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.sale_count == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Sales: {}, Sellers: {}",
            self.total_revenue,
            self.sale_count,
            self.revenue_by_seller.len()
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ledger::{SaleInput, SalesLedger};

    fn ledger() -> SalesLedger {
        SalesLedger::new(Config::with_sellers(["Ana", "Pedro", "Mariana"])).unwrap()
    }

    fn record(ledger: &mut SalesLedger, name: &str, ticket: TicketType, seller: &str) -> Sale {
        ledger
            .record(SaleInput::new(name, "34988885555", ticket, seller))
            .unwrap()
    }

    #[test]
    fn test_empty_report() {
        let report = ledger().report();

        assert_eq!(report.total_revenue, Money::ZERO);
        assert_eq!(report.sale_count, 0);
        assert!(report.revenue_by_seller.is_empty());
        assert!(report.quantity_by_ticket_type.is_empty());
        assert!(report.recent_sales.is_empty());
        assert!(report.is_empty());
    }

    #[test]
    fn test_revenue_by_seller_first_appearance_order() {
        let mut ledger = ledger();
        record(&mut ledger, "C1", TicketType::Casal, "Pedro");
        record(&mut ledger, "C2", TicketType::Jovem, "Ana");
        record(&mut ledger, "C3", TicketType::Individual, "Pedro");

        let report = ledger.report();
        let sellers: Vec<&str> = report
            .revenue_by_seller
            .iter()
            .map(|e| e.seller.as_str())
            .collect();

        assert_eq!(sellers, vec!["Pedro", "Ana"]);
        assert_eq!(report.revenue_for("Pedro"), Some(Money::from_units(190)));
        assert_eq!(report.revenue_for("Ana"), Some(Money::from_units(50)));
        assert_eq!(report.revenue_for("Mariana"), None);
        assert_eq!(report.total_revenue, Money::from_units(240));
    }

    #[test]
    fn test_quantity_by_ticket_type() {
        let mut ledger = ledger();
        record(&mut ledger, "C1", TicketType::Infantil, "Ana");
        record(&mut ledger, "C2", TicketType::Casal, "Ana");
        ledger
            .record(SaleInput::new("C3", "34988885555", TicketType::Infantil, "Ana").with_quantity(2))
            .unwrap();

        let report = ledger.report();
        let types: Vec<TicketType> = report
            .quantity_by_ticket_type
            .iter()
            .map(|e| e.ticket_type)
            .collect();

        assert_eq!(types, vec![TicketType::Infantil, TicketType::Casal]);
        assert_eq!(report.quantity_for(TicketType::Infantil), Some(3));
        assert_eq!(report.quantity_for(TicketType::Casal), Some(1));
        assert_eq!(report.quantity_for(TicketType::Jovem), None);
    }

    #[test]
    fn test_recent_sales_most_recent_first() {
        let mut ledger = ledger();
        let sales: Vec<Sale> = (1..=7)
            .map(|i| record(&mut ledger, &format!("S{}", i), TicketType::Jovem, "Mariana"))
            .collect();

        let recent = ledger.report().recent_sales;
        let expected: Vec<Sale> = sales.iter().rev().take(5).cloned().collect();

        assert_eq!(recent.len(), 5);
        assert_eq!(recent, expected);
        assert_eq!(recent[0].customer_name, "S7");
        assert_eq!(recent[4].customer_name, "S3");
    }

    #[test]
    fn test_recent_sales_fewer_than_limit() {
        let mut ledger = ledger();
        record(&mut ledger, "S1", TicketType::Casal, "Ana");
        record(&mut ledger, "S2", TicketType::Casal, "Ana");

        let names: Vec<String> = ledger
            .report()
            .recent_sales
            .into_iter()
            .map(|s| s.customer_name)
            .collect();
        assert_eq!(names, vec!["S2", "S1"]);
    }

    #[test]
    fn test_report_is_read_only() {
        let mut ledger = ledger();
        record(&mut ledger, "S1", TicketType::Casal, "Ana");

        let first = ledger.report();
        let second = ledger.report();

        assert_eq!(first, second);
        assert_eq!(ledger.sales().len(), 1);
    }

    #[test]
    fn test_summary() {
        let mut ledger = ledger();
        record(&mut ledger, "S1", TicketType::Casal, "Ana");

        assert_eq!(ledger.report().summary(), "Total: 120.00, Sales: 1, Sellers: 1");
    }
}

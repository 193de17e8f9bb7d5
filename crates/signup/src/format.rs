//! Intro Class sheet rows.
//!
//! | #  | Column     | Source                                  |
//! |----|------------|-----------------------------------------|
//! | 0  | Name       | first + last name                        |
//! | 1  | Cash/Check | price, when paid in person              |
//! | 2  | Paypal     | price, when paid online                 |
//! | 3  | Groupon    | price, when a voucher code was given    |
//! | 4  | Months     | `1`, `3`, `Observing` or `Intro`        |
//! | 5  | Attendance | left for the instructor                 |
//! | 6  | Started    | class day, `M/D/YYYY`                   |
//! | 7  | Expires    | expiration, `M/D/YYYY` or empty         |
//! | 8  | Notes      | left for the instructor                 |
//! | 9  | Phone      |                                          |
//! | 10 | Email      | key used to detect already-copied rows  |
//! | 11 | Submitted  | form submission time, verbatim          |

use crate::model::{Cell, ContactRecord, EnrichedContact};
use crate::price::PriceTable;

pub const INTRO_COLUMNS: usize = 12;

pub const NAME: usize = 0;
pub const CASH_CHECK: usize = 1;
pub const PAYPAL: usize = 2;
pub const GROUPON: usize = 3;
pub const MONTHS: usize = 4;
pub const ATTENDANCE: usize = 5;
pub const STARTED: usize = 6;
pub const EXPIRES: usize = 7;
pub const NOTES: usize = 8;
pub const PHONE: usize = 9;
pub const EMAIL: usize = 10;
pub const SUBMITTED: usize = 11;

/// Payment value the sign-up form sends for online checkout.
pub const ONLINE_CHECKOUT: &str = "Checkout now with";

/// Which of the three payment columns a contact's price goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentColumn {
    CashCheck,
    Paypal,
    Groupon,
}

impl PaymentColumn {
    /// Online checkout first, then a voucher code, then cash/check.
    pub fn for_contact(contact: &ContactRecord) -> Self {
        if contact.payment == ONLINE_CHECKOUT {
            PaymentColumn::Paypal
        } else if contact.groupon.is_truthy() {
            PaymentColumn::Groupon
        } else {
            PaymentColumn::CashCheck
        }
    }

    /// Column index in the intro row.
    pub fn index(&self) -> usize {
        match self {
            PaymentColumn::CashCheck => CASH_CHECK,
            PaymentColumn::Paypal => PAYPAL,
            PaymentColumn::Groupon => GROUPON,
        }
    }

    /// Payment-method label in the price table.
    pub fn price_label(&self) -> &'static str {
        match self {
            PaymentColumn::CashCheck => "Cash",
            PaymentColumn::Paypal => "Paypal",
            PaymentColumn::Groupon => "Groupon",
        }
    }
}

/// A formatted Intro Class row.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroRow {
    pub cells: [Cell; INTRO_COLUMNS],
    pub payment_column: PaymentColumn,
}

impl IntroRow {
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells.into()
    }
}

pub fn format_row(contact: &EnrichedContact, prices: &PriceTable) -> IntroRow {
    let record = &contact.contact;
    let mut cells: [Cell; INTRO_COLUMNS] = std::array::from_fn(|_| Cell::Empty);

    cells[NAME] = Cell::text(record.full_name());
    cells[MONTHS] = contact
        .months
        .map(|m| Cell::text(m.to_string()))
        .unwrap_or_default();
    cells[STARTED] = Cell::text(contact.starts.clone());
    cells[EXPIRES] = Cell::text(contact.expires.clone());
    cells[PHONE] = Cell::text(record.phone.clone());
    cells[EMAIL] = Cell::text(record.email.clone());
    cells[SUBMITTED] = record.submitted.clone();

    let payment_column = PaymentColumn::for_contact(record);
    if let Some(price) = prices.price(&record.promotion, payment_column.price_label()) {
        cells[payment_column.index()] = price;
    }

    IntroRow {
        cells,
        payment_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Months;

    fn prices() -> PriceTable {
        let r = |cells: &[&str]| -> Vec<Cell> { cells.iter().map(|c| Cell::text(*c)).collect() };
        PriceTable::new(vec![
            r(&["", "Cash", "Paypal", "Groupon"]),
            r(&["One Month", "120", "125", "60"]),
        ])
    }

    fn enriched(payment: &str, groupon: &str) -> EnrichedContact {
        EnrichedContact {
            contact: ContactRecord {
                first_name: "Ann".into(),
                last_name: "Lee".into(),
                phone: "555-1111".into(),
                email: "ann@x.com".into(),
                promotion: "One Month".into(),
                payment: payment.into(),
                groupon: Cell::text(groupon),
                submitted: Cell::text("2026-10-18 09:00:00"),
                ..Default::default()
            },
            notes: "One Month starts 11/3/2026 expires 12/3/2026".into(),
            months: Some(Months::Count(1)),
            starts: "11/3/2026".into(),
            expires: "12/3/2026".into(),
        }
    }

    fn filled_payment_columns(row: &IntroRow) -> Vec<usize> {
        [CASH_CHECK, PAYPAL, GROUPON]
            .into_iter()
            .filter(|&i| !row.cells[i].is_blank())
            .collect()
    }

    #[test]
    fn online_checkout_wins_over_groupon() {
        let row = format_row(&enriched(ONLINE_CHECKOUT, "GRP-1"), &prices());
        assert_eq!(row.payment_column, PaymentColumn::Paypal);
        assert_eq!(row.cells[PAYPAL], Cell::text("125"));
        assert_eq!(filled_payment_columns(&row), vec![PAYPAL]);
    }

    #[test]
    fn groupon_code_selects_groupon_price() {
        let row = format_row(&enriched("Cash", "GRP-1"), &prices());
        assert_eq!(row.payment_column, PaymentColumn::Groupon);
        assert_eq!(filled_payment_columns(&row), vec![GROUPON]);
    }

    #[test]
    fn default_is_cash_check() {
        let row = format_row(&enriched("Pay at the dojo", ""), &prices());
        assert_eq!(row.payment_column, PaymentColumn::CashCheck);
        assert_eq!(row.cells[CASH_CHECK], Cell::text("120"));
        assert_eq!(filled_payment_columns(&row), vec![CASH_CHECK]);
    }

    #[test]
    fn fixed_columns_are_filled() {
        let row = format_row(&enriched("Cash", ""), &prices());
        assert_eq!(row.cells[NAME], Cell::text("Ann Lee"));
        assert_eq!(row.cells[MONTHS], Cell::text("1"));
        assert_eq!(row.cells[STARTED], Cell::text("11/3/2026"));
        assert_eq!(row.cells[EXPIRES], Cell::text("12/3/2026"));
        assert_eq!(row.cells[PHONE], Cell::text("555-1111"));
        assert_eq!(row.cells[EMAIL], Cell::text("ann@x.com"));
        assert_eq!(row.cells[SUBMITTED], Cell::text("2026-10-18 09:00:00"));
        assert!(row.cells[ATTENDANCE].is_blank());
        assert!(row.cells[NOTES].is_blank());
        assert_eq!(row.into_cells().len(), INTRO_COLUMNS);
    }

    #[test]
    fn price_miss_leaves_column_empty() {
        let row = format_row(&enriched("Cash", ""), &PriceTable::default());
        assert_eq!(row.payment_column, PaymentColumn::CashCheck);
        assert!(filled_payment_columns(&row).is_empty());
    }
}

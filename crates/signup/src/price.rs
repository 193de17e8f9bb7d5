use crate::model::{Cell, RawRow};

/// Prices by promotion (rows) and payment method (columns).
///
/// Row 0 holds payment-method labels from column 1 on; every later row
/// starts with a promotion label. Row and column order are kept as read.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    rows: Vec<RawRow>,
}

impl PriceTable {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Price for `promotion` paid with `payment_method`.
    ///
    /// An unknown payment method is logged and treated as a miss; so is an
    /// unknown promotion or an empty price cell. First match wins.
    pub fn price(&self, promotion: &str, payment_method: &str) -> Option<Cell> {
        let header = self.rows.first()?;
        let Some(col) = header
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, label)| label.to_string() == payment_method)
            .map(|(col, _)| col)
        else {
            log::warn!("payment method {:?} not found in price table", payment_method);
            return None;
        };

        let row = self.rows.iter().skip(1).find(|row| {
            row.first()
                .map(|label| label.to_string() == promotion)
                .unwrap_or(false)
        });

        match row.and_then(|row| row.get(col)) {
            Some(cell) if !cell.is_blank() => Some(cell.clone()),
            Some(_) => None,
            None => {
                log::debug!("no {} price for promotion {:?}", payment_method, promotion);
                None
            }
        }
    }
}

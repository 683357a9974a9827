//! The running totals shown above the movement list.

use rusqlite::Connection;

use crate::Error;

/// Total saved, total spent and the balance between them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// The sum of the amounts of all savings, zero if there are none.
    pub total_saved: f64,
    /// The sum of the amounts of all expenses, zero if there are none.
    pub total_spent: f64,
    /// `total_saved - total_spent`.
    pub balance: f64,
}

impl Summary {
    /// Create a summary, deriving the balance from the two totals.
    pub fn new(total_saved: f64, total_spent: f64) -> Self {
        Self {
            total_saved,
            total_spent,
            balance: total_saved - total_spent,
        }
    }
}

/// Sum the amounts of savings and expenses across all movements.
///
/// An empty ledger yields zero for every figure.
pub fn get_summary(connection: &Connection) -> Result<Summary, Error> {
    connection
        .query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN tipo = 'saving' THEN monto END), 0.0),
                COALESCE(SUM(CASE WHEN tipo = 'expense' THEN monto END), 0.0)
            FROM movimientos",
            [],
            |row| Ok(Summary::new(row.get(0)?, row.get(1)?)),
        )
        .map_err(|error| error.into())
}

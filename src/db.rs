//! Schema setup for the application's SQLite database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{category::create_category_table, movement::create_movement_table};

/// Create the tables for the domain models if they do not exist yet.
///
/// Safe to call on every start up, existing data is left untouched.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    // Has no effect inside a transaction, so it must come first.
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_movement_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

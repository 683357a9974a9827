//! Database operations for movements.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    movement::{Amount, Movement, MovementBuilder, MovementId},
};

/// Save a new movement and return it with its generated ID.
///
/// The timestamp defaults to the current UTC time if the builder has none.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category ID does not refer to a category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_movement(
    builder: MovementBuilder,
    connection: &Connection,
) -> Result<Movement, Error> {
    let timestamp = builder.timestamp.unwrap_or_else(OffsetDateTime::now_utc);

    connection
        .prepare(
            "INSERT INTO movimientos (tipo, monto, nota, fecha, categoria_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, tipo, monto, nota, fecha, categoria_id",
        )?
        .query_row(
            (
                builder.kind,
                builder.amount.as_f64(),
                &builder.note,
                timestamp,
                builder.category_id,
            ),
            map_movement_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(builder.category_id),
            error => error.into(),
        })
}

/// Retrieve a movement by its `id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a movement.
pub fn get_movement(id: MovementId, connection: &Connection) -> Result<Movement, Error> {
    let movement = connection
        .prepare(
            "SELECT id, tipo, monto, nota, fecha, categoria_id FROM movimientos WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_movement_row)?;

    Ok(movement)
}

/// Retrieve all movements, most recent first.
///
/// Movements with the same timestamp are listed in reverse order of creation.
pub fn get_all_movements(connection: &Connection) -> Result<Vec<Movement>, Error> {
    connection
        .prepare(
            "SELECT id, tipo, monto, nota, fecha, categoria_id FROM movimientos
             ORDER BY fecha DESC, id DESC",
        )?
        .query_map([], map_movement_row)?
        .map(|maybe_movement| maybe_movement.map_err(Error::from))
        .collect()
}

/// Get the total number of movements in the database.
pub fn count_movements(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM movimientos;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the movement table and its indexes.
///
/// Deleting a category clears the category of its movements rather than deleting them.
pub fn create_movement_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS movimientos (
            id INTEGER PRIMARY KEY,
            tipo TEXT NOT NULL,
            monto REAL NOT NULL CHECK (monto > 0),
            nota TEXT,
            fecha TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            categoria_id INTEGER,
            FOREIGN KEY(categoria_id) REFERENCES categorias(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_movimientos_fecha ON movimientos(fecha);
        CREATE INDEX IF NOT EXISTS idx_movimientos_tipo ON movimientos(tipo);
        CREATE INDEX IF NOT EXISTS idx_movimientos_categoria ON movimientos(categoria_id);",
    )?;

    Ok(())
}

/// Map a database row to a [Movement].
fn map_movement_row(row: &Row) -> Result<Movement, rusqlite::Error> {
    let id = row.get(0)?;
    let kind = row.get(1)?;
    let amount = Amount::new_unchecked(row.get(2)?);
    let note: Option<String> = row.get(3)?;
    let timestamp = row.get(4)?;
    let category_id = row.get(5)?;

    Ok(Movement {
        id,
        kind,
        amount,
        note: note.unwrap_or_default(),
        timestamp,
        category_id,
    })
}

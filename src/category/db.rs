//! Database operations for categories.

use std::collections::HashMap;

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
};

/// Create a category and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateCategoryName] if a category with the same name, ignoring case, exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO categorias (nombre) VALUES (?1);",
            (name.as_ref(),),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateCategoryName(name.to_string()),
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name })
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `category_id` does not refer to a category.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, nombre FROM categorias WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered by name.
///
/// Names are compared byte by byte, so uppercase letters sort before lowercase ones.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, nombre FROM categorias ORDER BY nombre COLLATE BINARY ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete a category by ID.
///
/// Movements that referenced the category are kept, their category is cleared.
///
/// # Errors
/// Returns [Error::DeleteMissingCategory] if the category doesn't exist.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM categorias WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Count the movements that reference each category.
///
/// Categories with no movements are absent from the map.
pub fn count_movements_per_category(
    connection: &Connection,
) -> Result<HashMap<CategoryId, u32>, Error> {
    let result: Result<HashMap<CategoryId, u32>, rusqlite::Error> = connection
        .prepare(
            "SELECT categoria_id, COUNT(1) FROM movimientos
            WHERE categoria_id IS NOT NULL
            GROUP BY categoria_id",
        )?
        .query_map((), |row| {
            let category_id = row.get(0)?;
            let count = row.get(1)?;

            Ok((category_id, count))
        })?
        .collect();

    result.map_err(Error::from)
}

/// Create the category table and its indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS categorias (
            id INTEGER PRIMARY KEY,
            nombre TEXT NOT NULL UNIQUE COLLATE NOCASE
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    Ok(Category { id, name })
}

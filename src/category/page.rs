//! The categories page: creates, deletes and lists categories.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::{
        Category, CategoryForm, CategoryId, CategoryName, count_movements_per_category,
        create_category, delete_category, get_all_categories,
    },
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_CONTAINER_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, form_error,
    },
    navigation::NavBar,
};

/// The state needed for the categories page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string of the categories page.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    /// The ID of a category to delete.
    ///
    /// Kept as text so that a malformed ID is ignored instead of rejected.
    pub eliminar: Option<String>,
}

/// Render the categories page, deleting the category named by `?eliminar=` first.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
    Query(query): Query<CategoriesQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    if try_delete_category(query.eliminar.as_deref(), &connection)? {
        return Ok(Redirect::to(endpoints::CATEGORIES_VIEW).into_response());
    }

    render_categories_page(&connection, None)
}

/// Create a category from the submitted name and redirect back to the categories page.
///
/// A blank or duplicate name re-renders the page with an error. Only when
/// nothing was created is the `?eliminar=` parameter considered.
pub async fn create_category_endpoint(
    State(state): State<CategoriesPageState>,
    Query(query): Query<CategoriesQuery>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let creation_error = match CategoryName::new(&form.nombre)
        .and_then(|name| create_category(name, &connection))
    {
        Ok(category) => {
            tracing::info!("Created category {} with ID {}", category.name, category.id);
            return Ok(Redirect::to(endpoints::CATEGORIES_VIEW).into_response());
        }
        Err(error @ (Error::EmptyCategoryName | Error::DuplicateCategoryName(_))) => {
            tracing::info!("Rejected category name {:?}: {error}", form.nombre);
            error
        }
        Err(error) => {
            tracing::error!("Could not create category {:?}: {error}", form.nombre);
            return Err(error);
        }
    };

    if try_delete_category(query.eliminar.as_deref(), &connection)? {
        return Ok(Redirect::to(endpoints::CATEGORIES_VIEW).into_response());
    }

    render_categories_page(&connection, Some(&creation_error.to_string()))
}

/// Delete the category with the ID in `raw_category_id`, returning whether one was deleted.
///
/// Missing, malformed or unknown IDs are ignored.
fn try_delete_category(
    raw_category_id: Option<&str>,
    connection: &Connection,
) -> Result<bool, Error> {
    let Some(category_id) =
        raw_category_id.and_then(|raw| raw.trim().parse::<CategoryId>().ok())
    else {
        return Ok(false);
    };

    match delete_category(category_id, connection) {
        Ok(()) => {
            tracing::info!("Deleted category {category_id}");
            Ok(true)
        }
        Err(Error::DeleteMissingCategory) => {
            tracing::debug!("Ignoring request to delete missing category {category_id}");
            Ok(false)
        }
        Err(error) => {
            tracing::error!("Could not delete category {category_id}: {error}");
            Err(error)
        }
    }
}

/// A category with the number of movements that reference it.
struct CategoryRow {
    category: Category,
    movement_count: u32,
    delete_url: String,
}

fn render_categories_page(
    connection: &Connection,
    error_message: Option<&str>,
) -> Result<Response, Error> {
    let categories = get_all_categories(connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;
    let movements_per_category = count_movements_per_category(connection)
        .inspect_err(|error| tracing::error!("Could not count movements per category: {error}"))?;

    let rows = categories
        .into_iter()
        .map(|category| CategoryRow {
            movement_count: movements_per_category
                .get(&category.id)
                .copied()
                .unwrap_or(0),
            delete_url: endpoints::format_endpoint(endpoints::DELETE_CATEGORY, category.id),
            category,
        })
        .collect::<Vec<_>>();

    Ok(categories_view(&rows, error_message).into_response())
}

fn categories_view(rows: &[CategoryRow], error_message: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |row: &CategoryRow| {
        let confirm_message = format!(
            "Delete '{}'? Its {} movement(s) will be kept without a category.",
            row.category.name, row.movement_count
        );

        html!(
            tr class=(TABLE_ROW_STYLE) data-category-id=(row.category.id)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE) { (row.category.name.as_ref()) }
                }

                td class=(TABLE_CELL_STYLE) { (row.movement_count) }

                td class=(TABLE_CELL_STYLE)
                {
                    a
                        href=(row.delete_url)
                        class=(BUTTON_DELETE_STYLE)
                        onclick={ "return confirm(" (format!("{confirm_message:?}")) ");" }
                    {
                        "Delete"
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-8"
            {
                section class=(FORM_CONTAINER_STYLE)
                {
                    h1 class="text-xl font-bold mb-4" { "New Category" }

                    form
                        method="post"
                        action=(endpoints::CATEGORIES_VIEW)
                        class="w-full space-y-4 md:space-y-6"
                    {
                        div
                        {
                            label for="nombre" class=(FORM_LABEL_STYLE) { "Name" }

                            input
                                id="nombre"
                                type="text"
                                name="nombre"
                                placeholder="e.g. Food"
                                required
                                autofocus
                                class=(FORM_TEXT_INPUT_STYLE);
                        }

                        (form_error(error_message))

                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
                    }
                }

                section class="w-full overflow-x-auto"
                {
                    h2 class="text-xl font-bold mb-4" { "Categories" }

                    table
                        id="categories"
                        class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Movements" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (table_row(row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                    {
                                        "No categories created yet."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &content)
}

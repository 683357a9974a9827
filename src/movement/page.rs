//! The movements page: records new movements and lists them with the running totals.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
// axum_extra's Form tolerates missing and empty fields, which users can submit
// by tampering with the form.
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryId, get_all_categories, get_category},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, form_error, format_currency,
    },
    movement::{
        Amount, Movement, MovementForm, MovementKind, create_movement, get_all_movements,
    },
    navigation::NavBar,
    summary::{Summary, get_summary},
};

/// The state needed for the movements page.
#[derive(Debug, Clone)]
pub struct MovementsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for MovementsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the movements, the categories to choose from and the running totals.
pub async fn get_movements_page(
    State(state): State<MovementsPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    render_movements_page(&connection, None)
}

/// Record a new movement and redirect back to the movements page.
///
/// An invalid amount re-renders the page with an error and saves nothing.
/// An unknown kind is recorded as an expense, and a category that cannot be
/// found is dropped rather than rejected.
pub async fn create_movement_endpoint(
    State(state): State<MovementsPageState>,
    Form(form): Form<MovementForm>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let amount = match Amount::parse(&form.monto) {
        Ok(amount) => amount,
        Err(error) => {
            tracing::info!("Rejected movement with amount {:?}: {error}", form.monto);
            return render_movements_page(&connection, Some(&error.to_string()));
        }
    };

    let kind = MovementKind::coerce(&form.tipo);
    let category_id = match kind {
        MovementKind::Expense => resolve_category(form.categoria_id.as_deref(), &connection)?,
        MovementKind::Saving => None,
    };

    let movement = Movement::build(kind, amount)
        .note(&form.nota)
        .category_id(category_id);

    create_movement(movement, &connection)
        .inspect_err(|error| tracing::error!("could not create movement: {error}"))?;

    Ok(Redirect::to(endpoints::MOVEMENTS_VIEW).into_response())
}

/// Look up the category submitted with an expense.
///
/// Text that is not an ID, or an ID with no category, yields `None`.
fn resolve_category(
    raw_category_id: Option<&str>,
    connection: &Connection,
) -> Result<Option<CategoryId>, Error> {
    let Some(category_id) =
        raw_category_id.and_then(|raw| raw.trim().parse::<CategoryId>().ok())
    else {
        return Ok(None);
    };

    match get_category(category_id, connection) {
        Ok(category) => Ok(Some(category.id)),
        Err(Error::NotFound) => {
            tracing::debug!("Ignoring unknown category {category_id} for new movement");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

fn render_movements_page(
    connection: &Connection,
    error_message: Option<&str>,
) -> Result<Response, Error> {
    let movements = get_all_movements(connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve movements: {error}"))?;
    let categories = get_all_categories(connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;
    let summary = get_summary(connection)
        .inspect_err(|error| tracing::error!("Failed to calculate summary: {error}"))?;

    Ok(movements_view(&movements, &categories, summary, error_message).into_response())
}

fn movements_view(
    movements: &[Movement],
    categories: &[Category],
    summary: Summary,
    error_message: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::MOVEMENTS_VIEW).into_html();
    let category_names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_ref()))
        .collect();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-8"
            {
                (summary_view(summary))

                section class="max-w-md mx-auto w-full"
                {
                    h2 class="text-xl font-bold mb-4" { "New Movement" }
                    (movement_form_view(categories, error_message))
                }

                (movement_table_view(movements, &category_names))
            }
        }
    );

    base("Movements", &content)
}

fn summary_view(summary: Summary) -> Markup {
    let card = |id: &str, title: &str, amount: f64| {
        html!(
            div
                id=(id)
                class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm
                    dark:border-gray-700 dark:bg-gray-800"
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { (title) }
                p class="text-2xl font-semibold tabular-nums" { (format_currency(amount)) }
            }
        )
    };

    html!(
        section class="grid grid-cols-1 gap-4 md:grid-cols-3"
        {
            (card("total-saved", "Total Saved", summary.total_saved))
            (card("total-spent", "Total Spent", summary.total_spent))
            (card("balance", "Balance", summary.balance))
        }
    )
}

fn movement_form_view(categories: &[Category], error_message: Option<&str>) -> Markup {
    html!(
        form
            method="post"
            action=(endpoints::MOVEMENTS_VIEW)
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="tipo" class=(FORM_LABEL_STYLE) { "Kind" }

                select id="tipo" name="tipo" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for kind in [MovementKind::Expense, MovementKind::Saving] {
                        option value=(kind.as_str()) { (kind.label()) }
                    }
                }
            }

            div
            {
                label for="monto" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="monto"
                    type="number"
                    name="monto"
                    step="any"
                    min="0"
                    placeholder="0.00"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="nota" class=(FORM_LABEL_STYLE) { "Note" }

                input
                    id="nota"
                    type="text"
                    name="nota"
                    placeholder="What was it for?"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="categoria_id" class=(FORM_LABEL_STYLE) { "Category (expenses only)" }

                select id="categoria_id" name="categoria_id" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "No category" }

                    @for category in categories {
                        option value=(category.id) { (category.name.as_ref()) }
                    }
                }

                @if categories.is_empty() {
                    span class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "No categories yet. "
                        a href=(endpoints::CATEGORIES_VIEW) class=(LINK_STYLE) { "Create one" }
                    }
                }
            }

            (form_error(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Movement" }
        }
    )
}

fn movement_table_view(
    movements: &[Movement],
    category_names: &HashMap<CategoryId, &str>,
) -> Markup {
    let table_row = |movement: &Movement| {
        let timestamp = movement.timestamp;
        let category_name = movement
            .category_id
            .and_then(|category_id| category_names.get(&category_id));

        html!(
            tr class=(TABLE_ROW_STYLE) data-kind=(movement.kind.as_str())
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (format!("{} {:02}:{:02}", timestamp.date(), timestamp.hour(), timestamp.minute()))
                }
                td class=(TABLE_CELL_STYLE) { (movement.kind.label()) }
                td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                {
                    (format_currency(movement.amount.as_f64()))
                }
                td class=(TABLE_CELL_STYLE)
                {
                    @if let Some(name) = category_name {
                        span class=(CATEGORY_BADGE_STYLE) { (name) }
                    } @else {
                        "-"
                    }
                }
                td class=(TABLE_CELL_STYLE) { (movement.note) }
            }
        )
    };

    html!(
        section class="dark:bg-gray-800 w-full overflow-x-auto"
        {
            table
                id="movements"
                class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                    }
                }

                tbody
                {
                    @for movement in movements {
                        (table_row(movement))
                    }

                    @if movements.is_empty() {
                        tr
                        {
                            td
                                colspan="5"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No movements recorded yet."
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod movements_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::datetime;

    use crate::{
        category::{CategoryName, create_category},
        db::initialize,
        endpoints,
        movement::{Amount, Movement, MovementKind, create_movement, get_movements_page},
        test_utils::{
            assert_content_type, assert_form_input, assert_form_posts_to, assert_form_select,
            assert_form_submit_button, assert_status_ok, assert_valid_html, must_get_form,
            must_get_text, parse_html_document,
        },
    };

    use super::MovementsPageState;

    fn get_test_state() -> MovementsPageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        MovementsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn render_empty_page() {
        let state = get_test_state();

        let response = get_movements_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_posts_to(&form, endpoints::MOVEMENTS_VIEW);
        assert_form_select(&form, "tipo", &["expense", "saving"]);
        assert_form_input(&form, "monto", "number");
        assert_form_select(&form, "categoria_id", &[""]);
        assert_form_submit_button(&form);
        assert_eq!(must_get_text(&html, "#total-saved p"), "$0.00");
        assert_eq!(must_get_text(&html, "#total-spent p"), "$0.00");
        assert_eq!(must_get_text(&html, "#balance p"), "$0.00");
        assert_eq!(
            form.select(&Selector::parse("p").unwrap()).count(),
            0,
            "want no error message on a plain GET"
        );
    }

    #[tokio::test]
    async fn lists_movements_most_recent_first_with_category_names() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let food = create_category(CategoryName::new_unchecked("Food"), &connection).unwrap();
            create_movement(
                Movement::build(MovementKind::Saving, Amount::new_unchecked(100.0))
                    .note("pay day")
                    .timestamp(datetime!(2025-01-01 09:00:00 UTC)),
                &connection,
            )
            .unwrap();
            create_movement(
                Movement::build(MovementKind::Expense, Amount::new_unchecked(50.0))
                    .category_id(Some(food.id))
                    .timestamp(datetime!(2025-01-02 18:30:00 UTC)),
                &connection,
            )
            .unwrap();
        }

        let response = get_movements_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let rows = table_rows(&html);
        assert_eq!(
            rows,
            [
                vec!["2025-01-02 18:30", "Expense", "$50.00", "Food", ""],
                vec!["2025-01-01 09:00", "Saving", "$100.00", "-", "pay day"],
            ]
        );
        assert_eq!(must_get_text(&html, "#total-saved p"), "$100.00");
        assert_eq!(must_get_text(&html, "#total-spent p"), "$50.00");
        assert_eq!(must_get_text(&html, "#balance p"), "$50.00");
    }

    #[tokio::test]
    async fn category_select_lists_categories_by_name() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for name in ["rent", "Food", "Bills"] {
                create_category(CategoryName::new_unchecked(name), &connection).unwrap();
            }
        }

        let response = get_movements_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let options = html
            .select(&Selector::parse("select[name=categoria_id] option").unwrap())
            .map(|option| option.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(options, ["No category", "Bills", "Food", "rent"]);
    }

    #[tokio::test]
    async fn amount_input_accepts_any_positive_precision() {
        let state = get_test_state();

        let response = get_movements_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let input = html
            .select(&Selector::parse("input[name=monto]").unwrap())
            .next()
            .expect("No amount input");
        assert_eq!(input.value().attr("step"), Some("any"));
    }

    #[tokio::test]
    async fn extreme_amounts_render_as_currency() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (kind, amount) in [
                (MovementKind::Saving, 1e308),
                (MovementKind::Saving, 1e308),
                (MovementKind::Expense, 0.001),
                (MovementKind::Expense, 1e21),
            ] {
                create_movement(Movement::build(kind, Amount::new_unchecked(amount)), &connection)
                    .unwrap();
            }
        }

        let response = get_movements_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(must_get_text(&html, "#total-saved p"), "$∞");
        let amounts = table_rows(&html)
            .into_iter()
            .map(|row| row[2].clone())
            .collect::<Vec<_>>();
        assert!(amounts.contains(&"$0.00".to_owned()));
        assert!(amounts.contains(&"$1,000,000,000,000,000,000,000.00".to_owned()));
        assert!(
            amounts.iter().all(|amount| amount.starts_with('$') && !amount.contains('e')),
            "got {amounts:?}"
        );
    }

    fn table_rows(html: &Html) -> Vec<Vec<String>> {
        let row_selector = Selector::parse("#movements tbody tr[data-kind]").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        html.select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect()
    }
}

//! The URIs of the app's pages.
//!
//! For endpoints that take a parameter, e.g., '/categorias?eliminar={category_id}',
//! use [format_endpoint].

/// The landing page.
pub const ROOT: &str = "/";
/// The page for recording and listing movements, along with the running totals.
pub const MOVEMENTS_VIEW: &str = "/finanzas";
/// The page for creating and listing categories.
pub const CATEGORIES_VIEW: &str = "/categorias";
/// The link that deletes a category and then shows the categories page.
pub const DELETE_CATEGORY: &str = "/categorias?eliminar={category_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categorias?eliminar={category_id}',
/// '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

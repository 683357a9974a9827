//! Categories for labelling expense movements.

mod db;
mod domain;
mod page;

pub use db::{
    count_movements_per_category, create_category, create_category_table, delete_category,
    get_all_categories, get_category,
};
pub use domain::{Category, CategoryForm, CategoryId, CategoryName};
pub use page::{CategoriesPageState, CategoriesQuery, create_category_endpoint, get_categories_page};

//! The landing page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Render the landing page with links to the movements and categories pages.
pub async fn get_landing_page() -> Response {
    landing_view().into_response()
}

fn landing_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="max-w-xl space-y-6 text-center"
            {
                h1 class="text-3xl font-bold" { "Finanzas" }

                p class="text-gray-600 dark:text-gray-300"
                {
                    "Record what you save and what you spend, label expenses with categories "
                    "and keep an eye on your balance."
                }

                a href=(endpoints::MOVEMENTS_VIEW) class=(BUTTON_PRIMARY_STYLE) id="movements-link"
                {
                    "Go to Movements"
                }

                p
                {
                    "Need a new label? "
                    a href=(endpoints::CATEGORIES_VIEW) class=(LINK_STYLE) id="categories-link"
                    {
                        "Manage categories"
                    }
                }
            }
        }
    );

    base("Home", &content)
}

#[cfg(test)]
mod landing_page_tests {
    use scraper::Selector;

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, parse_html_document,
        },
    };

    use super::get_landing_page;

    #[tokio::test]
    async fn links_to_both_pages() {
        let response = get_landing_page().await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        for (id, want_href) in [
            ("movements-link", endpoints::MOVEMENTS_VIEW),
            ("categories-link", endpoints::CATEGORIES_VIEW),
        ] {
            let link = html
                .select(&Selector::parse(&format!("#{id}")).unwrap())
                .next()
                .unwrap_or_else(|| panic!("No link with id {id}"));
            assert_eq!(link.value().attr("href"), Some(want_href));
        }
        let current = html
            .select(&Selector::parse("a[aria-current=page]").unwrap())
            .map(|link| link.value().attr("href").unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(current, [endpoints::ROOT]);
    }
}

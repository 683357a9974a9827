use maud::{DOCTYPE, Markup, html};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_ERROR_STYLE: &str = "text-red-600 dark:text-red-400";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Category badge style
pub const CATEGORY_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-blue-800 bg-blue-100 rounded-full \
    dark:bg-blue-900 dark:text-blue-300";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The document shell shared by every page.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Finanzas" }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// The inline message shown under a form after a rejected submission.
///
/// Renders nothing when `error_message` is `None`.
pub fn form_error(error_message: Option<&str>) -> Markup {
    html! {
        @if let Some(error_message) = error_message {
            p class=(FORM_ERROR_STYLE) { "Error: " (error_message) }
        }
    }
}

/// Format `number` as dollars and cents with thousands separators, e.g. "$1,234.50" or "-$50.00".
///
/// The number is rounded to the nearest cent, so amounts below half a cent show as "$0.00".
/// Totals that overflow to infinity show as "$∞" or "-$∞", and NaN as "N/A".
pub fn format_currency(number: f64) -> String {
    if number.is_nan() {
        return "N/A".to_owned();
    }

    if number.is_infinite() {
        return if number > 0.0 { "$∞" } else { "-$∞" }.to_owned();
    }

    let cents = format!("{:.2}", number.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let is_negative = number < 0.0 && cents.bytes().any(|digit| matches!(digit, b'1'..=b'9'));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if is_negative { "-" } else { "" };

    format!("{sign}${grouped}.{fraction}")
}

#[cfg(test)]
mod format_currency_tests {
    use super::format_currency;

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn formats_whole_numbers_with_cents() {
        assert_eq!(format_currency(100.0), "$100.00");
    }

    #[test]
    fn pads_single_decimal() {
        assert_eq!(format_currency(12.3), "$12.30");
    }

    #[test]
    fn formats_negative_numbers() {
        assert_eq!(format_currency(-50.0), "-$50.00");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(999.99), "$999.99");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-123_456.78), "-$123,456.78");
    }

    #[test]
    fn rounds_sub_cent_values() {
        assert_eq!(format_currency(0.001), "$0.00");
        assert_eq!(format_currency(0.006), "$0.01");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn large_values_are_not_in_scientific_notation() {
        assert_eq!(format_currency(1e15), "$1,000,000,000,000,000.00");
        assert_eq!(
            format_currency(1e21),
            "$1,000,000,000,000,000,000,000.00"
        );
        assert!(!format_currency(1e300).contains('e'));
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_currency(f64::INFINITY), "$∞");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-$∞");
        assert_eq!(format_currency(f64::NAN), "N/A");
    }
}

use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Check that `form` posts back to `endpoint` as a plain HTML form.
#[track_caller]
pub(crate) fn assert_form_posts_to(form: &ElementRef<'_>, endpoint: &str) {
    let method = form.value().attr("method").unwrap_or_default();
    let action = form
        .value()
        .attr("action")
        .unwrap_or_else(|| panic!("action attribute missing"));

    assert_eq!(method, "post", "want form with method=\"post\", got {method:?}");
    assert_eq!(
        action, endpoint,
        "want form with action=\"{endpoint}\", got {action:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    for input in form.select(&Selector::parse("input").unwrap()) {
        let input_name = input.value().attr("name").unwrap_or_default();

        if input_name == name {
            let input_type = input.value().attr("type").unwrap_or_default();
            let input_required = input.value().attr("required");

            assert_eq!(
                input_type, type_,
                "want input with type \"{type_}\", got {input_type:?}"
            );

            assert!(
                input_required.is_some(),
                "want input with name {name} to have the required attribute but got none"
            );

            return;
        }
    }

    panic!("No input found with name \"{name}\" and type \"{type_}\"");
}

/// Check that `form` has a select named `name` offering exactly `want_values`, in order.
#[track_caller]
pub(crate) fn assert_form_select(form: &ElementRef<'_>, name: &str, want_values: &[&str]) {
    let selector = Selector::parse(&format!("select[name={name}] option")).unwrap();
    let got_values = form
        .select(&selector)
        .map(|option| option.value().attr("value").unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(
        got_values, want_values,
        "want select {name} with options {want_values:?}, got {got_values:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
}

#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_error_message: &str) {
    let p = Selector::parse("p").unwrap();
    let error_message = form
        .select(&p)
        .next()
        .expect("No error message found")
        .text()
        .collect::<Vec<_>>()
        .join("");
    let got_error_message = error_message.trim();

    assert_eq!(want_error_message, got_error_message);
}

#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_posts_to, assert_form_select,
    assert_form_submit_button, must_get_form,
};
pub(crate) use html::{assert_valid_html, must_get_text, parse_html_document};
pub(crate) use http::{assert_content_type, assert_redirect, assert_status_ok, get_header};

//! JavaScript snippet builders
//!
//! Each builder formats one console expression. Caller-supplied
//! identifiers and text are JSON-encoded before interpolation, so a
//! quote or backslash in the input stays inside the generated string
//! literal instead of terminating it.

/// JSON-encode `s` as a JavaScript string literal, quotes included.
fn quote(s: &str) -> String {
    // Serializing a &str cannot fail
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Click the first element matching a CSS selector.
pub fn click_selector(selector: &str) -> String {
    format!("document.querySelector({}).click()", quote(selector))
}

/// Click the element with the given id.
pub fn click_id(id: &str) -> String {
    format!("document.getElementById({}).click()", quote(id))
}

/// Click the item at `index` among elements with the provided classes.
/// Multiple classes are separated by spaces.
pub fn click_classes(classes: &str, index: usize) -> String {
    format!(
        "document.getElementsByClassName({})[{}].click()",
        quote(classes),
        index
    )
}

/// Inner content of the first element matching a CSS selector.
pub fn content_of_selector(selector: &str) -> String {
    format!("document.querySelector({}).innerHTML", quote(selector))
}

/// Inner content of the item at `index` among elements with the
/// provided classes.
pub fn content_of_classes(classes: &str, index: usize) -> String {
    format!(
        "document.getElementsByClassName({})[{}].innerHTML",
        quote(classes),
        index
    )
}

/// Form value of the item at `index` among elements with the provided
/// classes.
pub fn value_of_classes(classes: &str, index: usize) -> String {
    format!(
        "document.getElementsByClassName({})[{}].value",
        quote(classes),
        index
    )
}

/// Set the inner content of the element with the given id.
pub fn set_text_by_id(id: &str, text: &str) -> String {
    format!(
        "document.getElementById({}).innerHTML = {}",
        quote(id),
        quote(text)
    )
}

/// Set the inner content of the item at `index` among elements with the
/// provided classes.
pub fn set_text_by_classes(classes: &str, index: usize, text: &str) -> String {
    format!(
        "document.getElementsByClassName({})[{}].innerHTML = {}",
        quote(classes),
        index,
        quote(text)
    )
}

/// Set the form value of the item at `index` among elements with the
/// provided classes.
pub fn set_input_by_classes(classes: &str, index: usize, text: &str) -> String {
    format!(
        "document.getElementsByClassName({})[{}].value = {}",
        quote(classes),
        index,
        quote(text)
    )
}

/// Click the item at `index` among elements of `element_type` whose
/// inner content starts with `text`. Requires jQuery on the page.
pub fn click_by_inner_html(element_type: &str, text: &str, index: usize) -> String {
    format!(
        "var x = $({}).filter(function(idx) {{ return this.innerHTML.indexOf({}) == 0; }});x[{}].click()",
        quote(element_type),
        quote(text),
        index
    )
}

/// Fetch the item at `index` among elements of `element_type` whose
/// inner content starts with `text`. Requires jQuery on the page.
pub fn item_by_inner_html(element_type: &str, text: &str, index: usize) -> String {
    format!(
        "var x = $({}).filter(function(idx) {{ return this.innerHTML.indexOf({}) == 0; }});x[{}]",
        quote(element_type),
        quote(text),
        index
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_selector() {
        assert_eq!(
            click_selector("#go"),
            r##"document.querySelector("#go").click()"##
        );
    }

    #[test]
    fn test_click_classes_with_index() {
        assert_eq!(
            click_classes("btn primary", 2),
            r#"document.getElementsByClassName("btn primary")[2].click()"#
        );
    }

    #[test]
    fn test_click_id() {
        assert_eq!(click_id("go"), r#"document.getElementById("go").click()"#);
    }

    #[test]
    fn test_set_text_by_id() {
        assert_eq!(
            set_text_by_id("title", "Hello"),
            r#"document.getElementById("title").innerHTML = "Hello""#
        );
    }

    #[test]
    fn test_content_of_selector_is_property_access() {
        assert_eq!(
            content_of_selector(".headline"),
            r#"document.querySelector(".headline").innerHTML"#
        );
    }

    #[test]
    fn test_value_of_classes() {
        assert_eq!(
            value_of_classes("field email", 0),
            r#"document.getElementsByClassName("field email")[0].value"#
        );
    }

    #[test]
    fn test_set_input_by_classes() {
        assert_eq!(
            set_input_by_classes("field", 1, "on"),
            r#"document.getElementsByClassName("field")[1].value = "on""#
        );
    }

    #[test]
    fn test_inner_html_match_uses_jquery_filter() {
        assert_eq!(
            click_by_inner_html("a", "Sign in", 0),
            r#"var x = $("a").filter(function(idx) { return this.innerHTML.indexOf("Sign in") == 0; });x[0].click()"#
        );
    }

    #[test]
    fn test_quote_neutralizes_embedded_quotes() {
        // A double quote in the input must not terminate the generated literal
        assert_eq!(
            click_selector(r#"a"),alert(1),("#),
            r#"document.querySelector("a\"),alert(1),(").click()"#
        );
    }

    #[test]
    fn test_quote_escapes_backslashes_and_newlines() {
        assert_eq!(
            set_text_by_id("t", "line1\nline2\\end"),
            r#"document.getElementById("t").innerHTML = "line1\nline2\\end""#
        );
    }
}

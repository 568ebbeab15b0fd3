//! HTML helpers for the router's login and statistics pages.
//!
//! All functions take the page source and return owned data, so no parsed
//! document is held across an `.await`.

use scraper::{ElementRef, Html, Selector};

/// How a form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

/// A login form pulled out of a page, ready to fill in and submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// The `action` attribute, if present and non-empty.
    pub action: Option<String>,
    pub method: FormMethod,
    /// Named fields and their current values, in document order.
    pub fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Locate the form with the given id and collect its fields.
    ///
    /// Unchecked checkboxes and radios are left out, as is every submit
    /// button after the first.
    pub fn find(html: &str, form_id: &str) -> Option<Self> {
        let document = Html::parse_document(html);
        let form_selector = Selector::parse(&format!("form[id=\"{}\"]", form_id)).ok()?;
        let input_selector = Selector::parse("input[name]").ok()?;

        let form = document.select(&form_selector).next()?;
        let action = form
            .value()
            .attr("action")
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        let method = match form.value().attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => FormMethod::Post,
            _ => FormMethod::Get,
        };

        let mut fields = Vec::new();
        let mut seen_submit = false;
        for input in form.select(&input_selector) {
            let element = input.value();
            let Some(name) = element.attr("name") else {
                continue;
            };
            let kind = element.attr("type").unwrap_or("text").to_ascii_lowercase();
            match kind.as_str() {
                "checkbox" | "radio" if element.attr("checked").is_none() => continue,
                "submit" | "image" => {
                    if seen_submit {
                        continue;
                    }
                    seen_submit = true;
                }
                "button" | "reset" | "file" => continue,
                _ => {}
            }
            let value = element.attr("value").unwrap_or_else(|| default_value(&kind));
            fields.push((name.to_string(), value.to_string()));
        }

        Some(Self {
            action,
            method,
            fields,
        })
    }

    /// Set a field, adding it if the form does not have it.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    /// Value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn default_value(kind: &str) -> &'static str {
    match kind {
        "checkbox" | "radio" => "on",
        _ => "",
    }
}

/// Text of the label the router shows next to a rejected field.
///
/// The login page only renders `<label for="...">` for the password field
/// when the credentials were wrong.
pub fn auth_error(html: &str, field: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("label[for=\"{}\"]", field)).ok()?;
    document
        .select(&selector)
        .next()
        .map(|label| collapse_text(label).trim().to_string())
}

/// Text content of the element with the given id.
pub fn element_text(html: &str, id: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("[id=\"{}\"]", id)).ok()?;
    document.select(&selector).next().map(collapse_text)
}

/// Concatenate every descendant text node, like a browser's `textContent`.
fn collapse_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_PAGE: &str = r#"
<html><body>
<form id="login" name="login" method="post" action="/login/login-page.cgi">
  <input type="text" name="AuthName" value="">
  <input type="password" name="AuthPassword">
  <input type="hidden" name="Token" value="abc123">
  <input type="checkbox" name="Remember">
  <input type="checkbox" name="Agree" checked>
  <input type="submit" name="Login" value="Login">
  <input type="submit" name="Cancel" value="Cancel">
  <input type="button" name="Help" value="?">
</form>
</body></html>
"#;

    #[test]
    fn test_find_login_form() {
        let form = LoginForm::find(LOGIN_PAGE, "login").unwrap();

        assert_eq!(form.action.as_deref(), Some("/login/login-page.cgi"));
        assert_eq!(form.method, FormMethod::Post);
        assert_eq!(
            form.fields,
            vec![
                ("AuthName".to_string(), String::new()),
                ("AuthPassword".to_string(), String::new()),
                ("Token".to_string(), "abc123".to_string()),
                ("Agree".to_string(), "on".to_string()),
                ("Login".to_string(), "Login".to_string()),
            ]
        );
    }

    #[test]
    fn test_find_missing_form() {
        assert!(LoginForm::find(LOGIN_PAGE, "signin").is_none());
        assert!(LoginForm::find("<html></html>", "login").is_none());
    }

    #[test]
    fn test_form_defaults() {
        let html = r#"<form id="login"><input name="AuthName"></form>"#;
        let form = LoginForm::find(html, "login").unwrap();
        assert_eq!(form.action, None);
        assert_eq!(form.method, FormMethod::Get);
    }

    #[test]
    fn test_set_fields() {
        let mut form = LoginForm::find(LOGIN_PAGE, "login").unwrap();
        form.set("AuthName", "admin");
        form.set("AuthPassword", "1234");
        form.set("Extra", "x");

        assert_eq!(form.get("AuthName"), Some("admin"));
        assert_eq!(form.get("AuthPassword"), Some("1234"));
        assert_eq!(form.get("Extra"), Some("x"));
        assert_eq!(form.fields[0].0, "AuthName");
    }

    #[test]
    fn test_auth_error() {
        let html = r#"<div><label for="AuthPassword"><font> Incorrect password </font></label></div>"#;
        assert_eq!(
            auth_error(html, "AuthPassword").as_deref(),
            Some("Incorrect password")
        );
        assert!(auth_error(LOGIN_PAGE, "AuthPassword").is_none());
    }

    #[test]
    fn test_element_text() {
        let html = "<html><body><div id=\"VdslInfoDisplay\">\n====\n<b>Mode:</b>   ADSL2+\n</div></body></html>";
        assert_eq!(
            element_text(html, "VdslInfoDisplay").as_deref(),
            Some("\n====\nMode:   ADSL2+\n")
        );
        assert!(element_text(html, "Missing").is_none());
    }
}

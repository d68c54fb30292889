use crate::params::ParameterSet;
use html_escape::encode_quoted_attribute;
use http_types::Url;
use std::fmt::Write;

/// Parameter whose value labels the launch form's submit button.
pub const BASICLTI_SUBMIT: &str = "basiclti_submit";

const SUBMIT_AREA_ID: &str = "ltiLaunchFormSubmitArea";
const FORM_ID: &str = "ltiLaunchForm";

/// Attribute carrying the submit value from the markup to the script
const SUBMIT_VALUE_ATTR: &str = "data-submit-value";

/// Form action used in place of an address with a non-http(s) scheme
const BLOCKED_ACTION: &str = "about:blank";

/// Builder for an auto-submitting launch form.
///
/// The rendered fragment is a hidden `<form>` that POSTs the parameters to the
/// tool's address, followed by a script that submits it as soon as the page
/// loads. The browser does the POST so the tool's session cookie lands in the
/// browser rather than on the server.
///
/// Parameter content never appears inside the script. The submit value is
/// carried in a `data-submit-value` attribute and read back with
/// `getAttribute`. Form methods are called through their prototypes, so a
/// parameter named `submit` or `getAttribute` cannot shadow them.
///
/// The address may be absolute or relative. An absolute address whose scheme
/// is not `http` or `https` (`javascript:`, `data:`) is replaced with
/// `about:blank`.
///
/// # Examples
///
/// ```rust
/// use form_relay::{LaunchForm, ParameterSet};
///
/// let params = ParameterSet::from_pairs([("user_id", "42"), ("launch", "Go")]);
/// let html = LaunchForm::new("https://tool.example.com/lti")
///     .submit_key("launch")
///     .render(&params);
///
/// assert!(html.contains(r#"<input type="submit" name="launch" value="Go"/>"#));
/// ```
#[derive(Debug, Clone)]
pub struct LaunchForm {
    address: String,
    submit_key: String,
    area_id: String,
    form_id: String,
}

impl LaunchForm {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            submit_key: BASICLTI_SUBMIT.to_string(),
            area_id: SUBMIT_AREA_ID.to_string(),
            form_id: FORM_ID.to_string(),
        }
    }

    /// Use a different submit-trigger parameter than `basiclti_submit`.
    pub fn submit_key(mut self, key: impl Into<String>) -> Self {
        self.submit_key = key.into();
        self
    }

    /// Override the ids of the wrapping `<div>` and the `<form>`.
    ///
    /// Needed when more than one launch form is placed on the same page.
    pub fn element_ids(mut self, area_id: impl Into<String>, form_id: impl Into<String>) -> Self {
        self.area_id = area_id.into();
        self.form_id = form_id.into();
        self
    }

    /// Render the HTML fragment for `params`.
    pub fn render(&self, params: &ParameterSet) -> String {
        let mut html = String::new();

        let _ = writeln!(html, "<div id=\"{}\">", encode_quoted_attribute(&self.area_id));
        let _ = write!(
            html,
            "<form action=\"{}\" name=\"{form_id}\" id=\"{form_id}\" method=\"post\" encType=\"application/x-www-form-urlencoded\"",
            encode_quoted_attribute(form_action(&self.address)),
            form_id = encode_quoted_attribute(&self.form_id),
        );
        if let Some(submit_value) = params.get(&self.submit_key) {
            let _ = write!(
                html,
                " {SUBMIT_VALUE_ATTR}=\"{}\"",
                encode_quoted_attribute(submit_value)
            );
        }
        html.push_str(">\n");

        for (key, value) in params {
            let input_type = if *key == self.submit_key {
                "submit"
            } else {
                "hidden"
            };
            let _ = writeln!(
                html,
                "<input type=\"{input_type}\" name=\"{}\" value=\"{}\"/>",
                encode_quoted_attribute(key),
                encode_quoted_attribute(value)
            );
        }

        html.push_str("</form>\n</div>\n");
        self.write_script(&mut html);

        log::debug!(
            "Rendered launch form for {} with {} parameter(s)",
            self.address,
            params.len()
        );

        html
    }

    fn write_script(&self, html: &mut String) {
        let area_id = js_string_literal(&self.area_id);
        let form_id = js_string_literal(&self.form_id);
        let submit_key = js_string_literal(&self.submit_key);
        let value_attr = js_string_literal(SUBMIT_VALUE_ATTR);

        let _ = write!(
            html,
            concat!(
                "<script type=\"text/javascript\">\n",
                "    document.getElementById({area_id}).style.display = \"none\";\n",
                "    var ltiForm = document.getElementById({form_id});\n",
                "    var nei = document.createElement(\"input\");\n",
                "    nei.setAttribute(\"type\", \"hidden\");\n",
                "    nei.setAttribute(\"name\", {submit_key});\n",
                "    nei.setAttribute(\"value\", Element.prototype.getAttribute.call(ltiForm, {value_attr}) || \"\");\n",
                "    Node.prototype.appendChild.call(ltiForm, nei);\n",
                "    HTMLFormElement.prototype.submit.call(ltiForm);\n",
                "</script>\n",
            ),
            area_id = area_id,
            form_id = form_id,
            submit_key = submit_key,
            value_attr = value_attr
        );
    }
}

/// Generate a launch form with the default submit key and element ids.
///
/// Inputs appear in the set's iteration order. The `basiclti_submit`
/// parameter becomes the submit button, every other parameter a hidden
/// input. Keys, values and the address are HTML-escaped.
pub fn render_auto_submit_form(address: &str, params: &ParameterSet) -> String {
    LaunchForm::new(address).render(params)
}

/// The form action for `address`, blocking absolute non-http(s) URLs.
///
/// Relative addresses do not parse as a [`Url`] and are kept as given.
fn form_action(address: &str) -> &str {
    match address.trim().parse::<Url>() {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            log::warn!(
                "Refusing launch form action with scheme '{}', using {BLOCKED_ACTION}",
                url.scheme()
            );
            BLOCKED_ACTION
        }
        _ => address,
    }
}

/// Quote `raw` as a JavaScript string literal that is safe inside `<script>`.
///
/// JSON string syntax is valid JavaScript; escaping `<` additionally keeps
/// `</script>` and `<!--` from ending the script block early.
fn js_string_literal(raw: &str) -> String {
    serde_json::Value::from(raw)
        .to_string()
        .replace('<', "\\u003c")
}

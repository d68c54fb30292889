use crate::params::{MultiValuedParams, ParameterSet};

/// Serialize a parameter set to a URL query string.
///
/// Pairs are written as `key=value`, joined with `&`, in the set's iteration
/// order. Keys and values are percent-encoded, so `&`, `=`, spaces and
/// non-ASCII text survive the trip. An empty set yields an empty string.
///
/// # Examples
///
/// ```rust
/// use form_relay::{serialize_to_query_string, ParameterSet};
///
/// let params = ParameterSet::from_pairs([("course", "Rust 101"), ("role", "Learner")]);
/// assert_eq!(serialize_to_query_string(&params), "course=Rust%20101&role=Learner");
/// ```
pub fn serialize_to_query_string(params: &ParameterSet) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a query string or form body into multi-valued parameters.
///
/// A leading `?` is ignored, `+` is read as a space and percent escapes are
/// decoded. A pair without `=` gets an empty value. Repeated keys collect
/// all of their values in order.
pub fn parse_query_string(query: &str) -> MultiValuedParams {
    let mut params = MultiValuedParams::new();
    let query = query.strip_prefix('?').unwrap_or(query);

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(decode_component(key))
            .or_default()
            .push(decode_component(value));
    }

    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::debug!("Keeping undecodable query component '{raw}' as-is: {e}");
            spaced
        }
    }
}

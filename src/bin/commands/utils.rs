use form_relay::ParameterSet;

/// Parse a `key=value` command line argument
///
/// The value may itself contain `=`; only the first one separates the key.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing key in '{raw}'")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected key=value, got '{raw}'")),
    }
}

/// Print parameters as `key=value` lines in their iteration order
pub fn print_params(params: &ParameterSet) {
    for (key, value) in params {
        println!("{key}={value}");
    }
}

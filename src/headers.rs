use http_client::Request;

/// Content type of every outbound form POST
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Accept header sent with form POSTs; relayed tools answer with HTML or JSON
const ACCEPT: &str = "text/html,application/json;q=0.9,*/*;q=0.8";

/// Add headers for a form-encoded POST request
pub fn add_form_post_headers(request: &mut Request, user_agent: &str) {
    let _ = request.insert_header("Content-Type", FORM_CONTENT_TYPE);
    let _ = request.insert_header("Accept", ACCEPT);
    let _ = request.insert_header("User-Agent", user_agent);
}

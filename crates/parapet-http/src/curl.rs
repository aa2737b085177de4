//! Copy-pasteable curl snippets for debugging failed checks.

use crate::executor::PreparedRequest;

/// Render `request` as a single-line curl command.
pub fn curl_command(request: &PreparedRequest) -> String {
    let mut parts = vec!["curl".to_string()];
    if request.method != "GET" {
        parts.push(format!("-X {}", request.method));
    }
    parts.push(shell_quote(request.url.as_str()));
    for (name, value) in &request.headers {
        parts.push(format!("-H {}", shell_quote(&format!("{}: {}", name, value))));
    }
    parts.join(" ")
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

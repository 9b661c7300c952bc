//! Landing page
//!
//! Serves the prompt form, or a configuration error page when required
//! parameters are missing. Always answers 200.

use crate::handlers::AppState;
use axum::{extract::State, response::Html};

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Gemini Chat</title>
<style>
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; min-height: 8rem; }
#response { white-space: pre-wrap; border: 1px solid #ccc; padding: 1rem; margin-top: 1rem; }
.error { color: #b00020; }
</style>
</head>
<body>
<h1>Gemini Chat</h1>
<form id="prompt-form">
<textarea id="prompt" name="prompt" placeholder="Ask something..."></textarea>
<button type="submit">Send</button>
</form>
<div id="response"></div>
<script>
document.getElementById("prompt-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const out = document.getElementById("response");
  out.className = "";
  out.textContent = "Thinking...";
  try {
    const res = await fetch("/chat", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ prompt: document.getElementById("prompt").value }),
    });
    const data = await res.json();
    if (data.success) {
      out.textContent = data.response;
    } else {
      out.className = "error";
      out.textContent = data.error;
    }
  } catch (err) {
    out.className = "error";
    out.textContent = "Request failed: " + err;
  }
});
</script>
</body>
</html>
"#;

/// GET / handler
pub async fn handler(State(state): State<AppState>) -> Html<String> {
    let missing = state.resolver().validate_required();
    if missing.is_empty() {
        Html(LANDING_PAGE.to_string())
    } else {
        tracing::warn!(missing = ?missing, "Serving configuration error page");
        Html(render_missing_config(&missing))
    }
}

/// Error page listing missing parameter names
///
/// Names come from the fixed required-parameter list, so they are inserted as-is.
pub fn render_missing_config(missing: &[&str]) -> String {
    let summary = missing.join(", ");
    let items: String = missing
        .iter()
        .map(|name| format!("<li><code>{}</code></li>\n", name))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Configuration error</title>
</head>
<body>
<h1>Configuration error</h1>
<p class="error">Missing required configuration: {summary}</p>
<p>Set the following in <code>.env.local</code> or the environment and reload:</p>
<ul>
{items}</ul>
</body>
</html>
"#
    )
}

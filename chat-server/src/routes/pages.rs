//! `GET /`: minimal chat page.

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Chatbot</title></head>
<body>
<div id="log"></div>
<form id="f"><input id="m" autocomplete="off" autofocus><button>Send</button></form>
<script>
document.getElementById('f').onsubmit = async (e) => {
  e.preventDefault();
  const input = document.getElementById('m');
  const log = document.getElementById('log');
  const res = await fetch('/chat', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify({message: input.value})
  });
  const data = await res.json();
  const p = document.createElement('pre');
  p.textContent = data.response || data.error;
  log.appendChild(p);
  input.value = '';
};
</script>
</body>
</html>
"#;

pub fn page_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

//! Dashboard page — server-rendered shell plus the polling script.
//!
//! The shell is rendered with the current snapshot so the first paint
//! needs no round trip. The inline script then polls `/api/diagram` on
//! the configured interval, swaps the container contents, and tags each
//! request with a sequence number so a response that resolves late never
//! overwrites a fresher one. The manual button POSTs `/api/refresh` and
//! re-arms the timer, so no duplicate timers accumulate.

use axum::extract::State;
use axum::response::Html;

use autoviz_app::render::escape;

use crate::state::AppState;

const PAGE_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Home Assistant Automations</title>
<style>
  body { margin: 0; background: #1e1e1e; color: #eee; font-family: Arial, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 0.75rem 1.25rem; background: #262626; }
  header h1 { font-size: 1.1rem; margin: 0; flex: 1; }
  #status { color: #9e9e9e; font-size: 0.85rem; }
  button { background: #4a90e2; color: white; border: none; border-radius: 4px; padding: 0.4rem 0.9rem; cursor: pointer; }
  main { padding: 1.25rem; }
  .automations { display: flex; flex-wrap: wrap; gap: 1rem; }
  .automation-card { background: #2b2b2b; border-radius: 8px; padding: 1rem; width: 20rem; }
  .automation-name { font-size: 1rem; margin: 0 0 0.5rem; color: #4a90e2; }
  .block h3 { font-size: 0.8rem; margin: 0.5rem 0 0.25rem; text-transform: uppercase; color: #9e9e9e; }
  .block ul { list-style: none; margin: 0; padding: 0; }
  .chip { border-radius: 4px; padding: 0.25rem 0.5rem; margin: 0.15rem 0; font-size: 0.85rem; }
  .triggers .chip { background: #50c878; color: #102a18; }
  .conditions .chip { background: #ff9f43; color: #3a2405; }
  .actions .chip { background: #ee5a6f; color: #fff; }
  .chip .detail { display: block; opacity: 0.8; font-size: 0.78rem; }
</style>
</head>
<body>
<header>
  <h1>Home Assistant Automations</h1>
  <span id="status">%%STATUS%%</span>
  <button id="refresh-btn" type="button">Refresh now</button>
</header>
<main id="diagram">%%INITIAL%%</main>
<script>
  const REFRESH_INTERVAL_MS = %%INTERVAL_MS%%;
  const container = document.getElementById('diagram');
  const statusLine = document.getElementById('status');
  let timer = null;
  let requestSeq = 0;
  let renderedSeq = 0;

  function applyEnvelope(seq, data) {
    if (seq <= renderedSeq) { return; }
    renderedSeq = seq;
    if (data.success) {
      container.innerHTML = data.html || data.svg || '';
      statusLine.textContent = 'Last updated ' + new Date().toLocaleTimeString()
        + ' (' + data.count + ' automations)';
    } else {
      container.textContent = data.message || 'Unknown error';
      statusLine.textContent = 'Error';
    }
  }

  async function fetchDiagram(url, options) {
    const seq = ++requestSeq;
    try {
      const response = await fetch(url || '/api/diagram', options);
      const data = await response.json();
      applyEnvelope(seq, data);
    } catch (err) {
      console.error('diagram fetch failed', err);
      if (seq > renderedSeq) {
        renderedSeq = seq;
        container.textContent = 'Failed to load diagram';
        statusLine.textContent = 'Error';
      }
    }
  }

  function startAutoRefresh() {
    fetchDiagram();
    timer = setInterval(function () { fetchDiagram(); }, REFRESH_INTERVAL_MS);
  }

  document.getElementById('refresh-btn').addEventListener('click', function () {
    clearInterval(timer);
    fetchDiagram('/api/refresh', { method: 'POST' });
    timer = setInterval(function () { fetchDiagram(); }, REFRESH_INTERVAL_MS);
  });

  startAutoRefresh();
</script>
</body>
</html>
"##;

/// `GET /` — the dashboard shell.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.refresh.snapshot();
    let initial = match snapshot.response.markup() {
        Some(markup) => markup.to_string(),
        None => escape(
            snapshot
                .response
                .message
                .as_deref()
                .unwrap_or("Diagram not available"),
        ),
    };

    let page = PAGE_TEMPLATE
        .replace(
            "%%INTERVAL_MS%%",
            &state.refresh_interval.as_millis().to_string(),
        )
        .replace("%%STATUS%%", &escape(&snapshot.status_line()))
        .replace("%%INITIAL%%", &initial);
    Html(page)
}

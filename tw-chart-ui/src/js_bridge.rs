//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Plotly is loaded from a script tag injected at startup and used as the
//! `Plotly` global. Figures arrive already built by `tw_data::plot`; this
//! module only serializes them and hands them over.

use tw_data::plot::Figure;

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Tidewatch JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Inject the Plotly script tag once. Call at app startup.
pub fn init_plotly() {
    call_js(&format!(
        r#"
        if (typeof Plotly === 'undefined' && !document.getElementById('plotly-js')) {{
            var s = document.createElement('script');
            s.id = 'plotly-js';
            s.src = '{PLOTLY_SRC}';
            document.head.appendChild(s);
        }}
        "#,
    ));
}

/// Draw a figure into the element with `container_id`.
///
/// Polls until Plotly has loaded and the container exists, then calls
/// `Plotly.newPlot`. Redrawing an existing container replaces its chart.
pub fn render_figure(container_id: &str, figure: &Figure) {
    let figure_json = match serde_json::to_string(figure) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("could not serialize figure for {}: {}", container_id, e);
            return;
        }
    };
    call_js(&format!(
        r#"
        (function() {{
            var figure = {figure_json};
            var poll = setInterval(function() {{
                if (typeof Plotly !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        Plotly.newPlot('{container_id}', figure.data, figure.layout, {{ responsive: true }});
                    }} catch(e) {{ console.error('[Tidewatch] Plotly.newPlot error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{0}'); if (el) {{ if (typeof Plotly !== 'undefined') Plotly.purge(el); el.innerHTML = ''; }}",
        container_id
    ));
}

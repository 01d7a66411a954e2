//! Server-rendered viewer page. The DOT source is laid out client-side by
//! viz.js; the debug lines are shown verbatim underneath.

use crate::graph::DotGraph;

const VIZ_JS: &str = "https://unpkg.com/viz.js@2.1.2/viz.js";
const VIZ_RENDER_JS: &str = "https://unpkg.com/viz.js@2.1.2/full.render.js";

pub fn view_page(title: &str, graph: &DotGraph) -> String {
    let debug = graph
        .debug_lines
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <header>
        <h1>{title}</h1>
        <span class="graph-name">{name}</span>
    </header>
    <main>
        <section id="graph" class="graph"></section>
        <textarea id="dot" hidden>{dot}</textarea>
        <pre class="debug">{debug}</pre>
    </main>
    <script src="{viz}"></script>
    <script src="{viz_render}"></script>
    <script>
{js}
    </script>
</body>
</html>"#,
        title = escape_html(title),
        name = escape_html(&graph.name),
        dot = escape_html(&graph.dot),
        debug = debug,
        viz = VIZ_JS,
        viz_render = VIZ_RENDER_JS,
        css = CSS,
        js = JS,
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const CSS: &str = r#"        body { font-family: sans-serif; margin: 0; }
        header { padding: 0.5rem 1rem; background: #1f2937; color: #f9fafb; }
        header h1 { display: inline; font-size: 1.2rem; margin-right: 1rem; }
        .graph { padding: 1rem; overflow: auto; }
        .debug { margin: 1rem; padding: 0.5rem; background: #f3f4f6; font-size: 0.8rem; }"#;

const JS: &str = r#"        const source = document.getElementById('dot').value;
        new Viz()
            .renderSVGElement(source)
            .then((svg) => document.getElementById('graph').appendChild(svg))
            .catch((err) => {
                document.getElementById('graph').textContent = err.toString();
            });"#;

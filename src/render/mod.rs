//! HTML presentation: shared layout, tables, and label formatting.
//!
//! Pages are plain `format!` templates; [`views`] holds one [`RenderPage`]
//! impl per page-data struct.

pub mod views;

/// Label shown for a missing year or publisher.
pub const MISSING_LABEL: &str = "N/A";

/// URL prefix the static directory is mounted under.
pub const STATIC_PREFIX: &str = "/static";

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Navigation entries, in display order.
pub const NAV: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/most_sold", "Most Sold"),
    ("/most_played", "Most Played"),
    ("/top_games", "Top Games by Year"),
    ("/publishers", "Publishers"),
    ("/statistics", "Statistics"),
    ("/data", "Data"),
];

/// A page that knows its title, nav location and body markup.
pub trait RenderPage {
    fn title(&self) -> String;

    /// Request path used to highlight the active nav entry.
    fn current_page(&self) -> String;

    fn body(&self) -> String;

    fn render(&self) -> String {
        layout(&self.title(), &self.current_page(), &self.body())
    }
}

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| MISSING_LABEL.to_string())
}

pub fn publisher_label(publisher: Option<&str>) -> &str {
    publisher.unwrap_or(MISSING_LABEL)
}

/// Sales in millions of units, two decimals.
pub fn sales(value: f64) -> String {
    format!("{value:.2}")
}

/// Absolute URL of a file under the static directory.
pub fn static_url(relative: &str) -> String {
    format!("{STATIC_PREFIX}/{}", relative.trim_start_matches('/'))
}

/// `<table class="data">` with one header cell per field and one row per record.
/// Cell text is escaped.
pub fn table<I>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let body: String = rows
        .into_iter()
        .map(|cells| {
            let tds: String = cells
                .iter()
                .map(|c| format!("<td>{}</td>", escape(c)))
                .collect();
            format!("<tr>{tds}</tr>\n")
        })
        .collect();
    format!(
        r#"<table border="1" class="dataframe data">
<thead><tr style="text-align: right;">{head}</tr></thead>
<tbody>
{body}</tbody>
</table>"#
    )
}

fn nav(current_page: &str) -> String {
    NAV.iter()
        .map(|(href, label)| {
            let class = if *href == current_page { " class=\"active\"" } else { "" };
            format!(r#"<a href="{href}"{class}>{label}</a>"#)
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

/// Full document around a page body.
pub fn layout(title: &str, current_page: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} · Video Game Sales</title>
    <script src="{plotly}" charset="utf-8"></script>
    <style>{css}</style>
</head>
<body>
    <nav>
        {nav}
    </nav>
    <main class="container">
{body}
    </main>
    <div id="fullscreen" class="fullscreen"><img id="fullscreenImg" alt=""></div>
    <script src="{scripts}"></script>
</body>
</html>"#,
        title = escape(title),
        plotly = PLOTLY_CDN,
        css = inline_css(),
        nav = nav(current_page),
        body = body,
        scripts = static_url("js/scripts.js"),
    )
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; color: #1f2933; background: #f5f7fa; }
nav { display: flex; flex-wrap: wrap; gap: 1rem; padding: 1rem 2rem; background: #1f2933; }
nav a { color: #cbd2d9; text-decoration: none; }
nav a.active { color: #ffffff; font-weight: 700; border-bottom: 2px solid #3ebd93; }
.container { max-width: 1400px; margin: 0 auto; padding: 2rem; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1.5rem; }
.card { background: #fff; border-radius: 0.5rem; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.12); color: inherit; text-decoration: none; }
.card img { width: 100%; height: 160px; object-fit: cover; border-radius: 0.25rem; }
table.data { border-collapse: collapse; width: 100%; background: #fff; margin-bottom: 2rem; }
table.data th, table.data td { padding: 0.5rem 0.75rem; border: 1px solid #e4e7eb; text-align: left; }
.facts { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
.fact { background: #fff; border-left: 4px solid #3ebd93; padding: 1rem; }
.truncated li:nth-child(n+6) { display: none; }
.clickable-chart img { max-width: 100%; cursor: zoom-in; }
.fullscreen { display: none; position: fixed; inset: 0; background: rgba(0,0,0,.85); align-items: center; justify-content: center; }
.fullscreen img { max-width: 95%; max-height: 95%; }
"#
}

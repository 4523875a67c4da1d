//! Chart adapters.
//!
//! [`Chart`] turns a labeled (category, value) series into an embeddable Plotly
//! fragment; [`images`] renders the startup PNGs with plotters.

pub mod images;

use crate::aggregate::GroupTotal;
use crate::render::year_label;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Lines with markers, one point per category.
    Line,
    Bar,
}

/// A single-series chart over labeled categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub points: Vec<(String, f64)>,
}

impl Chart {
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        points: Vec<(String, f64)>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            points,
        }
    }

    fn trace(&self) -> Value {
        let (x, y): (Vec<&str>, Vec<f64>) = self
            .points
            .iter()
            .map(|(label, value)| (label.as_str(), *value))
            .unzip();
        match self.kind {
            ChartKind::Line => json!({
                "type": "scatter",
                "mode": "lines+markers",
                "x": x,
                "y": y,
            }),
            ChartKind::Bar => json!({
                "type": "bar",
                "x": x,
                "y": y,
            }),
        }
    }

    fn layout(&self) -> Value {
        json!({
            "title": { "text": self.title },
            "xaxis": { "title": { "text": self.x_title }, "type": "category" },
            "yaxis": { "title": { "text": self.y_title } },
        })
    }

    /// `<div>` placeholder plus the script that draws the chart into it.
    /// Plotly itself is loaded once by the page layout.
    pub fn embed(&self, element_id: &str) -> String {
        let data = script_safe(&json!([self.trace()]));
        let layout = script_safe(&self.layout());
        format!(
            r#"<div id="{element_id}" class="plotly-graph-div"></div>
<script type="text/javascript">Plotly.newPlot("{element_id}", {data}, {layout}, {{"responsive": true}});</script>"#
        )
    }
}

/// JSON text that cannot terminate the surrounding `<script>` element.
fn script_safe(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Line chart of global sales per year.
pub fn sales_by_year(series: &[GroupTotal<Option<i32>>]) -> Chart {
    Chart::new(
        ChartKind::Line,
        "Global Sales by Year",
        "Year",
        "Global Sales",
        series
            .iter()
            .map(|g| (year_label(g.key), g.total))
            .collect(),
    )
}

/// Bar chart of global sales per platform, in ranking order.
pub fn sales_by_platform(ranking: &[GroupTotal<String>]) -> Chart {
    Chart::new(
        ChartKind::Bar,
        "Global Sales by Platform",
        "Platform",
        "Global Sales",
        ranking.iter().map(|g| (g.key.clone(), g.total)).collect(),
    )
}

/// Bar chart of global sales per genre, in ranking order.
pub fn sales_by_genre(ranking: &[GroupTotal<String>]) -> Chart {
    Chart::new(
        ChartKind::Bar,
        "Global Sales by Genre",
        "Genre",
        "Global Sales",
        ranking.iter().map(|g| (g.key.clone(), g.total)).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_chart_embeds_series_in_order() {
        let chart = sales_by_year(&[
            GroupTotal { key: Some(2000), total: 30.0 },
            GroupTotal { key: Some(2001), total: 5.0 },
            GroupTotal { key: None, total: 1.5 },
        ]);
        let html = chart.embed("yearly");
        assert!(html.starts_with(r#"<div id="yearly""#));
        assert!(html.contains(r#"Plotly.newPlot("yearly""#));
        assert!(html.contains(r#""x":["2000","2001","N/A"]"#), "{html}");
        assert!(html.contains(r#""y":[30.0,5.0,1.5]"#), "{html}");
        assert!(html.contains("lines+markers"));
        assert!(html.contains("Global Sales by Year"));
    }

    #[test]
    fn bar_chart_uses_bar_trace() {
        let chart = sales_by_platform(&[GroupTotal { key: "Wii".to_string(), total: 9.5 }]);
        let html = chart.embed("platforms");
        assert!(html.contains(r#""type":"bar""#));
        assert!(html.contains(r#""x":["Wii"]"#));
    }

    #[test]
    fn labels_cannot_close_the_script_tag() {
        let chart = Chart::new(
            ChartKind::Bar,
            "t",
            "x",
            "y",
            vec![("</script><b>".to_string(), 1.0)],
        );
        let html = chart.embed("c");
        assert_eq!(html.matches("</script>").count(), 1);
    }
}

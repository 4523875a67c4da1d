use super::{escape, publisher_label, sales, static_url, table, year_label, RenderPage};
use crate::pages::{
    DataPage, GameRow, GenrePage, IndexPage, MostPlayedPage, MostSoldPage, PublishersPage,
    StatisticsPage, TopGamesPage,
};
use std::fmt::Write as _;

const PLOTS_DIR: &str = "plots";

fn name_sales_platform(games: &[GameRow]) -> String {
    table(
        &["Name", "Global_Sales", "Platform"],
        games
            .iter()
            .map(|g| vec![g.name.clone(), sales(g.global_sales), g.platform.clone()]),
    )
}

fn name_sales(games: &[GameRow]) -> String {
    table(
        &["Name", "Global_Sales"],
        games.iter().map(|g| vec![g.name.clone(), sales(g.global_sales)]),
    )
}

/// Ranked cards, one image per position.
fn leaderboard(games: &[GameRow], images: &[String], with_platform: bool) -> String {
    let mut out = String::from(r#"<div class="cards">"#);
    for (i, (game, image)) in games.iter().zip(images).enumerate() {
        let platform = if with_platform {
            format!("<p>{}</p>", escape(&game.platform))
        } else {
            String::new()
        };
        let _ = write!(
            out,
            r#"
<div class="card">
    <img src="{src}" alt="{alt}">
    <h3>#{rank} {name}</h3>
    <p>{sales} M</p>
    {platform}
</div>"#,
            src = escape(&static_url(image)),
            alt = escape(&game.name),
            rank = i + 1,
            name = escape(&game.name),
            sales = sales(game.global_sales),
        );
    }
    out.push_str("\n</div>");
    out
}

impl RenderPage for IndexPage {
    fn title(&self) -> String {
        "Genres".to_string()
    }

    fn current_page(&self) -> String {
        "/".to_string()
    }

    fn body(&self) -> String {
        let mut out = String::from("<h1>Video game sales by genre</h1>\n<div class=\"cards\">");
        for genre in &self.genres {
            let image = genre
                .image
                .map(|src| format!(r#"<img src="{}" alt="{}">"#, static_url(src), escape(&genre.name)))
                .unwrap_or_default();
            let _ = write!(
                out,
                r#"
<a class="card" href="/genre/{href}">{image}<h3>{name}</h3></a>"#,
                href = urlencoding::encode(&genre.name),
                name = escape(&genre.name),
            );
        }
        out.push_str("\n</div>");
        out
    }
}

impl RenderPage for MostSoldPage {
    fn title(&self) -> String {
        "Most Sold".to_string()
    }

    fn current_page(&self) -> String {
        "/most_sold".to_string()
    }

    fn body(&self) -> String {
        format!(
            "<h1>Best-selling games</h1>\n{}",
            leaderboard(&self.games, &self.images, true)
        )
    }
}

impl RenderPage for MostPlayedPage {
    fn title(&self) -> String {
        "Most Played".to_string()
    }

    fn current_page(&self) -> String {
        "/most_played".to_string()
    }

    fn body(&self) -> String {
        format!(
            "<h1>Most played games</h1>\n{}",
            leaderboard(&self.games, &self.images, false)
        )
    }
}

impl RenderPage for TopGamesPage {
    fn title(&self) -> String {
        "Top Games by Year".to_string()
    }

    fn current_page(&self) -> String {
        "/top_games".to_string()
    }

    fn body(&self) -> String {
        let mut out = String::from("<h1>Top games by year</h1>");
        for year in &self.years {
            let _ = write!(
                out,
                "\n<section>\n<h2>{}</h2>\n{}\n</section>",
                escape(&year_label(year.year)),
                name_sales_platform(&year.games)
            );
        }
        out
    }
}

impl RenderPage for PublishersPage {
    fn title(&self) -> String {
        "Publishers".to_string()
    }

    fn current_page(&self) -> String {
        "/publishers".to_string()
    }

    fn body(&self) -> String {
        let mut out = String::from("<h1>Games by publisher</h1>");
        for (i, entry) in self.publishers.iter().enumerate() {
            let items: String = entry
                .games
                .iter()
                .map(|g| format!("<li>{}</li>", escape(g)))
                .collect();
            let toggle = if entry.games.len() > 5 {
                format!(
                    r#"<button id="publisher-btn-{i}" onclick="showMore('publisher-{i}', 'publisher-btn-{i}')">Show all</button>"#
                )
            } else {
                String::new()
            };
            let _ = write!(
                out,
                r#"
<section>
<h2>{name} <small>({count})</small></h2>
<ul id="publisher-{i}" class="truncated">{items}</ul>
{toggle}
</section>"#,
                name = escape(publisher_label(entry.publisher.as_deref())),
                count = entry.games.len(),
            );
        }
        out
    }
}

impl RenderPage for StatisticsPage {
    fn title(&self) -> String {
        "Statistics".to_string()
    }

    fn current_page(&self) -> String {
        "/statistics".to_string()
    }

    fn body(&self) -> String {
        let images: String = self
            .images
            .iter()
            .map(|file| {
                format!(
                    r#"<img src="{}" alt="{}">"#,
                    static_url(&format!("{PLOTS_DIR}/{file}")),
                    escape(file)
                )
            })
            .collect();
        format!(
            r#"<h1>Sales statistics</h1>
{yearly}
{platform}
{genre}
<div class="clickable-chart">{images}</div>"#,
            yearly = self.yearly.embed("sales-by-year"),
            platform = self.platform.embed("sales-by-platform"),
            genre = self.genre.embed("sales-by-genre"),
        )
    }
}

impl RenderPage for GenrePage {
    fn title(&self) -> String {
        self.genre.clone()
    }

    fn current_page(&self) -> String {
        format!("/genre/{}", self.genre)
    }

    fn body(&self) -> String {
        format!(
            "<h1>Top {} games</h1>\n{}",
            escape(&self.genre),
            name_sales(&self.games)
        )
    }
}

impl RenderPage for DataPage {
    fn title(&self) -> String {
        "Data".to_string()
    }

    fn current_page(&self) -> String {
        "/data".to_string()
    }

    fn body(&self) -> String {
        let mut facts = String::new();
        if let Some(game) = &self.top_game {
            let _ = write!(
                facts,
                r#"<div class="fact"><h3>Top game</h3><img src="{src}" alt="{name}" width="200"><p>{name}</p></div>"#,
                src = static_url(&format!("img/{}", self.top_game_image)),
                name = escape(&game.name),
            );
        }
        if let Some(region) = &self.top_region {
            let _ = write!(
                facts,
                r#"<div class="fact"><h3>Region with the highest sales</h3><p>{} ({} M)</p></div>"#,
                region.column.column_name(),
                sales(region.total)
            );
        }
        if let Some(mode) = &self.platform_mode {
            let _ = write!(
                facts,
                r#"<div class="fact"><h3>Platform with the most games</h3><p>{} ({} games)</p></div>"#,
                escape(&mode.key),
                mode.count
            );
        }
        if let Some(leader) = &self.platform_leader {
            let _ = write!(
                facts,
                r#"<div class="fact"><h3>Platform with the highest sales</h3><p>{} ({} M)</p></div>"#,
                escape(&leader.key),
                sales(leader.total)
            );
        }

        let publishers = table(
            &["Publisher", "Global_Sales"],
            self.top_publishers.iter().map(|p| {
                vec![
                    publisher_label(p.key.as_deref()).to_string(),
                    sales(p.total),
                ]
            }),
        );

        format!(
            r#"<h1>Sales data</h1>
<div class="facts">{facts}</div>
<h2>Most sold games</h2>
{most_sold}
<h2>Most played games</h2>
{most_played}
<h2>Top publishers</h2>
{publishers}
{yearly}
{platform}"#,
            most_sold = name_sales_platform(&self.most_sold),
            most_played = name_sales_platform(&self.most_played),
            yearly = self.yearly.embed("data-sales-by-year"),
            platform = self.platform.embed("data-sales-by-platform"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample;
    use crate::pages::Dashboard;

    #[test]
    fn index_links_each_genre() {
        let html = IndexPage::assemble(&sample()).render();
        assert!(html.contains(r#"href="/genre/Role-Playing""#));
        assert!(html.contains("/static/img/sports.jpg"));
        assert!(html.contains(r#"<a href="/" class="active">"#));
    }

    #[test]
    fn most_played_omits_platform() {
        let ds = sample();
        let played = MostPlayedPage::assemble(&ds).body();
        let sold = MostSoldPage::assemble(&ds).body();
        assert!(sold.contains("<p>Wii</p>"));
        assert!(!played.contains("<p>Wii</p>"));
        assert!(played.contains("/static/img/mp1.jpg"));
        assert!(sold.contains("/static/img/mss/ms10.jpg"));
    }

    #[test]
    fn unknown_genre_renders_an_empty_table() {
        let dashboard = Dashboard::build(&sample());
        let html = dashboard.genre("Nope").render();
        assert!(html.contains("<th>Name</th><th>Global_Sales</th>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn publishers_page_collapses_long_lists() {
        let html = PublishersPage::assemble(&sample()).body();
        assert!(html.contains("showMore('publisher-1', 'publisher-btn-1')"));
        assert!(html.contains("<h2>N/A <small>(1)</small></h2>"));
    }

    #[test]
    fn data_page_reports_summary_facts() {
        let html = DataPage::assemble(&sample()).body();
        assert!(html.contains("/static/img/top_game.jpg"));
        assert!(html.contains("NA_Sales"));
        assert!(html.contains("Platform with the most games</h3><p>Wii (3 games)"));
        assert!(html.contains(r#"id="data-sales-by-year""#));
        assert!(html.contains("<td>Nintendo</td>"));
    }

    #[test]
    fn statistics_page_embeds_three_charts_and_images() {
        let html = StatisticsPage::assemble(&sample()).body();
        assert_eq!(html.matches("Plotly.newPlot").count(), 3);
        assert!(html.contains("/static/plots/summary.png"));
        assert!(html.contains("/static/plots/platform_distribution.png"));
    }
}

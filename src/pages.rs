//! Page-data assembly: one typed struct per route, built from the dataset.
//!
//! Every `assemble` is a pure function of the dataset. [`Dashboard`] runs them
//! once at startup and hands out the memoized results to request handlers.

use crate::aggregate::{self, GroupCount, GroupTotal, RegionTotal, TiePolicy};
use crate::chart::{self, images, Chart};
use crate::dataset::{Dataset, SaleRecord};
use indexmap::IndexMap;
use tracing::debug;

/// How many rows the most-sold / most-played boards show.
pub const LEADERBOARD_SIZE: usize = 10;
/// Rows per year / per genre (ties at the cut-off are all kept).
pub const GROUP_TOP_SIZE: usize = 5;
pub const TOP_PUBLISHERS_SIZE: usize = 10;
pub const TOP_GAME_IMAGE: &str = "top_game.jpg";

/// Card artwork per known genre, relative to the static directory.
pub const GENRE_IMAGES: [(&str, &str); 12] = [
    ("Action", "img/action.jpg"),
    ("Sports", "img/sports.jpg"),
    ("Shooter", "img/shooter.jpg"),
    ("Role-Playing", "img/role_playing.jpg"),
    ("Platform", "img/platform.jpg"),
    ("Misc", "img/misc.jpg"),
    ("Racing", "img/racing.jpg"),
    ("Fighting", "img/fighting.jpg"),
    ("Simulation", "img/simulation.jpg"),
    ("Puzzle", "img/puzzle.jpg"),
    ("Adventure", "img/adventure.jpg"),
    ("Strategy", "img/strategy.jpg"),
];

pub fn genre_image(genre: &str) -> Option<&'static str> {
    GENRE_IMAGES
        .iter()
        .find(|(name, _)| *name == genre)
        .map(|(_, image)| *image)
}

/// The columns pages display for a single record.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRow {
    pub name: String,
    pub global_sales: f64,
    pub platform: String,
}

impl From<&SaleRecord> for GameRow {
    fn from(record: &SaleRecord) -> Self {
        Self {
            name: record.name.clone(),
            global_sales: record.global_sales,
            platform: record.platform.clone(),
        }
    }
}

fn rows<'a>(records: impl IntoIterator<Item = &'a SaleRecord>) -> Vec<GameRow> {
    records.into_iter().map(GameRow::from).collect()
}

fn top_global(dataset: &Dataset) -> Vec<GameRow> {
    rows(aggregate::top_n(dataset, LEADERBOARD_SIZE, TiePolicy::First))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreCard {
    pub name: String,
    pub image: Option<&'static str>,
}

/// `/`: every genre with its card image.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexPage {
    pub genres: Vec<GenreCard>,
}

impl IndexPage {
    pub fn assemble(dataset: &Dataset) -> Self {
        let genres = aggregate::genres(dataset)
            .into_iter()
            .map(|name| GenreCard {
                image: genre_image(&name),
                name,
            })
            .collect();
        Self { genres }
    }
}

/// `/most_sold`: top ten by Global_Sales with their artwork.
#[derive(Debug, Clone, PartialEq)]
pub struct MostSoldPage {
    pub games: Vec<GameRow>,
    pub images: Vec<String>,
}

impl MostSoldPage {
    pub fn assemble(dataset: &Dataset) -> Self {
        Self {
            games: top_global(dataset),
            images: (1..=LEADERBOARD_SIZE)
                .map(|i| format!("img/mss/ms{i}.jpg"))
                .collect(),
        }
    }
}

/// `/most_played`: "played" is measured by Global_Sales as well, so the board
/// matches `/most_sold`; only the artwork and displayed columns differ.
#[derive(Debug, Clone, PartialEq)]
pub struct MostPlayedPage {
    pub games: Vec<GameRow>,
    pub images: Vec<String>,
}

impl MostPlayedPage {
    pub fn assemble(dataset: &Dataset) -> Self {
        Self {
            games: top_global(dataset),
            images: (1..=LEADERBOARD_SIZE)
                .map(|i| format!("img/mp{i}.jpg"))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearTop {
    pub year: Option<i32>,
    pub games: Vec<GameRow>,
}

/// `/top_games`: year → best sellers of that year.
#[derive(Debug, Clone, PartialEq)]
pub struct TopGamesPage {
    pub years: Vec<YearTop>,
}

impl TopGamesPage {
    pub fn assemble(dataset: &Dataset) -> Self {
        let years = aggregate::top_per_year(dataset, GROUP_TOP_SIZE)
            .into_iter()
            .map(|(year, top)| YearTop {
                year,
                games: rows(top),
            })
            .collect();
        Self { years }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublisherGames {
    pub publisher: Option<String>,
    pub games: Vec<String>,
}

/// `/publishers`: publisher → game names.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishersPage {
    pub publishers: Vec<PublisherGames>,
}

impl PublishersPage {
    pub fn assemble(dataset: &Dataset) -> Self {
        let publishers = aggregate::publisher_games(dataset)
            .into_iter()
            .map(|(publisher, games)| PublisherGames {
                publisher: publisher.map(str::to_string),
                games: games.into_iter().map(str::to_string).collect(),
            })
            .collect();
        Self { publishers }
    }
}

/// `/statistics`: interactive charts plus the startup PNGs.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsPage {
    pub yearly: Chart,
    pub platform: Chart,
    pub genre: Chart,
    pub images: [&'static str; 2],
}

impl StatisticsPage {
    pub fn assemble(dataset: &Dataset) -> Self {
        Self {
            yearly: chart::sales_by_year(&aggregate::yearly_sales(dataset)),
            platform: chart::sales_by_platform(&aggregate::platform_sales(dataset)),
            genre: chart::sales_by_genre(&aggregate::genre_sales(dataset)),
            images: [images::SUMMARY_IMAGE, images::PLATFORM_DISTRIBUTION_IMAGE],
        }
    }
}

/// `/genre/{name}`: the genre's best sellers. Unknown names give no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct GenrePage {
    pub genre: String,
    pub games: Vec<GameRow>,
}

/// `/data`: composite summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPage {
    pub most_sold: Vec<GameRow>,
    pub most_played: Vec<GameRow>,
    pub top_publishers: Vec<GroupTotal<Option<String>>>,
    pub top_game: Option<GameRow>,
    pub top_game_image: &'static str,
    pub top_region: Option<RegionTotal>,
    pub platform_mode: Option<GroupCount<String>>,
    pub platform_leader: Option<GroupTotal<String>>,
    pub yearly: Chart,
    pub platform: Chart,
}

impl DataPage {
    pub fn assemble(dataset: &Dataset) -> Self {
        let platform_ranking = aggregate::platform_sales(dataset);
        Self {
            most_sold: top_global(dataset),
            most_played: top_global(dataset),
            top_publishers: aggregate::top_publishers(dataset, TOP_PUBLISHERS_SIZE),
            top_game: aggregate::top_n(dataset, 1, TiePolicy::First)
                .first()
                .map(|r| GameRow::from(*r)),
            top_game_image: TOP_GAME_IMAGE,
            top_region: aggregate::region_dominance(dataset),
            platform_mode: aggregate::platform_mode(dataset),
            platform_leader: aggregate::platform_sales_leader(dataset),
            yearly: chart::sales_by_year(&aggregate::yearly_sales(dataset)),
            platform: chart::sales_by_platform(&platform_ranking),
        }
    }
}

/// Every route's page data, computed once from the immutable dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: usize,
    pub index: IndexPage,
    pub most_sold: MostSoldPage,
    pub most_played: MostPlayedPage,
    pub top_games: TopGamesPage,
    pub publishers: PublishersPage,
    pub statistics: StatisticsPage,
    pub data: DataPage,
    genre_tops: IndexMap<String, Vec<GameRow>>,
}

impl Dashboard {
    pub fn build(dataset: &Dataset) -> Self {
        let genre_tops = aggregate::top_per_genre(dataset, GROUP_TOP_SIZE)
            .into_iter()
            .map(|(genre, top)| (genre.to_string(), rows(top)))
            .collect::<IndexMap<_, _>>();
        debug!(genres = genre_tops.len(), "page data assembled");

        Self {
            records: dataset.len(),
            index: IndexPage::assemble(dataset),
            most_sold: MostSoldPage::assemble(dataset),
            most_played: MostPlayedPage::assemble(dataset),
            top_games: TopGamesPage::assemble(dataset),
            publishers: PublishersPage::assemble(dataset),
            statistics: StatisticsPage::assemble(dataset),
            data: DataPage::assemble(dataset),
            genre_tops,
        }
    }

    /// Number of records the dashboard was built from.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Exact-match lookup into the top-per-genre grouping.
    pub fn genre(&self, name: &str) -> GenrePage {
        GenrePage {
            genre: name.to_string(),
            games: self.genre_tops.get(name).cloned().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{record, sample};
    use crate::dataset::SalesColumn;

    #[test]
    fn index_lists_genres_with_known_images() {
        let page = IndexPage::assemble(&sample());
        assert_eq!(page.genres.len(), 7);
        assert_eq!(page.genres[0].name, "Sports");
        assert_eq!(page.genres[0].image, Some("img/sports.jpg"));
        assert_eq!(genre_image("Role-Playing"), Some("img/role_playing.jpg"));

        let odd = Dataset::from_records(vec![record("x", "PC", None, "Visual Novel", None, 1.0)]);
        assert_eq!(IndexPage::assemble(&odd).genres[0].image, None);
    }

    #[test]
    fn most_sold_and_most_played_share_the_ranking() {
        let ds = sample();
        let sold = MostSoldPage::assemble(&ds);
        let played = MostPlayedPage::assemble(&ds);
        assert_eq!(sold.games, played.games);
        assert_eq!(sold.games.len(), 10);
        assert_eq!(sold.games[0].name, "Wii Sports");
        assert_eq!(sold.images[0], "img/mss/ms1.jpg");
        assert_eq!(sold.images[9], "img/mss/ms10.jpg");
        assert_eq!(played.images[0], "img/mp1.jpg");
    }

    #[test]
    fn top_games_groups_by_year() {
        let page = TopGamesPage::assemble(&sample());
        let first = &page.years[0];
        assert_eq!(first.year, Some(1985));
        assert_eq!(first.games[0].name, "Super Mario Bros.");
        assert_eq!(page.years.last().unwrap().year, None);
    }

    #[test]
    fn publishers_page_keeps_unknown_publisher() {
        let page = PublishersPage::assemble(&sample());
        let unknown = page.publishers.last().unwrap();
        assert_eq!(unknown.publisher, None);
        assert_eq!(unknown.games, vec!["Homeworld Remastered Collection".to_string()]);
    }

    #[test]
    fn genre_lookup_is_exact_and_misses_are_empty() {
        let dashboard = Dashboard::build(&sample());
        let sports = dashboard.genre("Sports");
        let names: Vec<_> = sports.games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Wii Sports", "Wii Sports Resort", "Madden NFL 2004"]);

        assert!(dashboard.genre("sports").games.is_empty());
        let missing = dashboard.genre("Nonexistent");
        assert_eq!(missing.genre, "Nonexistent");
        assert!(missing.games.is_empty());
    }

    #[test]
    fn data_page_summary_values() {
        let page = DataPage::assemble(&sample());
        assert_eq!(page.top_game.as_ref().unwrap().name, "Wii Sports");
        assert_eq!(page.top_game_image, "top_game.jpg");
        assert_eq!(page.top_region.unwrap().column, SalesColumn::Na);
        assert_eq!(page.platform_mode.as_ref().unwrap().key, "Wii");
        assert_eq!(page.platform_leader.as_ref().unwrap().key, "Wii");
        assert_eq!(page.top_publishers[0].key.as_deref(), Some("Nintendo"));
        assert_eq!(page.most_sold, page.most_played);
    }

    #[test]
    fn data_page_leader_is_by_sales_not_by_count() {
        let ds = Dataset::from_records(vec![
            record("a", "Wii", Some(2007), "Sports", None, 1.0),
            record("b", "Wii", Some(2007), "Sports", None, 1.0),
            record("c", "NES", Some(1985), "Platform", None, 10.0),
        ]);
        let page = DataPage::assemble(&ds);
        assert_eq!(page.platform_mode.as_ref().unwrap().key, "Wii");
        assert_eq!(page.platform_leader, aggregate::platform_sales_leader(&ds));
        assert_eq!(page.platform_leader.as_ref().unwrap().key, "NES");
    }

    #[test]
    fn empty_dataset_assembles_empty_pages() {
        let dashboard = Dashboard::build(&Dataset::default());
        assert_eq!(dashboard.records(), 0);
        assert!(dashboard.index.genres.is_empty());
        assert!(dashboard.most_sold.games.is_empty());
        assert!(dashboard.data.top_game.is_none());
        assert!(dashboard.data.top_region.is_none());
    }

    #[test]
    fn memoized_pages_match_fresh_assembly() {
        let ds = sample();
        let dashboard = Dashboard::build(&ds);
        assert_eq!(dashboard.data, DataPage::assemble(&ds));
        assert_eq!(dashboard.statistics, StatisticsPage::assemble(&ds));
    }
}

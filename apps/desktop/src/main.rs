use std::path::PathBuf;

use iced::widget::{
    Column, button, column, container, pick_list, row, scrollable, text, text_input,
};
use iced::{Color, Element, Length, Task};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use ytstats_core::{
    ApiConfig, COLUMNS, DEFAULT_CHANNEL_ID, PlaylistAggregator, SortKey, StatsTable, VideoRecord,
    YoutubeClient, assemble_and_sort, default_export_dir, format::row_cells, save_xlsx,
};

const CHANNEL_ID_HINT: &str =
    "Look up a channel ID at https://seostudio.tools/vi/youtube-channel-id";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    iced::application(App::new, App::update, App::view)
        .title("ytstats")
        .window_size((1100.0, 720.0))
        .run()
}

#[derive(Debug, Clone, Default)]
enum Notice {
    #[default]
    None,
    Info(String),
    Warning(String),
    Error(String),
}

struct App {
    /// `Err` holds the message shown instead of the whole interface.
    config: Result<ApiConfig, String>,
    channel_id: String,
    sort_key: SortKey,
    /// Last successful fetch, in API order.
    fetched: Option<StatsTable>,
    /// `fetched` sorted by `sort_key`; this is what is shown and exported.
    rows: Vec<VideoRecord>,
    loading: bool,
    notice: Notice,
}

#[derive(Debug, Clone)]
enum Message {
    ChannelIdChanged(String),
    Fetch,
    Fetched(Result<StatsTable, String>),
    SortChanged(SortKey),
    Export,
    Exported(Result<PathBuf, String>),
}

async fn fetch(config: ApiConfig, channel_id: String) -> Result<StatsTable, String> {
    let aggregator = PlaylistAggregator::new(YoutubeClient::new(config.clone()), config);
    let records = aggregator
        .collect(&channel_id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(StatsTable {
        channel_id,
        records,
    })
}

async fn export(records: Vec<VideoRecord>, channel_id: String) -> Result<PathBuf, String> {
    save_xlsx(&records, &default_export_dir(), &channel_id)
        .await
        .map_err(|e| e.to_string())
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = ApiConfig::from_env().map_err(|e| {
            format!("Could not load the API key ({e}). The application is disabled.")
        });

        (
            Self {
                config,
                channel_id: DEFAULT_CHANNEL_ID.to_string(),
                sort_key: SortKey::default(),
                fetched: None,
                rows: Vec::new(),
                loading: false,
                notice: Notice::None,
            },
            Task::none(),
        )
    }

    fn resort(&mut self) {
        self.rows = self
            .fetched
            .as_ref()
            .map(|table| assemble_and_sort(table.records.clone(), self.sort_key))
            .unwrap_or_default();
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChannelIdChanged(channel_id) => self.channel_id = channel_id,
            Message::Fetch => {
                if self.loading {
                    return Task::none();
                }
                let Ok(config) = self.config.clone() else {
                    return Task::none();
                };
                let channel_id = self.channel_id.trim().to_string();
                if channel_id.is_empty() {
                    self.notice = Notice::Warning("Please enter a channel ID.".to_string());
                    return Task::none();
                }

                self.loading = true;
                self.notice = Notice::Info(format!("Fetching videos for {channel_id}..."));
                return Task::perform(fetch(config, channel_id), Message::Fetched);
            }
            Message::Fetched(result) => {
                self.loading = false;
                match result {
                    Ok(table) => {
                        self.notice =
                            Notice::Info(format!("{} videos found.", table.records.len()));
                        self.fetched = Some(table);
                        self.resort();
                    }
                    // the previous table stays on screen
                    Err(e) => self.notice = Notice::Error(e),
                }
            }
            Message::SortChanged(sort_key) => {
                self.sort_key = sort_key;
                self.resort();
            }
            Message::Export => {
                if let Some(table) = &self.fetched {
                    return Task::perform(
                        export(self.rows.clone(), table.channel_id.clone()),
                        Message::Exported,
                    );
                }
            }
            Message::Exported(result) => {
                self.notice = match result {
                    Ok(path) => Notice::Info(format!("Saved {}", path.display())),
                    Err(e) => Notice::Error(e),
                };
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        if let Err(message) = &self.config {
            return container(text(message).color(Color::from_rgb(0.8, 0.2, 0.2)))
                .padding(20)
                .into();
        }

        let controls = row![
            text_input("Enter YouTube channel ID...", &self.channel_id)
                .on_input(Message::ChannelIdChanged)
                .on_submit_maybe((!self.loading).then_some(Message::Fetch)),
            button("Get video stats").on_press_maybe((!self.loading).then_some(Message::Fetch)),
            pick_list(SortKey::ALL, Some(self.sort_key), Message::SortChanged),
            button("Export xlsx").on_press_maybe(
                (!self.loading && !self.rows.is_empty()).then_some(Message::Export)
            ),
        ]
        .spacing(10);

        column![
            text("YouTube Channel Video Stats").size(24),
            text(CHANNEL_ID_HINT).size(12),
            controls,
            self.view_notice(),
            scrollable(self.view_table()).height(Length::Fill),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }

    fn view_notice(&self) -> Element<'_, Message> {
        match &self.notice {
            Notice::None => text("").into(),
            Notice::Info(msg) => text(msg).into(),
            Notice::Warning(msg) => text(msg).color(Color::from_rgb(0.85, 0.6, 0.1)).into(),
            Notice::Error(msg) => text(msg).color(Color::from_rgb(0.8, 0.2, 0.2)).into(),
        }
    }

    fn view_table(&self) -> Element<'_, Message> {
        if self.rows.is_empty() {
            return text("").into();
        }

        let header = table_row(
            "#".to_string(),
            COLUMNS.map(|name| name.to_string()),
        );

        let body = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, record)| table_row((i + 1).to_string(), row_cells(record)));

        Column::with_children(std::iter::once(header).chain(body))
            .spacing(4)
            .into()
    }
}

fn table_row<'a>(index: String, cells: [String; 5]) -> Element<'a, Message> {
    let [title, id, published_at, views, likes] = cells;
    row![
        text(index).width(Length::Fixed(48.0)),
        text(title).width(Length::FillPortion(6)),
        text(id).width(Length::FillPortion(2)),
        text(published_at).width(Length::FillPortion(3)),
        text(views).width(Length::FillPortion(2)),
        text(likes).width(Length::FillPortion(2)),
    ]
    .spacing(10)
    .into()
}

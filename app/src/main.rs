//! Sharn Atlas - interactive district map of the city of Sharn

mod info_box;
mod js_interop;
mod loader;
mod map;
mod notice_bar;
mod notice_layer;
mod settings;
mod state;
mod statusbar;
mod toolbar;

use anyhow::Result;
use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use notice_layer::NoticeLayer;
use sharn_core::location::PageLocation;
use state::{AppState, NoticeBuffer};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "sharn-atlas")]
#[command(about = "Interactive district map of Sharn", long_about = None)]
#[command(version)]
struct Args {
    /// Page-style location, e.g. "?json=https://example.org/alt.json#C3"
    #[arg(long)]
    location: Option<String>,

    /// Description file to load instead of the default
    #[arg(long)]
    json: Option<String>,

    /// District to open once descriptions are loaded
    #[arg(long)]
    district: Option<String>,

    /// SVG map file (overrides the saved setting)
    #[arg(long)]
    map: Option<PathBuf>,
}

impl Args {
    /// Combine `--location` with the separate flags; the flags win
    fn page_location(&self) -> Result<PageLocation> {
        let mut location = match &self.location {
            Some(href) => PageLocation::parse(href)?,
            None => PageLocation::default(),
        };
        if let Some(json) = &self.json {
            location.dataset = Some(json.clone());
        }
        if let Some(district) = &self.district {
            location.district = Some(district.clone());
        }
        Ok(location)
    }
}

/// Startup inputs handed to the root component
#[derive(Clone)]
struct Startup {
    location: PageLocation,
    map: Option<PathBuf>,
    notices: NoticeBuffer,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let notices = NoticeBuffer::new();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(NoticeLayer::new(notices.clone()))
        .init();

    let startup = Startup {
        location: args.page_location()?,
        map: args.map,
        notices,
    };

    let window = WindowBuilder::new()
        .with_title("Sharn Atlas")
        .with_inner_size(LogicalSize::new(1400.0, 900.0));

    let config = Config::new()
        .with_window(window)
        .with_menu(None::<dioxus::desktop::muda::Menu>);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(startup)
        .launch(App);

    Ok(())
}

#[component]
fn App() -> Element {
    let startup = use_context::<Startup>();

    let state = use_context_provider(|| {
        let mut settings = settings::load_settings();
        if let Some(map) = &startup.map {
            settings.map_path.clone_from(map);
        }
        Signal::new(AppState::new(
            settings,
            startup.notices.clone(),
            &startup.location,
        ))
    });

    // Map first so regions can register while the dataset loads
    use_hook(move || {
        let source = startup.location.startup_source();
        spawn(async move {
            loader::load_map(state).await;
            loader::load(state, source).await;
        })
    });

    rsx! {
        style { {include_str!("../assets/style.css")} }

        div { class: "app-container",
            toolbar::Toolbar {}
            notice_bar::NoticeBar {}

            div { class: "main-content",
                map::MapPanel {}
                info_box::InfoBox {}
            }

            statusbar::StatusBar {}
        }
    }
}

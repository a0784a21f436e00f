mod app;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod logging;
mod theme;
mod tree;
mod tui;
mod ui;
mod version;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::app::{App, LoadedVersion};
use crate::config::{AppConfig, ThemeConfig, TreeConfig};
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};
use crate::version::Version;

/// Browse a package version's files as a tree and step through files,
/// diff hunks and linter messages from the keyboard.
#[derive(Parser, Debug)]
#[command(name = "pkgtree", version, about)]
struct Cli {
    /// Version JSON file (id, name, entries, optional diff and messages)
    path: PathBuf,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color scheme: dark, light or custom
    #[arg(long)]
    theme: Option<String>,

    /// Use ASCII markers instead of Nerd Font icons
    #[arg(long)]
    no_icons: bool,

    /// Expand every directory on load
    #[arg(long)]
    expanded: bool,

    /// Print the built tree and path list as JSON and exit
    #[arg(long)]
    dump_tree: bool,
}

impl Cli {
    /// Partial config holding only the flags that were given.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            tree: TreeConfig {
                start_expanded: self.expanded.then_some(true),
                use_icons: self.no_icons.then_some(false),
                ..Default::default()
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
            ..Default::default()
        }
    }
}

fn dump_tree(path: &std::path::Path) -> error::Result<()> {
    let loaded = LoadedVersion::build(Version::load(path)?)?;
    let output = serde_json::json!({
        "tree": loaded.tree,
        "pathList": loaded.path_list,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    if !cli.path.is_file() {
        return Err(error::AppError::InvalidPath(format!(
            "{} is not a file",
            cli.path.display()
        )));
    }

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    if let Err(e) = logging::init_logging(&config) {
        eprintln!("Warning: {}", e);
    }

    if cli.dump_tree {
        return dump_tree(&cli.path);
    }

    let mut app = App::new(&config);
    app.load_from_file(&cli.path)?;
    info!("browsing {}", cli.path.display());

    let theme = theme::resolve_theme(&config.theme);
    let use_icons = config.use_icons();

    install_panic_hook();
    let mut tui = Tui::new(config.mouse_enabled())?;
    let result = run(&mut tui, &mut app, &theme, use_icons).await;
    tui.restore()?;
    result
}

/// Draw and dispatch events until the app asks to quit.
async fn run(
    tui: &mut Tui,
    app: &mut App,
    theme: &theme::ThemeColors,
    use_icons: bool,
) -> error::Result<()> {
    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(app, frame, theme, use_icons);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(app, key),
            Event::Mouse(mouse) => handler::handle_mouse_event(app, mouse),
            Event::Tick => app.clear_expired_status(),
            Event::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

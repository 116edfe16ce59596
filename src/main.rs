use std::sync::Arc;

use anyhow::Result;
use skycast_core::Config;
use skycast_services::FavoriteId;
use skycast_ui::{TerminalView, UserAction, WeatherWidget};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Type a city name and press Enter to search.
Commands: /here  /fav  /load <name>  /del <id>  /list  /quit";

/// One line of terminal input.
#[derive(Debug, PartialEq)]
enum Command {
    Action(UserAction),
    RefreshFavorites,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        // Plain text behaves like typing into the search box and pressing Enter.
        return Some(Command::Action(UserAction::KeyPress {
            key: "Enter".to_string(),
            input: line.to_string(),
        }));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "here" => Some(Command::Action(UserAction::Geolocate)),
        "fav" => Some(Command::Action(UserAction::AddCurrentToFavorites)),
        "load" => Some(Command::Action(UserAction::LoadFavorite(arg.to_string()))),
        "del" if !arg.is_empty() => Some(Command::Action(UserAction::DeleteFavorite(
            FavoriteId::from(arg),
        ))),
        "list" => Some(Command::RefreshFavorites),
        "help" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _) = Config::load_validated()?;
    tracing::info!("Config directory: {}", config.config_dir.display());

    let view = Arc::new(TerminalView::stdout());
    let widget = WeatherWidget::from_config(&config, view)?;

    println!("Skycast");
    println!("{}", HELP);

    widget.dispatch(UserAction::PageLoad).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(Command::Action(action)) => widget.dispatch(action).await,
            Some(Command::RefreshFavorites) => {
                widget.refresh_favorites().await;
            }
            Some(Command::Help) => println!("{}", HELP),
            Some(Command::Quit) => break,
            None => println!("Unknown command. {}", HELP),
        }
    }

    tracing::info!("Skycast shutting down");
    Ok(())
}

//! Line-oriented command console standing in for touch gestures.

use controller::{AppMode, StateController};

pub const HELP: &str = "commands: hour N | aqi | mode live|historical|marine | drag P | release | load LOCATION | show | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Hour(usize),
    Aqi,
    Mode(AppMode),
    Drag(f32),
    Release,
    Load(String),
    Show,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "hour" => arg
            .parse::<usize>()
            .map(Command::Hour)
            .map_err(|_| format!("hour expects a non-negative index, got {arg:?}")),
        "aqi" => Ok(Command::Aqi),
        "mode" => match arg.to_ascii_lowercase().as_str() {
            "live" => Ok(Command::Mode(AppMode::Live)),
            "historical" => Ok(Command::Mode(AppMode::Historical)),
            "marine" => Ok(Command::Mode(AppMode::Marine)),
            other => Err(format!("unknown mode {other:?}")),
        },
        "drag" => arg
            .parse::<f32>()
            .map(Command::Drag)
            .map_err(|_| format!("drag expects a number in [0, 1], got {arg:?}")),
        "release" => Ok(Command::Release),
        "load" if !arg.is_empty() => Ok(Command::Load(arg.to_string())),
        "load" => Err("load expects a location".to_string()),
        "show" => Ok(Command::Show),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?}")),
    }
}

/// Forward a gesture to the controller. `Show` and `Quit` are handled by the caller.
pub fn dispatch(controller: &StateController, command: Command) {
    match command {
        Command::Hour(index) => controller.select_hour(index),
        Command::Aqi => controller.toggle_aqi_expansion(),
        Command::Mode(mode) => controller.set_mode(mode),
        Command::Drag(progress) => controller.on_timeline_drag(progress),
        Command::Release => controller.on_timeline_drag_finished(),
        Command::Load(location) => controller.load_live(&location),
        Command::Show | Command::Quit => {}
    }
}

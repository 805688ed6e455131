use client_core::CityListController;

use crate::{
    commands::{dispatch, UiCommand},
    terminal::{read_line, TerminalView},
};

const HELP: &str = "commands: list | add | delete <n> | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum ReplAction {
    Run(UiCommand),
    Help,
    Quit,
    Nothing,
}

fn parse_line(line: &str, view: &TerminalView) -> Result<ReplAction, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ReplAction::Nothing);
    };

    match verb {
        "list" | "ls" | "refresh" => Ok(ReplAction::Run(UiCommand::Refresh)),
        "add" => Ok(ReplAction::Run(UiCommand::Submit)),
        "delete" | "rm" => {
            let raw = words
                .next()
                .ok_or_else(|| "usage: delete <n>".to_string())?;
            let position: usize = raw
                .parse()
                .map_err(|_| format!("'{raw}' is not a list position"))?;
            let id = view
                .id_at(position)
                .ok_or_else(|| format!("no city at position {position}; run 'list' first"))?;
            Ok(ReplAction::Run(UiCommand::Delete { id }))
        }
        "help" | "?" => Ok(ReplAction::Help),
        "quit" | "exit" | "q" => Ok(ReplAction::Quit),
        other => Err(format!("unknown command '{other}'; {HELP}")),
    }
}

/// Loads the list, then serves commands from stdin until `quit` or end of
/// input.
pub async fn run(controller: &CityListController, view: &TerminalView) {
    let _ = dispatch(controller, UiCommand::Refresh).await;
    eprintln!("{HELP}");

    loop {
        eprint!("> ");
        let Some(line) = read_line() else {
            break;
        };
        match parse_line(&line, view) {
            Ok(ReplAction::Run(cmd)) => {
                let _ = dispatch(controller, cmd).await;
            }
            Ok(ReplAction::Help) => eprintln!("{HELP}"),
            Ok(ReplAction::Quit) => break,
            Ok(ReplAction::Nothing) => {}
            Err(message) => eprintln!("{message}"),
        }
    }
}

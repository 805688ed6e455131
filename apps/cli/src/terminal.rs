//! Terminal implementations of the controller's view, prompt and form ports.

use std::{
    io::{self, BufRead, Write},
    sync::Mutex,
};

use client_core::{CityForm, CityListItem, CityView, FormInput, UserPrompt};
use shared::domain::CityId;

/// Prints the list to stdout and remembers it so `delete <n>` can resolve a
/// position back to the id that entry was rendered with.
#[derive(Default)]
pub struct TerminalView {
    items: Mutex<Vec<CityListItem>>,
}

impl TerminalView {
    pub fn id_at(&self, position: usize) -> Option<CityId> {
        let items = self.items.lock().ok()?;
        position
            .checked_sub(1)
            .and_then(|index| items.get(index))
            .map(|item| item.id.clone())
    }
}

impl CityView for TerminalView {
    fn replace_items(&self, items: Vec<CityListItem>) {
        let rendered = format_items(&items);
        if let Ok(mut current) = self.items.lock() {
            *current = items;
        }
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(rendered.as_bytes());
        let _ = stdout.flush();
    }
}

pub fn format_items(items: &[CityListItem]) -> String {
    if items.is_empty() {
        return "(no cities)\n".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{:>3}. {}  [{}]\n", index + 1, item.label(), item.id))
        .collect()
}

pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl UserPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        read_line().is_some_and(|answer| is_affirmative(&answer))
    }

    fn notify(&self, message: &str) {
        eprintln!("! {message}");
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Holds values given on the command line until the first reset; after that
/// (or when started empty) every read asks for each field on stdin.
pub struct TerminalForm {
    prefilled: Mutex<Option<FormInput>>,
}

impl TerminalForm {
    pub fn prefilled(input: FormInput) -> Self {
        Self {
            prefilled: Mutex::new(Some(input)),
        }
    }

    pub fn interactive() -> Self {
        Self {
            prefilled: Mutex::new(None),
        }
    }
}

impl CityForm for TerminalForm {
    fn read(&self) -> FormInput {
        if let Some(input) = self.prefilled.lock().ok().and_then(|guard| guard.clone()) {
            return input;
        }
        FormInput {
            name: ask("City name"),
            population: ask("Population"),
            country: ask("Country"),
        }
    }

    fn reset(&self) {
        if let Ok(mut prefilled) = self.prefilled.lock() {
            *prefilled = None;
        }
    }
}

fn ask(label: &str) -> String {
    eprint!("{label}: ");
    let _ = io::stderr().flush();
    read_line().unwrap_or_default()
}

/// `None` on end of input or a read error.
pub fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

// src/modules/tasks/user_interface.rs
use std::io::{self, BufRead, Write};

use super::model::TaskId;
use super::storage::Storage;
use super::store::TaskStore;
use crate::modules::utils::io::{prompt, read_line};

const HEADER: &str = "To Do List";
const INPUT_PROMPT: &str = "+ To Do List > ";
const HELP: &str = "Type a task and press Enter to add it. :N opens task N, :h shows this help, :q quits. \
Start a task with :: to add text beginning with a colon (::q adds \":q\").";

/// One line typed at the main screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenInput {
    /// Nothing typed; ignored like an empty submit
    Empty,
    Add(String),
    /// Open the action menu for the task at this 1-based position
    Select(usize),
    Help,
    Quit,
}

/// Entries of the per-task action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Toggle,
    Edit,
    Delete,
    Cancel,
}

/// Interpret a line typed at the main screen.
///
/// `:q`, `:h` and `:N` are commands; any other non-empty line, including one
/// made only of spaces, is new task text. A leading `::` adds the rest of the
/// line with a single `:` in front.
pub fn parse_screen_input(line: &str) -> ScreenInput {
    if line.is_empty() {
        return ScreenInput::Empty;
    }

    if let Some(escaped) = line.strip_prefix("::") {
        return ScreenInput::Add(format!(":{}", escaped));
    }

    if let Some(command) = line.strip_prefix(':') {
        match command.trim() {
            "q" | "quit" => return ScreenInput::Quit,
            "h" | "help" => return ScreenInput::Help,
            other => {
                if let Ok(position) = other.parse::<usize>() {
                    return ScreenInput::Select(position);
                }
            }
        }
    }

    ScreenInput::Add(line.to_string())
}

/// Interpret a choice in the action menu. Empty input cancels.
pub fn parse_menu_choice(line: &str) -> Option<MenuAction> {
    match line.trim().to_lowercase().as_str() {
        "1" | "t" | "toggle" => Some(MenuAction::Toggle),
        "2" | "e" | "edit" => Some(MenuAction::Edit),
        "3" | "d" | "delete" => Some(MenuAction::Delete),
        "" | "4" | "c" | "cancel" => Some(MenuAction::Cancel),
        _ => None,
    }
}

/// Print the header and every task in collection order
pub fn render_list<S: Storage, W: Write>(store: &TaskStore<S>, output: &mut W) -> io::Result<()> {
    writeln!(output, "\n{}", HEADER)?;

    if store.tasks().is_empty() {
        writeln!(output, "  No tasks yet.")?;
        return Ok(());
    }

    for (index, task) in store.tasks().iter().enumerate() {
        let mark = if task.done { "x" } else { " " };
        writeln!(output, "  {}. [{}] {}", index + 1, mark, task.text)?;
    }
    Ok(())
}

/// Run the single to-do screen until `:q` or end of input
pub fn run_screen<S: Storage, R: BufRead, W: Write>(
    store: &mut TaskStore<S>,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    render_list(store, output)?;

    loop {
        prompt(output, INPUT_PROMPT)?;
        let line = match read_line(input)? {
            Some(line) => line,
            None => break,
        };

        match parse_screen_input(&line) {
            ScreenInput::Empty => continue,
            ScreenInput::Quit => break,
            ScreenInput::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            ScreenInput::Add(text) => {
                store.add(&text);
            }
            ScreenInput::Select(position) => {
                let id = position
                    .checked_sub(1)
                    .and_then(|index| store.tasks().id_at(index))
                    .cloned();
                match id {
                    Some(id) => {
                        if !handle_task_menu(store, &id, input, output)? {
                            break;
                        }
                    }
                    None => {
                        writeln!(output, "No task at position {}.", position)?;
                        continue;
                    }
                }
            }
        }

        report_save_failure(store, output)?;
        render_list(store, output)?;
    }

    writeln!(output)?;
    Ok(())
}

/// Show the action menu for one task. Returns `false` when input ran out.
fn handle_task_menu<S: Storage, R: BufRead, W: Write>(
    store: &mut TaskStore<S>,
    id: &TaskId,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    let toggle_label = match store.get(id) {
        Some(task) if task.done => "Mark as not done",
        Some(_) => "Mark as done",
        None => return Ok(true),
    };

    writeln!(output, "1. {}", toggle_label)?;
    writeln!(output, "2. Edit")?;
    writeln!(output, "3. Delete")?;
    writeln!(output, "4. Cancel")?;

    let action = loop {
        prompt(output, "Choose an action: ")?;
        let line = match read_line(input)? {
            Some(line) => line,
            None => return Ok(false),
        };
        match parse_menu_choice(&line) {
            Some(action) => break action,
            None => writeln!(output, "Invalid choice. Please enter 1-4:")?,
        }
    };

    match action {
        MenuAction::Toggle => {
            store.toggle_done(id);
        }
        MenuAction::Delete => {
            store.remove(id);
        }
        MenuAction::Cancel => {}
        MenuAction::Edit => {
            if let Some(task) = store.get(id) {
                writeln!(output, "Current text: {}", task.text)?;
            }
            prompt(output, "New text (Enter to cancel): ")?;
            let new_text = match read_line(input)? {
                Some(text) => text,
                None => return Ok(false),
            };
            if new_text.is_empty() {
                writeln!(output, "Edit cancelled.")?;
            } else {
                store.edit(id, &new_text);
            }
        }
    }

    Ok(true)
}

fn report_save_failure<S: Storage, W: Write>(store: &TaskStore<S>, output: &mut W) -> io::Result<()> {
    if let Some(err) = store.last_save_error() {
        writeln!(output, "Warning: changes are not saved yet ({}).", err)?;
    }
    Ok(())
}

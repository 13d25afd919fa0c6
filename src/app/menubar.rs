use std::io;

use crossterm::{cursor, queue, style, terminal};

use crate::menubar::print_menu_item;

use super::state::{AppState, Mode};
use super::ui::Layout;

/// Arrow bindings shown as arrows, everything else by name.
fn key_label(binding: &str) -> &str {
    match binding {
        "Up" => "↑",
        "Down" => "↓",
        "Left" => "←",
        "Right" => "→",
        other => other,
    }
}

fn hint(binding: &str, label: &str) -> String {
    format!("[{}] {label}", key_label(binding))
}

/// Hints follow the configured bindings, in a fixed order:
///   objects → motion → quiz → escape/global
fn mode_items(state: &AppState) -> Vec<String> {
    let keys = &state.config.key_bindings;
    let pair = |a: &str, b: &str, label: &str| format!("[{}][{}] {label}", key_label(a), key_label(b));
    match &state.mode {
        Mode::Normal => {
            let mut items = vec![
                hint(&keys.add_object, "add"),
                hint(&keys.remove_object, "del"),
                pair(&keys.select_prev, &keys.select_next, "select"),
                hint(&keys.edit_mass, "mass"),
                hint(&keys.edit_velocity, "velocity"),
                hint(&keys.toggle_run, if state.sim.is_running() { "stop" } else { "start" }),
                hint(&keys.reset_all, "reset"),
                hint(&keys.toggle_quiz, "quiz"),
            ];
            if state.sim.quiz_mode() {
                items.extend([
                    hint(&keys.answer, "guess"),
                    hint(&keys.check_answers, "check"),
                    hint(&keys.clear_answers, "clear"),
                ]);
            }
            items.extend([hint(&keys.reveal_answers, "show answers"), hint(&keys.quit, "quit")]);
            items
        }
        Mode::AddObject { .. } => vec![
            pair(&keys.move_up, &keys.move_down, "type"),
            hint(&keys.confirm, "add"),
            hint(&keys.cancel, "cancel"),
        ],
        Mode::EditField { .. } | Mode::QuizAnswer { .. } => vec![
            "[0-9 . -] type".to_string(),
            "[Backspace] erase".to_string(),
            hint(&keys.confirm, "apply"),
            hint(&keys.cancel, "cancel"),
        ],
        Mode::Confirm { .. } => vec![
            pair(&keys.move_up, &keys.move_down, "choose"),
            hint(&keys.confirm, "confirm"),
            hint(&keys.cancel, "cancel"),
        ],
    }
}

pub fn render_menubar(stdout: &mut io::Stdout, layout: &Layout, state: &AppState) -> anyhow::Result<()> {
    let items = mode_items(state);
    let mut x: u16 = 1;

    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;

    for (i, item) in items.iter().enumerate() {
        let sep = if i > 0 { 2 } else { 0 };
        if x + sep + item.chars().count() as u16 > layout.term_width {
            break; // Drop what does not fit.
        }
        if sep > 0 {
            queue!(stdout, style::Print("  "))?;
        }
        x += sep + print_menu_item(stdout, item)?;
    }

    Ok(())
}

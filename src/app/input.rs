use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::engine::instance::Field;

use super::config::matches_binding;
use super::state::{AppState, ConfirmAction, Mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    Redraw,
    /// The terminal changed size; the canvas must be rebuilt.
    Resize,
    Quit,
}

pub fn handle_event(state: &mut AppState, event: Event, now: Instant) -> Action {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key, now),
        Event::Resize(_, _) => Action::Resize,
        _ => Action::Continue,
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Action {
    match &state.mode {
        Mode::Normal => handle_normal(state, key, now),
        Mode::AddObject { .. } => handle_add_object(state, key),
        Mode::EditField { .. } | Mode::QuizAnswer { .. } => handle_text_entry(state, key),
        Mode::Confirm { .. } => handle_confirm(state, key),
    }
}

fn handle_normal(state: &mut AppState, key: KeyEvent, now: Instant) -> Action {
    let bindings = state.config.key_bindings.clone();

    if matches_binding(&bindings.quit, &key) {
        return Action::Quit;
    }
    if matches_binding(&bindings.add_object, &key) {
        if state.sim.catalog().is_empty() {
            state.status_message = Some("Catalog is empty".into());
        } else {
            state.mode = Mode::AddObject { selected: 0 };
            state.status_message = None;
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.select_next, &key) {
        state.select_next();
        return Action::Redraw;
    }
    if matches_binding(&bindings.select_prev, &key) {
        state.select_prev();
        return Action::Redraw;
    }
    if matches_binding(&bindings.remove_object, &key) {
        state.remove_selected();
        return Action::Redraw;
    }
    if matches_binding(&bindings.edit_mass, &key) {
        return begin_field_edit(state, Field::Mass);
    }
    if matches_binding(&bindings.edit_velocity, &key) {
        return begin_field_edit(state, Field::Velocity);
    }
    if matches_binding(&bindings.toggle_run, &key) {
        state.toggle_run(now);
        return Action::Redraw;
    }
    if matches_binding(&bindings.reset_all, &key) {
        state.mode = Mode::Confirm {
            message: "Remove every object?".into(),
            selected: 1,
            action: ConfirmAction::ResetAll,
        };
        return Action::Redraw;
    }
    if matches_binding(&bindings.toggle_quiz, &key) {
        state.toggle_quiz();
        state.status_message = Some(
            if state.sim.quiz_mode() { "Quiz mode on" } else { "Quiz mode off" }.into(),
        );
        return Action::Redraw;
    }
    if matches_binding(&bindings.answer, &key) {
        match state.selected_id() {
            Some(id) => {
                let buf = state.guesses.get(&id).cloned().unwrap_or_default();
                state.mode = Mode::QuizAnswer { id, buf };
            }
            None => state.status_message = Some("No objects added.".into()),
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.check_answers, &key) {
        state.check_answers();
        return Action::Redraw;
    }
    if matches_binding(&bindings.clear_answers, &key) {
        state.clear_answers();
        return Action::Redraw;
    }
    if matches_binding(&bindings.reveal_answers, &key) {
        state.reveal_answers();
        return Action::Redraw;
    }

    Action::Continue
}

fn begin_field_edit(state: &mut AppState, field: Field) -> Action {
    let Some(inst) = state.sim.instances().get(state.selected) else {
        state.status_message = Some("No objects added.".into());
        return Action::Redraw;
    };
    let value = match field {
        Field::Mass => inst.mass,
        Field::Velocity => inst.velocity,
    };
    state.mode = Mode::EditField {
        id: inst.id,
        field,
        buf: value.to_string(),
    };
    Action::Redraw
}

fn handle_add_object(state: &mut AppState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();
    let Mode::AddObject { selected } = state.mode else {
        return Action::Continue;
    };
    let count = state.sim.catalog().len();

    if matches_binding(&bindings.cancel, &key) {
        state.mode = Mode::Normal;
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_up, &key) {
        let selected = if selected == 0 { count.saturating_sub(1) } else { selected - 1 };
        state.mode = Mode::AddObject { selected };
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_down, &key) {
        state.mode = Mode::AddObject {
            selected: (selected + 1) % count.max(1),
        };
        return Action::Redraw;
    }
    if matches_binding(&bindings.confirm, &key) {
        let key = state.sim.catalog().entries().get(selected).map(|t| t.key.clone());
        state.mode = Mode::Normal;
        if let Some(key) = key {
            state.add(&key);
        }
        return Action::Redraw;
    }

    Action::Continue
}

/// Shared line editing for field values and quiz guesses.
fn handle_text_entry(state: &mut AppState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();

    if matches_binding(&bindings.cancel, &key) {
        state.mode = Mode::Normal;
        return Action::Redraw;
    }
    if matches_binding(&bindings.confirm, &key) {
        match std::mem::replace(&mut state.mode, Mode::Normal) {
            Mode::EditField { id, field, buf } => state.apply_field(id, field, &buf),
            Mode::QuizAnswer { id, buf } => {
                state.guesses.insert(id, buf);
                state.feedback.remove(&id);
            }
            other => state.mode = other,
        }
        return Action::Redraw;
    }

    let buf = match &mut state.mode {
        Mode::EditField { buf, .. } | Mode::QuizAnswer { buf, .. } => buf,
        _ => return Action::Continue,
    };
    match key.code {
        KeyCode::Backspace => {
            buf.pop();
            Action::Redraw
        }
        KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E' | '+') => {
            buf.push(c);
            Action::Redraw
        }
        _ => Action::Continue,
    }
}

fn handle_confirm(state: &mut AppState, key: KeyEvent) -> Action {
    let bindings = state.config.key_bindings.clone();
    let Mode::Confirm { selected, ref action, .. } = state.mode else {
        return Action::Continue;
    };
    let action = action.clone();

    if matches_binding(&bindings.cancel, &key) {
        state.mode = Mode::Normal;
        return Action::Redraw;
    }
    if matches_binding(&bindings.move_up, &key) || matches_binding(&bindings.move_down, &key) {
        if let Mode::Confirm { selected, .. } = &mut state.mode {
            *selected = 1 - *selected;
        }
        return Action::Redraw;
    }
    if matches_binding(&bindings.confirm, &key) {
        state.mode = Mode::Normal;
        if selected == 0 {
            match action {
                ConfirmAction::ResetAll => state.reset_all(),
            }
        }
        return Action::Redraw;
    }

    Action::Continue
}

use std::io;

use crossterm::{cursor, queue, style};

use crate::engine::reveal::{format_momentum, QuizFeedback};

use super::state::{AppState, Mode};
use super::ui::Layout;

/// One printable panel row.
#[derive(Debug, Clone, PartialEq)]
enum Row {
    Title(String),
    Plain(String),
    Dim(String),
    Highlight(String),
    Good(String),
    Bad(String),
}

pub fn render_right_panel(
    stdout: &mut io::Stdout,
    layout: &Layout,
    state: &AppState,
) -> anyhow::Result<()> {
    if layout.right_panel_width < 4 {
        return Ok(());
    }

    let panel_x = layout.canvas_x + layout.canvas_width;
    let cy = layout.canvas_y;
    let max_width = (layout.right_panel_width - 3) as usize;

    for y in 0..layout.canvas_height {
        queue!(stdout, cursor::MoveTo(panel_x, cy + y), style::Print("\u{2502}"))?;
    }

    for (i, row) in panel_rows(state).iter().enumerate() {
        let y = cy + i as u16;
        if y >= cy + layout.canvas_height {
            break;
        }
        let (text, attr, color) = match row {
            Row::Title(t) => (t, Some(style::Attribute::Bold), None),
            Row::Plain(t) => (t, None, None),
            Row::Dim(t) => (t, Some(style::Attribute::Dim), None),
            Row::Highlight(t) => (t, Some(style::Attribute::Reverse), None),
            Row::Good(t) => (t, None, Some(style::Color::Green)),
            Row::Bad(t) => (t, None, Some(style::Color::Red)),
        };
        let text: String = text.chars().take(max_width).collect();
        let mut cs = style::ContentStyle::default();
        if let Some(attr) = attr {
            cs.attributes.set(attr);
        }
        cs.foreground_color = color;
        queue!(
            stdout,
            cursor::MoveTo(panel_x + 2, y),
            style::PrintStyledContent(style::StyledContent::new(
                cs,
                format!("{:<width$}", text, width = max_width),
            )),
        )?;
    }
    Ok(())
}

fn panel_rows(state: &AppState) -> Vec<Row> {
    match &state.mode {
        Mode::AddObject { selected } => {
            let mut rows = vec![Row::Title("Add Object".into()), Row::Plain(String::new())];
            for (i, ty) in state.sim.catalog().entries().iter().enumerate() {
                let text = format!("{} {} ({} kg)", ty.icon, ty.label, format_momentum(Some(ty.default_mass)));
                rows.push(if i == *selected {
                    Row::Highlight(format!("> {text}"))
                } else {
                    Row::Plain(format!("  {text}"))
                });
            }
            rows
        }
        Mode::Confirm { message, selected, .. } => {
            let mut rows = vec![Row::Title("Confirm".into()), Row::Dim(message.clone())];
            for (i, label) in ["Yes", "No"].iter().enumerate() {
                rows.push(if i == *selected {
                    Row::Highlight(label.to_string())
                } else {
                    Row::Plain(label.to_string())
                });
            }
            rows
        }
        _ => instance_rows(state),
    }
}

fn instance_rows(state: &AppState) -> Vec<Row> {
    let mut rows = vec![Row::Title("Objects".into())];
    let instances = state.sim.instances();
    if instances.is_empty() {
        rows.push(Row::Dim("No objects added.".into()));
    }

    for (i, inst) in instances.iter().enumerate() {
        let heading = format!("{} {}", inst.label, inst.id);
        rows.push(if i == state.selected {
            Row::Highlight(format!("> {heading}"))
        } else {
            Row::Plain(format!("  {heading}"))
        });
        rows.push(Row::Plain(format!(
            "    m {} kg  v {} m/s",
            format_momentum(Some(inst.mass)),
            format_momentum(Some(inst.velocity)),
        )));
        rows.push(Row::Plain(format!(
            "    p {} kg·m/s",
            format_momentum(state.readouts.get(inst.id))
        )));

        if state.sim.quiz_mode() || state.feedback.contains_key(&inst.id) {
            let guess = state.guesses.get(&inst.id).map(String::as_str).unwrap_or("");
            rows.push(match state.feedback.get(&inst.id) {
                Some(QuizFeedback::Correct) => Row::Good(format!("    guess {guess} ✓")),
                Some(QuizFeedback::Incorrect { correct }) => {
                    Row::Bad(format!("    guess {guess} ✗ (correct: {correct:.2})"))
                }
                Some(QuizFeedback::Blank) => Row::Dim("    guess —".into()),
                None => Row::Dim(format!("    guess {guess}")),
            });
        }
    }

    if let Some(answers) = &state.answers {
        rows.push(Row::Plain(String::new()));
        rows.push(Row::Title("Correct answers (p = m × v)".into()));
        if answers.is_empty() {
            rows.push(Row::Dim("No objects added.".into()));
        }
        for a in answers {
            rows.push(Row::Plain(format!(
                "  {} {}: {} kg·m/s",
                a.label,
                a.id,
                format_momentum(Some(a.momentum))
            )));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::AppConfig;
    use crate::catalog::Catalog;

    fn state() -> AppState {
        let mut state = AppState::new(AppConfig::default(), Catalog::default(), 800.0, 400.0);
        state.add_startup_objects();
        state
    }

    #[test]
    fn lists_instances_with_momentum() {
        let rows = panel_rows(&state());
        assert_eq!(rows[1], Row::Highlight("> Car #1".into()));
        assert_eq!(rows[2], Row::Plain("    m 1,200 kg  v 2 m/s".into()));
        assert_eq!(rows[3], Row::Plain("    p 2,400 kg·m/s".into()));
    }

    #[test]
    fn quiz_mode_hides_momentum_and_shows_guess() {
        let mut state = state();
        state.toggle_quiz();
        let rows = panel_rows(&state);
        assert_eq!(rows[3], Row::Plain("    p — kg·m/s".into()));
        assert_eq!(rows[4], Row::Dim("    guess ".into()));
    }

    #[test]
    fn wrong_guess_shows_correction() {
        let mut state = state();
        let bike = state.sim.instances()[1].id;
        state.guesses.insert(bike, "3".into());
        state.check_answers();
        let rows = panel_rows(&state);
        assert!(rows.contains(&Row::Bad("    guess 3 ✗ (correct: 7.50)".into())));
    }

    #[test]
    fn empty_answers_list() {
        let mut state = state();
        state.reset_all();
        state.reveal_answers();
        let rows = panel_rows(&state);
        assert_eq!(rows.iter().filter(|r| **r == Row::Dim("No objects added.".into())).count(), 2);
    }
}

use std::io;

use crate::engine::instance::Field;
use crate::term;
use crate::types::Cell;

use super::state::{AppState, Mode};

/// Width (in columns) of the right-hand instance panel.
pub const RIGHT_PANEL_WIDTH: u16 = 34;

pub struct Layout {
    pub right_panel_width: u16,
    pub canvas_x: u16,
    pub canvas_y: u16,
    pub canvas_width: u16,
    pub canvas_height: u16,
    pub status_y: u16,
    pub term_width: u16,
}

impl Layout {
    pub fn compute(term_width: u16, term_height: u16) -> Self {
        let right = RIGHT_PANEL_WIDTH.min(term_width / 2);
        let status_h: u16 = 1;
        let menu_h: u16 = 1;
        Layout {
            right_panel_width: right,
            canvas_x: 0,
            canvas_y: menu_h,
            canvas_width: term_width.saturating_sub(right),
            canvas_height: term_height.saturating_sub(status_h + menu_h),
            status_y: term_height.saturating_sub(status_h),
            term_width,
        }
    }
}

/// Paint a cell grid into the canvas area, clipped to it.
pub fn render_canvas(stdout: &mut io::Stdout, layout: &Layout, cells: &[Vec<Cell>]) -> anyhow::Result<()> {
    term::draw_grid(
        stdout,
        (layout.canvas_x, layout.canvas_y),
        (layout.canvas_width, layout.canvas_height),
        cells,
    )
}

/// Bottom line: the text prompt while typing, otherwise the status message
/// or the run state.
pub fn render_status(stdout: &mut io::Stdout, layout: &Layout, state: &AppState) -> anyhow::Result<()> {
    let text = match &state.mode {
        Mode::EditField { id, field, buf } => {
            let name = match field {
                Field::Mass => "Mass (kg)",
                Field::Velocity => "Velocity (m/s)",
            };
            format!(" {name} for {id}: {buf}_")
        }
        Mode::QuizAnswer { id, buf } => format!(" Momentum of {id} (kg·m/s): {buf}_"),
        _ => match &state.status_message {
            Some(msg) => format!(" {msg}"),
            None => format!(
                " {} | {} objects{}",
                if state.sim.is_running() { "running" } else { "stopped" },
                state.sim.instances().len(),
                if state.sim.quiz_mode() { " | quiz" } else { "" },
            ),
        },
    };
    let text: String = text.chars().take(layout.term_width as usize).collect();

    term::draw_status(stdout, layout.status_y, &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_fills_what_the_panel_leaves() {
        let layout = Layout::compute(120, 40);
        assert_eq!(layout.canvas_width, 120 - RIGHT_PANEL_WIDTH);
        assert_eq!(layout.canvas_height, 38);
        assert_eq!(layout.status_y, 39);
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let layout = Layout::compute(10, 1);
        assert_eq!(layout.right_panel_width, 5);
        assert_eq!(layout.canvas_height, 0);
        assert_eq!(layout.status_y, 0);
    }
}

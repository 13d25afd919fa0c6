use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::catalog::Catalog;
use crate::engine::driver::{FrameHandle, MomentumSink};
use crate::engine::instance::{Field, InstanceId};
use crate::engine::reveal::{check_answer, QuizFeedback, RevealTimer};
use crate::engine::{Answer, Simulation};
use crate::surface::Surface;

use super::config::AppConfig;
use super::scheduler::TerminalScheduler;

/// Catalog keys the app opens with.
const STARTUP_OBJECTS: [&str; 2] = ["car", "bicycle"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    ResetAll,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    AddObject {
        selected: usize,
    },
    /// Typing a new mass or velocity for one instance.
    EditField {
        id: InstanceId,
        field: Field,
        buf: String,
    },
    /// Typing a momentum guess for one instance.
    QuizAnswer {
        id: InstanceId,
        buf: String,
    },
    Confirm {
        message: String,
        /// 0 = Yes, 1 = No
        selected: usize,
        action: ConfirmAction,
    },
}

/// Last momentum shown per instance. `None` is the withheld placeholder.
#[derive(Debug, Default)]
pub struct Readouts(HashMap<InstanceId, Option<f64>>);

impl Readouts {
    pub fn get(&self, id: InstanceId) -> Option<f64> {
        self.0.get(&id).copied().flatten()
    }

    pub fn set(&mut self, id: InstanceId, momentum: Option<f64>) {
        self.0.insert(id, momentum);
    }

    pub fn remove(&mut self, id: InstanceId) {
        self.0.remove(&id);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl MomentumSink for Readouts {
    fn notify(&mut self, id: InstanceId, momentum: Option<f64>) {
        self.set(id, momentum);
    }
}

pub struct AppState {
    pub sim: Simulation,
    pub scheduler: TerminalScheduler,
    pub mode: Mode,
    pub config: AppConfig,
    /// Index into the instance list.
    pub selected: usize,
    pub readouts: Readouts,
    pub guesses: HashMap<InstanceId, String>,
    pub feedback: HashMap<InstanceId, QuizFeedback>,
    /// The answers list, when shown. Empty means "No objects added."
    pub answers: Option<Vec<Answer>>,
    pub reveal: RevealTimer,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog, width: f64, height: f64) -> Self {
        let sim = Simulation::new(catalog, width, height)
            .with_params(config.kinematics.clone(), config.lanes.clone());
        AppState {
            sim,
            scheduler: TerminalScheduler::new(config.fps),
            mode: Mode::Normal,
            reveal: RevealTimer::new(Duration::from_millis(config.reveal_after_ms)),
            config,
            selected: 0,
            readouts: Readouts::default(),
            guesses: HashMap::new(),
            feedback: HashMap::new(),
            answers: None,
            status_message: None,
        }
    }

    /// Add the startup pair. A custom catalog may lack them.
    pub fn add_startup_objects(&mut self) {
        for key in STARTUP_OBJECTS {
            if let Err(e) = self.sim.add_instance(key) {
                warn!("startup object skipped: {e}");
            }
        }
        self.refresh_readouts();
    }

    pub fn selected_id(&self) -> Option<InstanceId> {
        self.sim.instances().get(self.selected).map(|inst| inst.id)
    }

    pub fn add(&mut self, key: &str) {
        match self.sim.add_instance(key) {
            Ok(id) => {
                self.refresh_readout(id);
                self.selected = self.sim.instances().len() - 1;
                if let Some(inst) = self.sim.get(id) {
                    self.status_message = Some(format!("Added {} {}", inst.label, id));
                }
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.sim.remove_instance(id);
        self.readouts.remove(id);
        self.guesses.remove(&id);
        self.feedback.remove(&id);
        self.selected = self.selected.min(self.sim.instances().len().saturating_sub(1));
        self.status_message = Some(format!("Removed {id}"));
    }

    pub fn select_next(&mut self) {
        let n = self.sim.instances().len();
        if n > 0 {
            self.selected = (self.selected + 1) % n;
        }
    }

    pub fn select_prev(&mut self) {
        let n = self.sim.instances().len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    /// Apply a typed field value. Anything that is not a number counts as 0.
    pub fn apply_field(&mut self, id: InstanceId, field: Field, text: &str) {
        let value = text.trim().parse::<f64>().unwrap_or(0.0);
        match field {
            Field::Mass => self.sim.set_mass(id, value),
            Field::Velocity => self.sim.set_velocity(id, value),
        }
        self.refresh_readout(id);
    }

    /// Start the animation. The answers list hides, and the auto-reveal
    /// timer arms unless quiz mode is on.
    pub fn start(&mut self, now: Instant) {
        self.answers = None;
        self.reveal.cancel();
        self.sim.start(&mut self.scheduler);
        if !self.sim.quiz_mode() {
            self.reveal.arm(now);
        }
        self.status_message = None;
    }

    pub fn stop(&mut self) {
        self.sim.stop(&mut self.scheduler);
        self.reveal.cancel();
    }

    pub fn toggle_run(&mut self, now: Instant) {
        if self.sim.is_running() {
            self.stop();
        } else {
            self.start(now);
        }
    }

    pub fn reset_all(&mut self) {
        self.reveal.cancel();
        self.sim.reset_all(&mut self.scheduler);
        self.readouts.clear();
        self.guesses.clear();
        self.feedback.clear();
        self.answers = None;
        self.selected = 0;
        self.status_message = Some("Reset".into());
    }

    pub fn toggle_quiz(&mut self) {
        let on = !self.sim.quiz_mode();
        self.sim.set_quiz_mode(on);
        self.refresh_readouts();
    }

    /// Grade every guess and show each true momentum.
    pub fn check_answers(&mut self) {
        for inst in self.sim.instances() {
            let correct = inst.momentum();
            self.readouts.set(inst.id, Some(correct));
            let guess = self.guesses.get(&inst.id).map(String::as_str).unwrap_or("");
            self.feedback.insert(inst.id, check_answer(guess, correct));
        }
        debug!("checked {} answers", self.feedback.len());
    }

    pub fn clear_answers(&mut self) {
        self.guesses.clear();
        self.feedback.clear();
    }

    pub fn reveal_answers(&mut self) {
        self.reveal.cancel();
        self.answers = Some(self.sim.answers());
    }

    /// Fire the auto-reveal if due. Returns whether the answers appeared.
    pub fn poll_reveal(&mut self, now: Instant) -> bool {
        if self.reveal.poll(now) {
            self.answers = Some(self.sim.answers());
            debug!("auto-reveal fired");
            true
        } else {
            false
        }
    }

    /// Deliver a frame from the scheduler.
    pub fn on_frame(&mut self, handle: FrameHandle, surface: &mut dyn Surface) -> bool {
        self.sim
            .on_frame(handle, surface, &mut self.readouts, &mut self.scheduler)
    }

    fn refresh_readout(&mut self, id: InstanceId) {
        let shown = if self.sim.quiz_mode() {
            None
        } else {
            self.sim.momentum(id)
        };
        self.readouts.set(id, shown);
    }

    fn refresh_readouts(&mut self) {
        let ids: Vec<_> = self.sim.instances().iter().map(|inst| inst.id).collect();
        for id in ids {
            self.refresh_readout(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let mut state = AppState::new(AppConfig::default(), Catalog::default(), 800.0, 400.0);
        state.add_startup_objects();
        state
    }

    #[test]
    fn starts_with_car_and_bicycle() {
        let state = state();
        let keys: Vec<_> = state.sim.instances().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, ["car", "bicycle"]);
        let car = state.sim.instances()[0].id;
        assert_eq!(state.readouts.get(car), Some(1200.0 * 2.0));
    }

    #[test]
    fn quiz_mode_withholds_then_check_reveals() {
        let mut state = state();
        let car = state.sim.instances()[0].id;
        let bike = state.sim.instances()[1].id;
        state.toggle_quiz();
        assert_eq!(state.readouts.get(car), None);

        state.guesses.insert(car, "2400".into());
        state.guesses.insert(bike, "1".into());
        state.check_answers();
        assert_eq!(state.feedback[&car], QuizFeedback::Correct);
        assert_eq!(state.feedback[&bike], QuizFeedback::Incorrect { correct: 15.0 * 0.5 });
        assert_eq!(state.readouts.get(bike), Some(7.5));

        state.clear_answers();
        assert!(state.guesses.is_empty());
        assert!(state.feedback.is_empty());
    }

    #[test]
    fn missing_guess_is_blank() {
        let mut state = state();
        state.check_answers();
        assert!(state.feedback.values().all(|f| *f == QuizFeedback::Blank));
    }

    #[test]
    fn start_arms_reveal_only_outside_quiz_mode() {
        let t0 = Instant::now();
        let mut state = state();
        state.start(t0);
        assert!(state.reveal.is_armed());
        state.stop();
        assert!(!state.reveal.is_armed());

        state.toggle_quiz();
        state.start(t0);
        assert!(!state.reveal.is_armed());
    }

    #[test]
    fn auto_reveal_shows_answers_once() {
        let t0 = Instant::now();
        let mut state = state();
        state.start(t0);
        assert!(!state.poll_reveal(t0));
        assert!(state.poll_reveal(t0 + Duration::from_millis(30_000)));
        assert_eq!(state.answers.as_ref().map(Vec::len), Some(2));
        assert!(!state.poll_reveal(t0 + Duration::from_millis(60_000)));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = state();
        state.start(Instant::now());
        state.reveal_answers();
        state.reset_all();
        assert!(!state.sim.is_running());
        assert!(!state.reveal.is_armed());
        assert!(state.answers.is_none());
        assert!(state.sim.instances().is_empty());
        state.reveal_answers();
        assert_eq!(state.answers, Some(Vec::new()));
    }

    #[test]
    fn bad_field_text_counts_as_zero() {
        let mut state = state();
        let car = state.sim.instances()[0].id;
        state.apply_field(car, Field::Velocity, "fast");
        assert_eq!(state.sim.momentum(car), Some(0.0));
        state.apply_field(car, Field::Mass, " 10 ");
        state.apply_field(car, Field::Velocity, "-3");
        assert_eq!(state.readouts.get(car), Some(-30.0));
    }

    #[test]
    fn removal_keeps_selection_in_range() {
        let mut state = state();
        state.selected = 1;
        state.remove_selected();
        assert_eq!(state.selected, 0);
        state.remove_selected();
        assert_eq!(state.selected_id(), None);
        state.remove_selected();
        state.select_next();
        assert_eq!(state.selected, 0);
    }
}

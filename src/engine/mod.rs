//! Engine — the simulation core.
//!
//! `Simulation` owns the registry, the lane parameters and the animation
//! driver. Hosts feed it frame callbacks and user edits; it never deals
//! with terminals, ANSI codes, or cell grids.

pub mod driver;
pub mod instance;
pub mod kinematics;
pub mod layout;
pub mod registry;
pub mod reveal;

use log::debug;

use crate::catalog::Catalog;
use crate::error::{Result, SimError};
use crate::surface::Surface;

use driver::{AnimationDriver, FrameContext, FrameHandle, FrameScheduler, MomentumSink};
use instance::{Field, Instance, InstanceId};
use kinematics::KinematicParams;
use layout::{layout, LaneParams};
use registry::Registry;

/// One line of the answers list shown on reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub id: InstanceId,
    pub label: String,
    pub momentum: f64,
}

pub struct Simulation {
    catalog: Catalog,
    registry: Registry,
    driver: AnimationDriver,
    kinematics: KinematicParams,
    lanes: LaneParams,
    width: f64,
    height: f64,
    quiz_mode: bool,
}

impl Simulation {
    /// A simulation on a `width` x `height` canvas with random placement.
    pub fn new(catalog: Catalog, width: f64, height: f64) -> Self {
        Self::with_registry(catalog, Registry::default(), width, height)
    }

    /// Like `new`, but placement and gait phases are reproducible.
    pub fn with_seed(catalog: Catalog, width: f64, height: f64, seed: u64) -> Self {
        Self::with_registry(catalog, Registry::seeded(seed), width, height)
    }

    fn with_registry(catalog: Catalog, registry: Registry, width: f64, height: f64) -> Self {
        Simulation {
            catalog,
            registry,
            driver: AnimationDriver::default(),
            kinematics: KinematicParams::default(),
            lanes: LaneParams::default(),
            width,
            height,
            quiz_mode: false,
        }
    }

    pub fn with_params(mut self, kinematics: KinematicParams, lanes: LaneParams) -> Self {
        self.kinematics = kinematics;
        self.lanes = lanes;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn kinematics(&self) -> &KinematicParams {
        &self.kinematics
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Add an instance of the catalog entry `key`. An unknown key changes
    /// nothing.
    pub fn add_instance(&mut self, key: &str) -> Result<InstanceId> {
        let ty = self
            .catalog
            .find(key)
            .ok_or_else(|| SimError::UnknownCategory(key.to_string()))?;
        let id = self.registry.create(ty, self.width, self.height).id;
        self.relayout();
        Ok(id)
    }

    /// Remove `id`. Returns whether it existed.
    pub fn remove_instance(&mut self, id: InstanceId) -> bool {
        let removed = self.registry.remove(id);
        if removed {
            self.relayout();
        }
        removed
    }

    pub fn set_mass(&mut self, id: InstanceId, mass: f64) {
        self.registry.update_field(id, Field::Mass, mass);
    }

    pub fn set_velocity(&mut self, id: InstanceId, velocity: f64) {
        self.registry.update_field(id, Field::Velocity, velocity);
    }

    /// Lay the instances out in fresh lanes and start the frame loop.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.relayout();
        self.driver.start(scheduler);
    }

    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.driver.stop(scheduler);
    }

    /// Stop and drop every instance. Ids are not reused afterwards.
    pub fn reset_all(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.driver.stop(scheduler);
        self.registry.clear();
        debug!("simulation reset");
    }

    pub fn momentum(&self, id: InstanceId) -> Option<f64> {
        self.registry.get(id).map(Instance::momentum)
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn quiz_mode(&self) -> bool {
        self.quiz_mode
    }

    pub fn set_quiz_mode(&mut self, on: bool) {
        self.quiz_mode = on;
        debug!("quiz mode {}", if on { "on" } else { "off" });
    }

    pub fn instances(&self) -> &[Instance] {
        self.registry.list()
    }

    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.registry.get(id)
    }

    /// Frame callback from the host. Returns whether a frame was drawn.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        surface: &mut dyn Surface,
        sink: &mut dyn MomentumSink,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        let frame = FrameContext {
            instances: self.registry.list_mut(),
            surface,
            sink,
            params: &self.kinematics,
            withhold_momentum: self.quiz_mode,
        };
        self.driver.on_frame(handle, frame, scheduler)
    }

    /// New canvas size. Lanes follow the new height.
    pub fn resize(&mut self, width: f64, height: f64) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.relayout();
    }

    /// Paint the current state without advancing it.
    pub fn redraw(&self, surface: &mut dyn Surface) {
        driver::draw_still(self.registry.list(), surface);
    }

    pub fn answers(&self) -> Vec<Answer> {
        self.registry
            .list()
            .iter()
            .map(|inst| Answer {
                id: inst.id,
                label: inst.label.clone(),
                momentum: inst.momentum(),
            })
            .collect()
    }

    fn relayout(&mut self) {
        layout(self.registry.list_mut(), self.height, &self.lanes);
    }
}

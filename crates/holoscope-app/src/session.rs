//! Everything that changes from frame to frame, in one place.
//!
//! The session reads one [`FrameInput`], runs the interaction state
//! machine, moves the camera and the hologram visuals, re-solves the robot
//! pointing and returns the matrices and commands the outer layers need.

use std::collections::VecDeque;

use glam::{Mat4, Vec2, Vec3};
use holoscope_camera::{CameraInput, CameraProjection, CameraState, Hub, OrbitCamera, OrbitSettings};
use holoscope_config::Config;
use holoscope_coords::{GeoPoint, GlobeFrame};
use holoscope_feed::{LatestValue, PlanetFix, SatelliteFix};
use holoscope_input::{Action, ActionState, CursorMode, MouseState};
use holoscope_interface::{
    GlobeState, InteractionInput, InteractionMode, InteractionSettings, InteractionStateMachine,
    InterfaceEvent, InterpolatorTargets, Phase, TerminalState, ViewerEntry,
};
use holoscope_pointing::{
    AstralTarget, HorizonBasis, MotorCommand, MotorSettings, PointingSolution, PointingSolver,
};
use winit::event::MouseButton;

/// One frame of input, already decoded from devices and the GUI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// `x` strafes right, `y` walks forward.
    pub move_axes: Vec2,
    /// Mouse motion in pixels.
    pub mouse_delta: Vec2,
    /// Pointer position in pixels, origin top-left.
    pub pointer: Vec2,
    /// Window size in pixels.
    pub viewport: Vec2,
    /// The interface toggle went down this frame.
    pub activate: bool,
    pub pointer_held: bool,
    pub pointer_released: bool,
    /// Length of the press that just ended, in seconds.
    pub press_duration: f32,
    /// A GUI text field has keyboard focus.
    pub text_focused: bool,
    /// `+1` / `-1` to step through the astral targets.
    pub cycle_target: i32,
    /// Latitude typed and committed in the GUI this frame.
    pub commit_latitude: Option<f32>,
    /// Longitude typed and committed in the GUI this frame.
    pub commit_longitude: Option<f32>,
}

impl FrameInput {
    /// Nothing pressed, pointer centred.
    pub fn idle(viewport: Vec2) -> Self {
        Self {
            move_axes: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
            pointer: viewport * 0.5,
            viewport,
            activate: false,
            pointer_held: false,
            pointer_released: false,
            press_duration: 0.0,
            text_focused: false,
            cycle_target: 0,
            commit_latitude: None,
            commit_longitude: None,
        }
    }

    /// Build from resolved actions and the mouse state.
    pub fn from_devices(actions: &ActionState, mouse: &MouseState, viewport: Vec2) -> Self {
        let (strafe, forward) = actions.move_axes();
        let cycle_target = i32::from(actions.action_just_activated(Action::NextTarget))
            - i32::from(actions.action_just_activated(Action::PreviousTarget));
        Self {
            move_axes: Vec2::new(strafe, forward),
            mouse_delta: mouse.delta(),
            pointer: mouse.position(),
            viewport,
            activate: actions.action_just_activated(Action::ToggleInterface),
            pointer_held: actions.is_action_active(Action::Select),
            pointer_released: actions.action_just_deactivated(Action::Select),
            press_duration: mouse.release_duration(MouseButton::Left),
            text_focused: false,
            cycle_target,
            commit_latitude: None,
            commit_longitude: None,
        }
    }
}

/// Satellite fixes kept for the orbit trail.
pub const SATELLITE_TRAIL_LEN: usize = 64;

/// A motor command with its step count resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorStep {
    pub command: MotorCommand,
    pub steps: i32,
}

/// What one frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub globe_model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub terminal_model: Mat4,
    /// Present once a pointing solution exists. Drawn from the fixed
    /// arrow source, not from the globe.
    pub arrow_model: Option<Mat4>,
    /// Satellite position over the hologram, once a fix has arrived.
    pub satellite_marker: Option<Vec3>,
    /// Recent satellite positions over the hologram, oldest first.
    pub satellite_trail: Vec<Vec3>,
    /// Viewer position on the hologram surface.
    pub viewer_marker: Vec3,
    pub events: Vec<InterfaceEvent>,
    pub cursor: CursorMode,
    pub phase: Phase,
    pub viewer: GeoPoint,
    /// Replacement text for the latitude field.
    pub latitude_echo: Option<String>,
    /// Replacement text for the longitude field.
    pub longitude_echo: Option<String>,
    /// Compass value for the HUD, degrees.
    pub heading_deg: f32,
    /// Only filled when the solution changed this frame.
    pub motor_steps: Vec<MotorStep>,
}

pub struct Session {
    camera: OrbitCamera,
    projection: CameraProjection,
    hub: Hub,
    globe: GlobeState,
    terminal: TerminalState,
    machine: InteractionStateMachine,
    viewer_entry: ViewerEntry,
    solver: PointingSolver,
    motors: MotorSettings,
    satellites: LatestValue<SatelliteFix>,
    planets: LatestValue<PlanetFix>,
    target: AstralTarget,
    solution: Option<PointingSolution>,
    /// Geographic point and scaled altitude of recent fixes.
    trail: VecDeque<(GeoPoint, f32)>,
    anchor_screen: Vec2,
    marker_offset: f32,
    arrow_source: Vec3,
    invert_y: bool,
}

impl Session {
    pub fn new(
        config: &Config,
        satellites: LatestValue<SatelliteFix>,
        planets: LatestValue<PlanetFix>,
    ) -> Self {
        let origin = Vec3::from(config.globe.origin);
        let interface = &config.interface;

        let camera_state =
            CameraState::looking_at(Vec3::from(config.camera.start_position), origin);
        let camera = OrbitCamera::new(
            camera_state,
            OrbitSettings {
                mouse_sensitivity: config.camera.mouse_sensitivity
                    * config.input.mouse_sensitivity,
                smooth_factor: config.camera.smooth_factor,
                move_speed: config.camera.move_speed,
                pitch_limit: config.camera.pitch_limit,
            },
        );
        let projection = CameraProjection {
            fov_y: config.camera.fov_y_deg.to_radians(),
            near: config.camera.near,
            far: config.camera.far,
            ..CameraProjection::default()
        };

        let globe = GlobeState::with_tilt(
            origin,
            config.globe.radius,
            config.globe.tilt_deg.to_radians(),
        );
        let terminal_rest = Vec3::from(interface.terminal_rest);
        let terminal = TerminalState::new(
            terminal_rest,
            interface.terminal_rest_yaw_deg,
            Vec2::from(interface.terminal_half_extents),
        );

        let settings = InteractionSettings {
            lerp_rate: interface.lerp_rate,
            earth_anchor_distance: interface.earth_anchor_distance,
            terminal_anchor_distance: interface.terminal_anchor_distance,
            focus_distance: interface.focus_distance,
            drag_threshold: interface.drag_threshold_s,
            converge_epsilon: interface.converge_epsilon,
            drag_sensitivity: config.globe.drag_sensitivity,
            globe_pitch_limit: interface.globe_pitch_limit_deg.to_radians(),
        };
        let targets = InterpolatorTargets::at_rest(
            camera_state.position,
            camera_state.target,
            origin,
            terminal_rest,
            interface.terminal_rest_yaw_deg,
        );
        let viewer = GeoPoint::new(config.viewer.latitude, config.viewer.longitude);

        Self {
            camera,
            projection,
            hub: Hub {
                center: origin,
                radius: config.hub.radius,
            },
            globe,
            terminal,
            machine: InteractionStateMachine::new(settings, targets, viewer),
            viewer_entry: ViewerEntry::new(viewer),
            solver: PointingSolver::new(config.globe.radius),
            motors: MotorSettings {
                steps_per_revolution: config.motors.steps_per_revolution,
                invert_pan: config.motors.invert_pan,
            },
            satellites,
            planets,
            target: AstralTarget::default(),
            solution: None,
            trail: VecDeque::with_capacity(SATELLITE_TRAIL_LEN),
            anchor_screen: Vec2::from(interface.earth_anchor_screen),
            marker_offset: config.globe.marker_offset,
            arrow_source: Vec3::from(config.globe.arrow_source),
            invert_y: config.input.invert_y,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera.state
    }

    pub fn globe(&self) -> &GlobeState {
        &self.globe
    }

    pub fn terminal(&self) -> &TerminalState {
        &self.terminal
    }

    pub fn machine(&self) -> &InteractionStateMachine {
        &self.machine
    }

    pub fn target(&self) -> AstralTarget {
        self.target
    }

    pub fn set_target(&mut self, target: AstralTarget) {
        if target != self.target {
            self.target = target;
            self.solution = None;
            tracing::info!(astral = %target, "astral target selected");
        }
    }

    pub fn solution(&self) -> Option<&PointingSolution> {
        self.solution.as_ref()
    }

    /// Run one fixed step.
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> FrameOutput {
        let mut events = Vec::new();
        let (latitude_echo, longitude_echo) = self.commit_viewer(input, &mut events);

        if input.cycle_target != 0 {
            self.set_target(self.target.cycle(input.cycle_target));
        }

        self.projection
            .set_aspect_ratio(input.viewport.x, input.viewport.y);
        let interaction = self.interaction_input(input);
        let machine_events =
            self.machine
                .update(&interaction, &self.globe, &self.terminal, &self.camera.state);
        for event in &machine_events {
            match event {
                InterfaceEvent::ViewerChanged(point) => {
                    self.viewer_entry = ViewerEntry::new(*point);
                }
                InterfaceEvent::Closed(_) => self.camera.state.up = Vec3::Y,
                _ => {}
            }
        }
        events.extend(machine_events);

        self.move_camera(input, dt);
        self.update_visuals(dt);

        if self.satellites.poll() {
            self.record_satellite();
        }
        self.planets.poll();
        let motor_steps = self.update_pointing();

        FrameOutput {
            globe_model: self.globe.model_matrix(),
            view: self.projection.view_matrix(&self.camera.state),
            projection: self.projection.projection_matrix(),
            terminal_model: self.terminal.model_matrix(),
            arrow_model: self.solution.map(|s| s.arrow_transform(self.arrow_source)),
            satellite_marker: self.trail.back().map(|&(p, h)| self.globe.world_point(p, h)),
            satellite_trail: self
                .trail
                .iter()
                .map(|&(p, h)| self.globe.world_point(p, h))
                .collect(),
            viewer_marker: self.marker_position(),
            events,
            cursor: self.machine.cursor(),
            phase: self.machine.phase(),
            viewer: self.machine.viewer(),
            latitude_echo,
            longitude_echo,
            heading_deg: holoscope_camera::compass_heading_deg(self.camera.state.yaw),
            motor_steps,
        }
    }

    fn commit_viewer(
        &mut self,
        input: &FrameInput,
        events: &mut Vec<InterfaceEvent>,
    ) -> (Option<String>, Option<String>) {
        let latitude = input
            .commit_latitude
            .and_then(|v| self.viewer_entry.commit_latitude(v));
        let longitude = input
            .commit_longitude
            .and_then(|v| self.viewer_entry.commit_longitude(v));
        if latitude.is_some() || longitude.is_some() {
            events.push(self.machine.set_viewer(self.viewer_entry.point()));
        }
        (
            latitude.and_then(|c| c.echo),
            longitude.and_then(|c| c.echo),
        )
    }

    fn interaction_input(&self, input: &FrameInput) -> InteractionInput {
        let camera = &self.camera.state;
        let viewport = input.viewport;
        InteractionInput {
            activate: input.activate,
            text_focused: input.text_focused,
            center_ray: self.projection.center_ray(camera),
            anchor_ray: self
                .projection
                .screen_ray(camera, viewport * self.anchor_screen, viewport),
            pointer_ray: self.projection.screen_ray(camera, input.pointer, viewport),
            pointer_held: input.pointer_held,
            pointer_released: input.pointer_released,
            press_duration: input.press_duration,
            pointer_delta: input.mouse_delta,
        }
    }

    fn move_camera(&mut self, input: &FrameInput, dt: f32) {
        if self.machine.is_active() {
            let targets = *self.machine.targets();
            self.camera.follow(
                targets.camera_position,
                targets.camera_target,
                targets.camera_up,
                self.machine.settings().lerp_rate,
                dt,
            );
            return;
        }
        let mut mouse_delta = input.mouse_delta;
        if self.invert_y {
            mouse_delta.y = -mouse_delta.y;
        }
        let camera_input = CameraInput {
            move_axes: input.move_axes,
            mouse_delta,
        };
        self.camera.update(&camera_input, &self.hub, dt);
    }

    fn update_visuals(&mut self, dt: f32) {
        let state = self.machine.state();
        let rate = self.machine.settings().lerp_rate;
        let targets = *self.machine.targets();
        self.globe.interface_active = state.active && state.mode == InteractionMode::Earth;
        self.globe.update(&targets, rate, dt);
        self.terminal.update(&targets, rate, dt);
    }

    fn marker_position(&self) -> Vec3 {
        self.globe
            .world_point(self.machine.viewer(), self.marker_offset)
    }

    fn record_satellite(&mut self) {
        let Some(fix) = self.satellites.latest() else {
            return;
        };
        let point = GeoPoint::new(fix.latitude, fix.longitude);
        let height = fix.relative_altitude(self.solver.hologram_radius);
        if self.trail.len() == SATELLITE_TRAIL_LEN {
            self.trail.pop_front();
        }
        self.trail.push_back((point, height));
    }

    /// Re-solve for the current target and return motor steps if the
    /// solution moved.
    fn update_pointing(&mut self) -> Vec<MotorStep> {
        let next = if self.target.is_satellite() {
            self.satellites.latest().map(|fix| {
                // The solution does not depend on how the hologram is
                // spinning, so solve in the resting frame.
                let frame = GlobeFrame::default();
                let viewer_dir = frame.geo_to_direction(self.machine.viewer());
                let basis = HorizonBasis::in_frame(viewer_dir, &frame);
                let satellite_dir =
                    frame.geo_to_direction(GeoPoint::new(fix.latitude, fix.longitude));
                self.solver.solve_satellite(
                    &basis,
                    satellite_dir,
                    fix.relative_altitude(self.solver.hologram_radius),
                )
            })
        } else {
            self.planets
                .latest()
                .filter(|fix| fix.target == self.target)
                .map(|fix| self.solver.solve_planet(fix.azimuth, fix.altitude))
        };

        let Some(next) = next else {
            return Vec::new();
        };
        if self.solution == Some(next) {
            return Vec::new();
        }
        self.solution = Some(next);
        next.motor_commands()
            .iter()
            .map(|command| MotorStep {
                command: *command,
                steps: self.motors.steps_for(command),
            })
            .collect()
    }
}

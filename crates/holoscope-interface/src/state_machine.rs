//! Which interface is open, and what opening and closing it does.
//!
//! The stored state is the `{mode, active, focused}` triple. The six-way
//! [`Phase`] is derived from it once per frame, using the interpolators'
//! convergence to tell "opening" from "open".

use glam::{Vec2, Vec3};
use holoscope_camera::CameraState;
use holoscope_coords::{GeoPoint, Ray, wrap_longitude_deg};
use holoscope_input::CursorMode;

use crate::globe::GlobeState;
use crate::interpolator::InterpolatorTargets;
use crate::terminal::TerminalState;

/// Which interface is in range (while closed) or open (while active).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    None,
    Earth,
    Terminal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub mode: InteractionMode,
    pub active: bool,
    /// Zoomed onto the viewer position. Only reachable from Earth.
    pub focused: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    OpeningEarth,
    OpenEarth,
    FocusedEarth,
    OpeningTerminal,
    OpenTerminal,
}

/// What the state machine reads each frame.
#[derive(Debug, Clone, Copy)]
pub struct InteractionInput {
    /// The toggle key went down this frame.
    pub activate: bool,
    /// A text entry field holds keyboard focus.
    pub text_focused: bool,
    /// Ray through the middle of the screen.
    pub center_ray: Ray,
    /// Ray through the Earth anchor pixel (a third across, halfway down).
    pub anchor_ray: Ray,
    /// Ray through the mouse pointer.
    pub pointer_ray: Ray,
    pub pointer_held: bool,
    /// The pointer button went up this frame.
    pub pointer_released: bool,
    /// Length of the press that just ended, in seconds.
    pub press_duration: f32,
    /// Pointer motion this frame, in pixels.
    pub pointer_delta: Vec2,
}

impl InteractionInput {
    /// No buttons, no motion, every ray along `ray`.
    pub fn idle(ray: Ray) -> Self {
        Self {
            activate: false,
            text_focused: false,
            center_ray: ray,
            anchor_ray: ray,
            pointer_ray: ray,
            pointer_held: false,
            pointer_released: false,
            press_duration: 0.0,
            pointer_delta: Vec2::ZERO,
        }
    }
}

/// Things that happened during a frame, for the GUI and window layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterfaceEvent {
    Opened(InteractionMode),
    Closed(InteractionMode),
    Focused(GeoPoint),
    Unfocused,
    ViewerChanged(GeoPoint),
    CursorModeChanged(CursorMode),
}

/// Distances, thresholds and rates for the interfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSettings {
    /// Shared easing rate for every interpolated value.
    pub lerp_rate: f32,
    /// How far along the anchor ray the opened globe sits.
    pub earth_anchor_distance: f32,
    /// How far along the centre ray the opened terminal sits.
    pub terminal_anchor_distance: f32,
    /// Camera distance from the globe centre while focused, in radii.
    pub focus_distance: f32,
    /// Presses shorter than this are clicks, in seconds.
    pub drag_threshold: f32,
    pub converge_epsilon: f32,
    /// Globe radians per pixel of drag.
    pub drag_sensitivity: f32,
    /// Globe drag pitch limit in radians.
    pub globe_pitch_limit: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            lerp_rate: 3.0,
            earth_anchor_distance: 2.5,
            terminal_anchor_distance: 1.0,
            focus_distance: 1.15,
            drag_threshold: 0.2,
            converge_epsilon: 0.1,
            drag_sensitivity: 0.005,
            globe_pitch_limit: 30f32.to_radians(),
        }
    }
}

/// Owns the interaction state and is the only writer of the interpolator
/// targets.
#[derive(Debug, Clone)]
pub struct InteractionStateMachine {
    state: InteractionState,
    phase: Phase,
    settings: InteractionSettings,
    targets: InterpolatorTargets,
    /// Targets at construction, used to send the globe and terminal home.
    rest: InterpolatorTargets,
    viewer: GeoPoint,
    cursor: CursorMode,
    backup_position: Vec3,
    backup_target: Vec3,
    close_pending: bool,
}

impl InteractionStateMachine {
    /// `targets` must describe the rest pose: the globe at its origin and
    /// the terminal at its rest centre and inclination.
    pub fn new(
        settings: InteractionSettings,
        targets: InterpolatorTargets,
        viewer: GeoPoint,
    ) -> Self {
        Self {
            state: InteractionState::default(),
            phase: Phase::Closed,
            settings,
            backup_position: targets.camera_position,
            backup_target: targets.camera_target,
            targets,
            rest: targets,
            viewer: viewer.wrapped(),
            cursor: CursorMode::Captured,
            close_pending: false,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Phase as of the last [`update`](Self::update).
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn targets(&self) -> &InterpolatorTargets {
        &self.targets
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn viewer(&self) -> GeoPoint {
        self.viewer
    }

    pub fn cursor(&self) -> CursorMode {
        self.cursor
    }

    /// Whether the camera should follow the targets instead of the mouse.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Replace the viewer position, e.g. from text entry. While focused the
    /// camera follows it on the next update.
    pub fn set_viewer(&mut self, point: GeoPoint) -> InterfaceEvent {
        self.viewer = point.wrapped();
        tracing::info!(
            latitude = self.viewer.latitude,
            longitude = self.viewer.longitude,
            "viewer position set"
        );
        InterfaceEvent::ViewerChanged(self.viewer)
    }

    /// Run one frame. `globe` and `terminal` are the visuals as displayed
    /// after last frame's update; `camera` is the camera as displayed now.
    pub fn update(
        &mut self,
        input: &InteractionInput,
        globe: &GlobeState,
        terminal: &TerminalState,
        camera: &CameraState,
    ) -> Vec<InterfaceEvent> {
        let mut events = Vec::new();
        self.phase = self.derive_phase(globe, terminal, camera);

        if !self.state.active {
            self.state.mode = proximity(&input.center_ray, globe, terminal);
            if input.activate && self.state.mode != InteractionMode::None {
                self.open(input, terminal, camera, &mut events);
            }
            return events;
        }

        if input.activate {
            self.request_close(input, &mut events);
        }
        if self.close_pending && self.camera_at_backup(camera) {
            self.close(&mut events);
            return events;
        }

        if self.state.mode == InteractionMode::Earth
            && matches!(self.phase, Phase::OpenEarth | Phase::FocusedEarth)
        {
            self.handle_pointer(input, globe, camera, &mut events);
        }

        if self.state.focused {
            let viewer_dir = globe.frame().geo_to_direction(self.viewer) * globe.radius;
            let center = globe.center.current;
            self.targets.camera_position = viewer_dir * self.settings.focus_distance + center;
            self.targets.camera_target = viewer_dir + center;
            self.targets.camera_up = globe.north_axis();
        }
        events
    }

    fn derive_phase(
        &self,
        globe: &GlobeState,
        terminal: &TerminalState,
        camera: &CameraState,
    ) -> Phase {
        let eps = self.settings.converge_epsilon;
        match (self.state.active, self.state.mode) {
            (false, _) | (true, InteractionMode::None) => Phase::Closed,
            (true, InteractionMode::Earth) if self.state.focused => Phase::FocusedEarth,
            (true, InteractionMode::Earth) => {
                let settled = globe.center.has_converged(eps)
                    && camera.position.distance(self.targets.camera_position) < eps;
                if settled {
                    Phase::OpenEarth
                } else {
                    Phase::OpeningEarth
                }
            }
            (true, InteractionMode::Terminal) => {
                if terminal.center.has_converged(eps) {
                    Phase::OpenTerminal
                } else {
                    Phase::OpeningTerminal
                }
            }
        }
    }

    fn open(
        &mut self,
        input: &InteractionInput,
        terminal: &TerminalState,
        camera: &CameraState,
        events: &mut Vec<InterfaceEvent>,
    ) {
        self.state.active = true;
        self.state.focused = false;
        self.close_pending = false;
        self.backup_position = camera.position;
        self.backup_target = camera.target;
        self.targets.camera_position = camera.position;
        self.targets.camera_target = camera.target;
        self.targets.camera_up = Vec3::Y;

        match self.state.mode {
            InteractionMode::Earth => {
                self.targets.globe_center = input.anchor_ray.at(self.settings.earth_anchor_distance);
                self.set_cursor(CursorMode::Free, events);
                self.phase = Phase::OpeningEarth;
            }
            InteractionMode::Terminal => {
                self.targets.terminal_center =
                    input.center_ray.at(self.settings.terminal_anchor_distance);
                self.targets.terminal_yaw = camera.pitch.to_degrees() + 90.0;
                // Take the equivalent angle nearest the current pitch so the
                // screen never spins the long way round.
                let raw_pitch = camera.yaw.to_degrees() + 90.0;
                let current = terminal.pitch.current;
                self.targets.terminal_pitch = current + wrap_longitude_deg(raw_pitch - current);
                self.phase = Phase::OpeningTerminal;
            }
            InteractionMode::None => {}
        }
        tracing::info!(mode = ?self.state.mode, "interface opened");
        events.push(InterfaceEvent::Opened(self.state.mode));
    }

    fn request_close(&mut self, input: &InteractionInput, events: &mut Vec<InterfaceEvent>) {
        // Leaving the focused view closes too, text focus or not. The close
        // lands once the camera is back at the backup.
        if self.state.focused {
            self.state.focused = false;
            self.close_pending = true;
            self.targets.camera_position = self.backup_position;
            self.targets.camera_target = self.backup_target;
            self.targets.camera_up = Vec3::Y;
            self.phase = Phase::OpenEarth;
            tracing::info!("globe unfocused, closing once the camera is back");
            events.push(InterfaceEvent::Unfocused);
            return;
        }
        if input.text_focused {
            tracing::debug!("close suppressed while a text field has focus");
            return;
        }
        match self.state.mode {
            InteractionMode::Earth => {
                self.close_pending = true;
            }
            InteractionMode::Terminal | InteractionMode::None => self.close(events),
        }
    }

    fn camera_at_backup(&self, camera: &CameraState) -> bool {
        camera.position.distance(self.backup_position) < self.settings.converge_epsilon
    }

    fn close(&mut self, events: &mut Vec<InterfaceEvent>) {
        let mode = self.state.mode;
        match mode {
            InteractionMode::Earth => {
                self.targets.globe_center = self.rest.globe_center;
                self.targets.globe_yaw = 0.0;
                self.targets.globe_pitch = 0.0;
            }
            InteractionMode::Terminal | InteractionMode::None => {
                self.targets.terminal_center = self.rest.terminal_center;
                self.targets.terminal_yaw = self.rest.terminal_yaw;
                self.targets.terminal_pitch = 0.0;
            }
        }
        self.state = InteractionState::default();
        self.close_pending = false;
        self.phase = Phase::Closed;
        self.set_cursor(CursorMode::Captured, events);
        tracing::info!(?mode, "interface closed");
        events.push(InterfaceEvent::Closed(mode));
    }

    fn handle_pointer(
        &mut self,
        input: &InteractionInput,
        globe: &GlobeState,
        camera: &CameraState,
        events: &mut Vec<InterfaceEvent>,
    ) {
        if input.pointer_held {
            let s = &self.settings;
            self.targets.globe_yaw += input.pointer_delta.x * s.drag_sensitivity;
            self.targets.globe_pitch = (self.targets.globe_pitch
                + input.pointer_delta.y * s.drag_sensitivity)
                .clamp(-s.globe_pitch_limit, s.globe_pitch_limit);
        }

        if !input.pointer_released || input.press_duration >= self.settings.drag_threshold {
            return;
        }
        let Some(point) = globe.pick(&input.pointer_ray) else {
            return;
        };
        self.viewer = point.wrapped();
        self.state.focused = true;
        self.close_pending = false;
        self.targets.camera_position = camera.position;
        self.targets.camera_up = globe.north_axis();
        self.phase = Phase::FocusedEarth;
        tracing::info!(
            latitude = self.viewer.latitude,
            longitude = self.viewer.longitude,
            "globe focused on picked point"
        );
        events.push(InterfaceEvent::Focused(self.viewer));
        events.push(InterfaceEvent::ViewerChanged(self.viewer));
    }

    fn set_cursor(&mut self, mode: CursorMode, events: &mut Vec<InterfaceEvent>) {
        if self.cursor != mode {
            self.cursor = mode;
            events.push(InterfaceEvent::CursorModeChanged(mode));
        }
    }
}

/// Which interface the centre of the screen is pointing at.
fn proximity(ray: &Ray, globe: &GlobeState, terminal: &TerminalState) -> InteractionMode {
    if globe.bounding_ray_hit(ray).is_some() {
        InteractionMode::Earth
    } else if terminal.screen_hit(ray).is_some() {
        InteractionMode::Terminal
    } else {
        InteractionMode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Vec3 = Vec3::new(-3.5, 2.0, 0.2);
    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        machine: InteractionStateMachine,
        globe: GlobeState,
        terminal: TerminalState,
        camera: CameraState,
    }

    impl Rig {
        fn new(look_at: Vec3) -> Self {
            let camera = CameraState::looking_at(Vec3::new(0.0, 2.0, 0.2), look_at);
            let globe = GlobeState::new(ORIGIN, 0.8);
            let terminal =
                TerminalState::new(Vec3::new(-10.1, 1.7, -0.16), 40.0, Vec2::new(0.45, 0.8));
            let targets = InterpolatorTargets::at_rest(
                camera.position,
                camera.target,
                globe.origin,
                terminal.rest_center,
                terminal.rest_yaw,
            );
            let machine = InteractionStateMachine::new(
                InteractionSettings::default(),
                targets,
                GeoPoint::new(46.94, 6.99),
            );
            Self {
                machine,
                globe,
                terminal,
                camera,
            }
        }

        fn input(&self) -> InteractionInput {
            InteractionInput::idle(Ray::new(self.camera.position, self.camera.forward()))
        }

        fn frame(&mut self, input: InteractionInput) -> Vec<InterfaceEvent> {
            let events = self
                .machine
                .update(&input, &self.globe, &self.terminal, &self.camera);
            self.globe.interface_active =
                self.machine.is_active() && self.machine.state().mode == InteractionMode::Earth;
            let rate = self.machine.settings().lerp_rate;
            let targets = *self.machine.targets();
            self.globe.update(&targets, rate, DT);
            self.terminal.update(&targets, rate, DT);
            if self.machine.is_active() {
                self.camera.position = self.camera.position.lerp(targets.camera_position, rate * DT);
                self.camera.target = self.camera.target.lerp(targets.camera_target, rate * DT);
            }
            events
        }

        fn settle(&mut self, frames: usize) {
            for _ in 0..frames {
                let input = self.input();
                self.frame(input);
            }
        }

        fn press_activate(&mut self, text_focused: bool) -> Vec<InterfaceEvent> {
            let mut input = self.input();
            input.activate = true;
            input.text_focused = text_focused;
            self.frame(input)
        }
    }

    #[test]
    fn test_proximity_sets_mode_without_opening() {
        let mut rig = Rig::new(ORIGIN);
        rig.settle(1);
        assert_eq!(rig.machine.state().mode, InteractionMode::Earth);
        assert!(!rig.machine.is_active());

        let mut away = Rig::new(Vec3::new(10.0, 2.0, 0.2));
        away.settle(1);
        assert_eq!(away.machine.state().mode, InteractionMode::None);
    }

    #[test]
    fn test_activate_with_proximity_opens_earth() {
        let mut rig = Rig::new(ORIGIN);
        let events = rig.press_activate(false);
        let s = rig.machine.state();
        assert_eq!(s.mode, InteractionMode::Earth);
        assert!(s.active);
        assert_eq!(rig.machine.phase(), Phase::OpeningEarth);
        assert!(events.contains(&InterfaceEvent::Opened(InteractionMode::Earth)));
        assert!(events.contains(&InterfaceEvent::CursorModeChanged(CursorMode::Free)));
    }

    #[test]
    fn test_text_focus_blocks_close_and_plain_activate_closes() {
        let mut rig = Rig::new(ORIGIN);
        rig.press_activate(false);

        rig.press_activate(true);
        assert!(rig.machine.is_active(), "text focus must suppress close");

        let events = rig.press_activate(false);
        assert!(!rig.machine.is_active());
        assert!(events.contains(&InterfaceEvent::Closed(InteractionMode::Earth)));
        assert_eq!(rig.machine.cursor(), CursorMode::Captured);
    }

    #[test]
    fn test_activate_without_proximity_does_nothing() {
        let mut rig = Rig::new(Vec3::new(10.0, 2.0, 0.2));
        let events = rig.press_activate(false);
        assert!(events.is_empty());
        assert!(!rig.machine.is_active());
    }

    #[test]
    fn test_opening_becomes_open_after_convergence() {
        let mut rig = Rig::new(ORIGIN);
        rig.press_activate(false);
        rig.settle(1);
        assert_eq!(rig.machine.phase(), Phase::OpeningEarth);
        rig.settle(240);
        assert_eq!(rig.machine.phase(), Phase::OpenEarth);
        let anchor_dist = rig.globe.center.current.distance(rig.camera.position);
        assert!((anchor_dist - 2.5).abs() < 0.15, "{anchor_dist}");
    }

    #[test]
    fn test_drag_turns_globe_and_clamps_pitch() {
        let mut rig = Rig::new(ORIGIN);
        rig.press_activate(false);
        rig.settle(240);
        let mut input = rig.input();
        input.pointer_held = true;
        input.pointer_delta = Vec2::new(100.0, 10_000.0);
        rig.frame(input);
        let t = rig.machine.targets();
        assert!((t.globe_yaw - 0.5).abs() < 1e-5);
        assert!((t.globe_pitch - 30f32.to_radians()).abs() < 1e-5);
    }

    fn open_and_click(rig: &mut Rig) -> Vec<InterfaceEvent> {
        rig.press_activate(false);
        rig.settle(240);
        let mut input = rig.input();
        input.pointer_ray = Ray::new(
            rig.camera.position,
            rig.globe.center.current - rig.camera.position,
        );
        input.pointer_released = true;
        input.press_duration = 0.05;
        rig.frame(input)
    }

    #[test]
    fn test_click_focuses_and_tracks_viewer() {
        let mut rig = Rig::new(ORIGIN);
        let events = open_and_click(&mut rig);
        assert!(rig.machine.state().focused);
        assert_eq!(rig.machine.phase(), Phase::FocusedEarth);
        assert!(events.iter().any(|e| matches!(e, InterfaceEvent::Focused(_))));

        rig.settle(1);
        let viewer = rig.machine.viewer();
        let dir = rig.globe.frame().geo_to_direction(viewer) * 0.8;
        let t = rig.machine.targets();
        let expected = dir * 1.15 + rig.globe.center.current;
        assert!(t.camera_position.distance(expected) < 1e-4);
        assert!(t.camera_target.distance(dir + rig.globe.center.current) < 1e-4);
        assert!(t.camera_up.distance(rig.globe.north_axis()) < 1e-5);
    }

    #[test]
    fn test_long_press_is_not_a_click() {
        let mut rig = Rig::new(ORIGIN);
        rig.press_activate(false);
        rig.settle(240);
        let mut input = rig.input();
        input.pointer_ray = Ray::new(
            rig.camera.position,
            rig.globe.center.current - rig.camera.position,
        );
        input.pointer_released = true;
        input.press_duration = 0.5;
        rig.frame(input);
        assert!(!rig.machine.state().focused);
    }

    #[test]
    fn test_focused_activate_unfocuses_even_with_text_focus() {
        let mut rig = Rig::new(ORIGIN);
        open_and_click(&mut rig);
        rig.settle(120);

        let events = rig.press_activate(true);
        assert!(events.contains(&InterfaceEvent::Unfocused));
        assert!(rig.machine.is_active());
        assert!(!rig.machine.state().focused);
    }

    #[test]
    fn test_close_waits_for_camera_return() {
        let mut rig = Rig::new(ORIGIN);
        open_and_click(&mut rig);
        rig.settle(120);
        let backup = Vec3::new(0.0, 2.0, 0.2);
        let events = rig.press_activate(false);
        assert!(events.contains(&InterfaceEvent::Unfocused));

        // Camera is still out at the focus point.
        assert!(rig.camera.position.distance(backup) > 0.1);
        assert!(rig.machine.is_active());
        rig.settle(1);
        assert!(rig.machine.is_active());

        rig.settle(300);
        assert!(!rig.machine.is_active());
        assert_eq!(rig.machine.targets().globe_center, ORIGIN);
    }

    #[test]
    fn test_single_activate_from_focus_closes() {
        for text_focused in [false, true] {
            let mut rig = Rig::new(ORIGIN);
            open_and_click(&mut rig);
            rig.settle(120);
            assert_eq!(rig.machine.phase(), Phase::FocusedEarth);

            let mut events = rig.press_activate(text_focused);
            for _ in 0..600 {
                let mut input = rig.input();
                input.text_focused = text_focused;
                events.extend(rig.frame(input));
            }
            assert!(!rig.machine.is_active(), "text_focused={text_focused}");
            assert_eq!(rig.machine.phase(), Phase::Closed);
            assert!(events.contains(&InterfaceEvent::Closed(InteractionMode::Earth)));
            assert_eq!(rig.machine.cursor(), CursorMode::Captured);
        }
    }

    #[test]
    fn test_terminal_open_and_close() {
        let terminal_center = Vec3::new(-10.1, 1.7, -0.16);
        let mut rig = Rig::new(terminal_center);
        rig.camera = CameraState::looking_at(Vec3::new(-7.0, 1.7, -0.16), terminal_center);
        rig.settle(1);
        assert_eq!(rig.machine.state().mode, InteractionMode::Terminal);

        let events = rig.press_activate(false);
        assert!(events.contains(&InterfaceEvent::Opened(InteractionMode::Terminal)));
        // The terminal keeps the cursor captured.
        assert_eq!(rig.machine.cursor(), CursorMode::Captured);
        let t = *rig.machine.targets();
        assert!((t.terminal_center.distance(rig.camera.position) - 1.0).abs() < 1e-4);
        assert!((t.terminal_yaw - (rig.camera.pitch.to_degrees() + 90.0)).abs() < 1e-3);

        rig.settle(240);
        assert_eq!(rig.machine.phase(), Phase::OpenTerminal);

        let events = rig.press_activate(false);
        assert!(events.contains(&InterfaceEvent::Closed(InteractionMode::Terminal)));
        let t = rig.machine.targets();
        assert_eq!(t.terminal_center, terminal_center);
        assert_eq!(t.terminal_yaw, 40.0);
        assert_eq!(t.terminal_pitch, 0.0);
    }

    #[test]
    fn test_set_viewer_wraps_and_moves_focus() {
        let mut rig = Rig::new(ORIGIN);
        open_and_click(&mut rig);
        let ev = rig.machine.set_viewer(GeoPoint::new(10.0, 200.0));
        assert_eq!(ev, InterfaceEvent::ViewerChanged(GeoPoint::new(10.0, -160.0)));
        rig.settle(1);
        let dir = rig.globe.frame().geo_to_direction(GeoPoint::new(10.0, -160.0)) * 0.8;
        let expected = dir + rig.globe.center.current;
        assert!(rig.machine.targets().camera_target.distance(expected) < 1e-4);
    }
}

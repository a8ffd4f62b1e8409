use glam::{Mat4, Vec3};

use crate::input::{InputState, Key, MouseButton, MouseDelta};

use super::CameraSource;

/// Camera orbiting a fixed target.
///
/// Dragging with the left button (or arrow keys / WASD) changes yaw and pitch;
/// the wheel and Q/E change the distance.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,

    /// Radians per raw mouse unit.
    pub sensitivity: f32,
    /// Radians per second while a rotate key is held.
    pub key_rate: f32,
    /// Distance change per wheel line.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    dragging: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.35,
            sensitivity: 0.005,
            key_rate: 1.5,
            zoom_step: 0.5,
            min_distance: 2.0,
            max_distance: 50.0,
            dragging: false,
        }
    }
}

impl OrbitCamera {
    const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, sp, -cp * cy)
    }

    fn rotate(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance - amount).clamp(self.min_distance, self.max_distance);
    }
}

impl CameraSource for OrbitCamera {
    fn poll(&mut self, input: &InputState, dt: f32) {
        self.dragging = input.button_down(MouseButton::Left);

        let axis = |neg: &[Key], pos: &[Key]| -> f32 {
            let held = |keys: &[Key]| keys.iter().any(|k| input.key_down(*k));
            (held(pos) as i32 - held(neg) as i32) as f32
        };

        let yaw = axis(&[Key::ArrowRight, Key::D], &[Key::ArrowLeft, Key::A]);
        let pitch = axis(&[Key::ArrowDown, Key::S], &[Key::ArrowUp, Key::W]);
        let zoom = axis(&[Key::Q], &[Key::E]);

        let step = self.key_rate * dt;
        self.rotate(yaw * step, pitch * step);
        self.zoom(zoom * self.zoom_step * 10.0 * dt);
    }

    fn apply_mouse_delta(&mut self, delta: MouseDelta) {
        if self.dragging {
            self.rotate(-delta.dx * self.sensitivity, delta.dy * self.sensitivity);
        }
        if delta.dz != 0.0 {
            self.zoom(delta.dz * self.zoom_step);
        }
    }

    fn view(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye(), self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, InputFrame, MouseButtonState};

    fn drag(dx: f32, dy: f32) -> MouseDelta {
        MouseDelta { dx, dy, dz: 0.0 }
    }

    fn left_button_held() -> InputState {
        let mut state = InputState::default();
        state.apply_event(
            &mut InputFrame::default(),
            &InputEvent::PointerButton {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
            },
        );
        state
    }

    #[test]
    fn target_lies_in_front_of_the_camera() {
        let cam = OrbitCamera::default();
        let p = cam.view().transform_point3(cam.target);
        assert!((p.z - cam.distance).abs() < 1e-4);
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
    }

    #[test]
    fn mouse_motion_needs_a_held_button() {
        let mut cam = OrbitCamera::default();
        let yaw = cam.yaw;

        cam.poll(&InputState::default(), 0.016);
        cam.apply_mouse_delta(drag(100.0, 0.0));
        assert_eq!(cam.yaw, yaw);

        cam.poll(&left_button_held(), 0.016);
        cam.apply_mouse_delta(drag(100.0, 0.0));
        assert_ne!(cam.yaw, yaw);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.poll(&left_button_held(), 0.0);
        cam.apply_mouse_delta(drag(0.0, 1.0e6));
        assert!(cam.pitch <= OrbitCamera::PITCH_LIMIT);
        assert!(cam.view().is_finite());
    }

    #[test]
    fn wheel_zoom_stays_in_range() {
        let mut cam = OrbitCamera::default();
        cam.apply_mouse_delta(MouseDelta { dx: 0.0, dy: 0.0, dz: 1.0e3 });
        assert_eq!(cam.distance, cam.min_distance);
        cam.apply_mouse_delta(MouseDelta { dx: 0.0, dy: 0.0, dz: -1.0e3 });
        assert_eq!(cam.distance, cam.max_distance);
    }

    #[test]
    fn held_arrow_key_orbits_over_time() {
        let mut cam = OrbitCamera::default();
        let mut state = InputState::default();
        state.keys_down.insert(Key::ArrowLeft);

        cam.poll(&state, 1.0);
        assert!((cam.yaw - cam.key_rate).abs() < 1e-6);
    }
}

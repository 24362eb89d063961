use crate::camera::Camera;

/// Pan units per unit of horizontal mouse drag in normalized device space.
pub const DRAG_PAN_SCALE: f32 = 20.0;

/// A discrete camera operation, decoupled from whatever input produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    Forward,
    Backward,
    Left,
    Right,
    /// Turn by the given number of pan units (negative turns left).
    Pan(f32),
    Reset,
}

impl CameraCommand {
    /// Map a key on the usual W/A/S/D + Q/E layout. Case-insensitive.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Self::Forward),
            's' => Some(Self::Backward),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            'q' => Some(Self::Pan(-1.0)),
            'e' => Some(Self::Pan(1.0)),
            'r' => Some(Self::Reset),
            _ => None,
        }
    }

    /// Pan command for a horizontal drag of `delta_x` in normalized device space.
    pub fn from_drag(delta_x: f32) -> Self {
        Self::Pan(delta_x * DRAG_PAN_SCALE)
    }

    pub fn apply(self, camera: &mut Camera) {
        match self {
            Self::Forward => camera.move_forward(),
            Self::Backward => camera.move_backward(),
            Self::Left => camera.move_left(),
            Self::Right => camera.move_right(),
            Self::Pan(amount) => camera.pan(amount),
            Self::Reset => camera.reset(),
        }
    }
}

/// Parse a key script such as `"wwqe"` into commands, skipping unknown keys.
pub fn parse_script(script: &str) -> Vec<CameraCommand> {
    script
        .chars()
        .filter_map(|key| {
            let command = CameraCommand::from_key(key);
            if command.is_none() && !key.is_whitespace() {
                tracing::debug!(%key, "unmapped camera key skipped");
            }
            command
        })
        .collect()
}

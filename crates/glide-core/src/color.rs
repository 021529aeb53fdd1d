use serde::{Deserialize, Serialize};

/// RGBA8. Serializes as a `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0, 255);

    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }

    /// Alpha scaled by a 0..=1 opacity, e.g. black at 20% for a scrim.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color(self.0, self.1, self.2, a)
    }

    pub fn opacity(self) -> f32 {
        self.3 as f32 / 255.0
    }
}

/// RGBA color with components in the `0.0..=1.0` range.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const BLUE: Color = Color(0.0, 0.0, 1.0, 1.0);
    pub const GRAY: Color = Color(0.533, 0.533, 0.533, 1.0);
    /// `#AA66CC`, the default expand action color.
    pub const PURPLE: Color = Color(0.667, 0.4, 0.8, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);

    /// Builds a color from a packed `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xff) as f32 / 255.0;
        let r = ((argb >> 16) & 0xff) as f32 / 255.0;
        let g = ((argb >> 8) & 0xff) as f32 / 255.0;
        let b = (argb & 0xff) as f32 / 255.0;
        Color(r, g, b, a)
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    /// Packs the color back into `0xAARRGGBB`.
    pub fn to_argb(&self) -> u32 {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.3) << 24) | (channel(self.0) << 16) | (channel(self.1) << 8) | channel(self.2)
    }
}

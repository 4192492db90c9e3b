use ribbon::{BackgroundMode, Face, Float, Ribbon, RibbonConfig, Segment, TintMode, Viewport};
use wasm_bindgen::prelude::*;

/// Floats per quad in [`RibbonDemo::quads`]: four corners, gradient angle, face.
const QUAD_STRIDE: usize = 10;

#[wasm_bindgen]
pub struct RibbonDemo {
    ribbon: Ribbon<f32>,
    tint: TintMode<f32>,
    background: BackgroundMode<f32>,
}

#[wasm_bindgen]
impl RibbonDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: u32) -> Result<RibbonDemo, JsError> {
        let config = RibbonConfig::new(Viewport::new(width, height)).with_seed(seed as u64);
        let ribbon = Ribbon::new(config).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(RibbonDemo {
            ribbon,
            tint: TintMode::ScrollHue,
            background: BackgroundMode::Complementary,
        })
    }

    pub fn update(&mut self) {
        self.ribbon.update();
    }

    /// Feed one wheel or touch delta into the ribbon.
    pub fn scroll(&mut self, amount: f32) {
        self.ribbon.scroll(amount);
    }

    /// Returns flat [x0, y0, .. x3, y3, angle, face] per segment in draw
    /// order; face is 1.0 for front, 0.0 for back.
    pub fn quads(&self) -> Vec<f32> {
        let mut drawn: Vec<Segment<f32>> = Vec::new();
        self.ribbon.render(&mut drawn);
        let mut out = Vec::with_capacity(drawn.len() * QUAD_STRIDE);
        for segment in &drawn {
            for corner in &segment.corners {
                out.push(corner.x());
                out.push(corner.y());
            }
            out.push(segment.gradient_angle);
            out.push(if segment.face == Face::Front { 1.0 } else { 0.0 });
        }
        out
    }

    /// Returns flat [x0, y0, x1, y1, ...] in window order
    pub fn positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.ribbon.len() * 2);
        for p in self.ribbon.positions() {
            out.push(p.x());
            out.push(p.y());
        }
        out
    }

    pub fn particle_count(&self) -> usize {
        self.ribbon.len()
    }

    pub fn phase(&self) -> bool {
        self.ribbon.phase()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.ribbon.scroll_offset().to_f32()
    }

    pub fn tint_hue(&self) -> f32 {
        self.tint.hue(self.ribbon.scroll_offset())
    }

    /// Background hue in degrees, or NaN when the background is transparent.
    pub fn background_hue(&self) -> f32 {
        self.background.hue(self.tint_hue()).unwrap_or(f32::NAN)
    }

    pub fn set_fixed_tint(&mut self, hue: f32) {
        self.tint = TintMode::Fixed { hue };
    }

    pub fn set_scroll_tint(&mut self) {
        self.tint = TintMode::ScrollHue;
    }

    pub fn set_transparent_background(&mut self) {
        self.background = BackgroundMode::Transparent;
    }
}

//! 2D vector value type with cached polar data.

use crate::float::Float;
use core::cell::Cell;
use core::fmt;
use core::ops::{Add, Sub, Neg};

/// Anything that can be broadcast into an `(x, y)` pair for vector arithmetic.
///
/// A single scalar applies to both axes, a pair applies per axis, and a
/// vector contributes its own components.
pub trait Operand<F: Float> {
    fn xy(self) -> (F, F);
}

impl Operand<f32> for f32 {
    fn xy(self) -> (f32, f32) { (self, self) }
}

impl Operand<f64> for f64 {
    fn xy(self) -> (f64, f64) { (self, self) }
}

impl<F: Float> Operand<F> for (F, F) {
    fn xy(self) -> (F, F) { self }
}

impl<F: Float> Operand<F> for Vector2<F> {
    fn xy(self) -> (F, F) { (self.x, self.y) }
}

impl<F: Float> Operand<F> for &Vector2<F> {
    fn xy(self) -> (F, F) { (self.x, self.y) }
}

#[derive(Copy, Clone, Debug, Default)]
struct Polar<F: Float> {
    length: F,
    unit_x: F,
    unit_y: F,
}

/// Immutable 2D vector.
///
/// Components are fixed at construction; every operation returns a new
/// value. Length and unit direction are computed on first use and cached
/// alongside the components, so a cached value always belongs to the
/// current `x`/`y`.
#[derive(Clone, Default)]
pub struct Vector2<F: Float> {
    x: F,
    y: F,
    polar: Cell<Option<Polar<F>>>,
}

impl<F: Float> Vector2<F> {
    pub fn new(x: F, y: F) -> Self {
        Vector2 { x, y, polar: Cell::new(None) }
    }

    pub fn zero() -> Self {
        Self::new(F::zero(), F::zero())
    }

    pub fn x(&self) -> F { self.x }
    pub fn y(&self) -> F { self.y }

    /// Same vector with a replaced x component.
    pub fn with_x(&self, x: F) -> Self { Self::new(x, self.y) }

    /// Same vector with a replaced y component.
    pub fn with_y(&self, y: F) -> Self { Self::new(self.x, y) }

    fn polar(&self) -> Polar<F> {
        if let Some(polar) = self.polar.get() {
            return polar;
        }
        let length = self.length_sq().sqrt();
        let polar = if length == F::zero() {
            Polar { length, unit_x: F::zero(), unit_y: F::zero() }
        } else {
            Polar { length, unit_x: self.x / length, unit_y: self.y / length }
        };
        self.polar.set(Some(polar));
        polar
    }

    pub fn length_sq(&self) -> F {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(&self) -> F {
        self.polar().length
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn unit(&self) -> Self {
        let p = self.polar();
        Self::new(p.unit_x, p.unit_y)
    }

    /// Perpendicular of the same magnitude: the unit vector rotated by 90
    /// degrees, `(-uy, ux)`, scaled back to the original length.
    pub fn normal(&self) -> Self {
        let p = self.polar();
        Self::new(-p.unit_y * p.length, p.unit_x * p.length)
    }

    /// Rotated unit vector, independent of the original length.
    pub fn unit_normal(&self) -> Self {
        let p = self.polar();
        Self::new(-p.unit_y, p.unit_x)
    }

    /// Screen-space angle: `atan2(-y, x)`.
    pub fn angle(&self) -> F {
        F::atan2(-self.y, self.x)
    }

    pub fn plus<O: Operand<F>>(&self, rhs: O) -> Self {
        let (x, y) = rhs.xy();
        Self::new(self.x + x, self.y + y)
    }

    pub fn minus<O: Operand<F>>(&self, rhs: O) -> Self {
        let (x, y) = rhs.xy();
        Self::new(self.x - x, self.y - y)
    }

    pub fn scale<O: Operand<F>>(&self, rhs: O) -> Self {
        let (x, y) = rhs.xy();
        Self::new(self.x * x, self.y * y)
    }

    pub fn negate(&self) -> Self {
        Self::new(-self.x, -self.y)
    }

    pub fn dot(&self, other: &Self) -> F {
        self.x * other.x + self.y * other.y
    }

    pub fn distance_to<O: Operand<F>>(&self, other: O) -> F {
        let (x, y) = other.xy();
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(&self, other: &Self, t: F) -> Self {
        Self::new(self.x.lerp(other.x, t), self.y.lerp(other.y, t))
    }

    /// Wrap into the rectangle `[min, max)` on each axis.
    pub fn wrap<A: Operand<F>, B: Operand<F>>(&self, min: A, max: B) -> Self {
        let (min_x, min_y) = min.xy();
        let (max_x, max_y) = max.xy();
        let range_x = max_x - min_x;
        let range_y = max_y - min_y;
        let dx = (self.x - min_x) / range_x;
        let dy = (self.y - min_y) / range_y;
        Self::new(
            (dx - dx.floor()) * range_x + min_x,
            (dy - dy.floor()) * range_y + min_y,
        )
    }
}

impl<F: Float> PartialEq for Vector2<F> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<F: Float> fmt::Debug for Vector2<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector2").field(&self.x).field(&self.y).finish()
    }
}

impl<F: Float> Add for Vector2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { self.plus(rhs) }
}

impl<F: Float> Sub for Vector2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { self.minus(rhs) }
}

impl<F: Float> Neg for Vector2<F> {
    type Output = Self;
    fn neg(self) -> Self { self.negate() }
}

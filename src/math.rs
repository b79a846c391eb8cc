//! In-place vector helpers.
//!
//! Callers building uniform values often want to mutate a vector in a chain
//! (`v.scale_by(2.0).negate_mut()`). [`Vec3Chain`] adds those operations to [`glam::Vec3`].

use glam::Vec3;

/// Chainable in-place operations on a [`Vec3`].
pub trait Vec3Chain {
    /// Multiplies every component by `factor`.
    fn scale_by(&mut self, factor: f32) -> &mut Self;
    fn negate_mut(&mut self) -> &mut Self;
    /// Replaces every component with its reciprocal.
    fn inverse_mut(&mut self) -> &mut Self;
    /// Component-wise multiplication by `other`.
    fn multiply_mut(&mut self, other: Vec3) -> &mut Self;
    /// Replaces `self` with `self × other`.
    fn cross_mut(&mut self, other: Vec3) -> &mut Self;
    /// Copies the three components of `other` into `self`.
    fn copy_from(&mut self, other: Vec3) -> &mut Self;
}

impl Vec3Chain for Vec3 {
    fn scale_by(&mut self, factor: f32) -> &mut Self {
        *self *= factor;
        self
    }

    fn negate_mut(&mut self) -> &mut Self {
        *self = -*self;
        self
    }

    fn inverse_mut(&mut self) -> &mut Self {
        *self = self.recip();
        self
    }

    fn multiply_mut(&mut self, other: Vec3) -> &mut Self {
        *self *= other;
        self
    }

    fn cross_mut(&mut self, other: Vec3) -> &mut Self {
        *self = self.cross(other);
        self
    }

    fn copy_from(&mut self, other: Vec3) -> &mut Self {
        *self = other;
        self
    }
}

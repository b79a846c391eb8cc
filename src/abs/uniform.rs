//! Uploading uniform values.
//!
//! The [`Uniform`] trait uploads a value to an already resolved uniform location, so callers of
//! [`LinkedProgram::set_uniform`](crate::LinkedProgram::set_uniform) never go back to the driver
//! to look a name up.

use glam::{IVec3, Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

use super::GraphicsContext;

/// Represents a value that can be uploaded to a uniform variable.
pub trait Uniform<C: GraphicsContext> {
    /// Uploads the value to `location` of the currently bound program.
    fn set_uniform(&self, ctx: &C, location: &C::UniformLocation);
}

impl Uniform<glow::Context> for bool {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_i32(Some(location), *self as i32);
        }
    }
}

impl Uniform<glow::Context> for f32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_f32(Some(location), *self);
        }
    }
}

impl Uniform<glow::Context> for i32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_i32(Some(location), *self);
        }
    }
}

impl Uniform<glow::Context> for Vec2 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_2_f32(Some(location), self.x, self.y);
        }
    }
}

impl Uniform<glow::Context> for Vec3 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_3_f32(Some(location), self.x, self.y, self.z);
        }
    }
}

impl Uniform<glow::Context> for IVec3 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_3_i32(Some(location), self.x, self.y, self.z);
        }
    }
}

impl Uniform<glow::Context> for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_4_f32(Some(location), self.x, self.y, self.z, self.w);
        }
    }
}

impl Uniform<glow::Context> for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref());
        }
    }
}

impl<const N: usize> Uniform<glow::Context> for [Vec3; N] {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        let mut data = Vec::with_capacity(N * 3);
        for vec in self.iter() {
            data.extend_from_slice(&vec.to_array());
        }
        unsafe {
            gl.uniform_3_f32_slice(Some(location), &data);
        }
    }
}

impl<C: GraphicsContext, T: Uniform<C>> Uniform<C> for &T {
    fn set_uniform(&self, ctx: &C, location: &C::UniformLocation) {
        (*self).set_uniform(ctx, location);
    }
}

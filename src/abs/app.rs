//! SDL2 and OpenGL context creation.
//!
//! This module defines the [`App`] struct which owns a hidden SDL2 window and the OpenGL context
//! made current on it. The program builder needs nothing more than that context.

use std::sync::Arc;

/// The [`App`] struct encapsulates the SDL2 window and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
}

impl App {
    /// Creates an OpenGL 3.3 core context on a hidden window with the given title.
    pub fn hidden(title: &str) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let video_subsystem = sdl.video()?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        let window = video_subsystem
            .window(title, 64, 64)
            .opengl()
            .hidden()
            .build()
            .map_err(|e| e.to_string())?;
        let gl_context = window.gl_create_context()?;
        window.gl_make_current(&gl_context)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let gl = Arc::new(gl);

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
        })
    }
}

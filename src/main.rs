use anyhow::Result;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{ffi::CString, num::NonZeroU32};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

use hello_triangle::{RenderConfig, RenderPipeline, StartupError, WindowConfig};

struct App {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    pipeline: RenderPipeline,
}

impl App {
    fn new(
        window_config: WindowConfig,
        render_config: RenderConfig,
    ) -> Result<(Self, EventLoop<()>)> {
        SimpleLogger::new().with_level(LevelFilter::Info).init()?;
        info!("Initializing application...");

        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(&window_config.title)
            .with_inner_size(LogicalSize::new(
                window_config.width,
                window_config.height,
            ));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|e| StartupError::WindowCreationFailed(e.to_string()))?;

        let window = window.ok_or_else(|| {
            StartupError::WindowCreationFailed("display builder produced no window".to_string())
        })?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                window_config.gl_major,
                window_config.gl_minor,
            ))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .map_err(|e| StartupError::WindowCreationFailed(e.to_string()))?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(|e| StartupError::WindowCreationFailed(e.to_string()))?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .map_err(|e| StartupError::WindowCreationFailed(e.to_string()))?;

        // Load OpenGL function pointers
        gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        });
        if !gl::CreateShader::is_loaded() || !gl::Clear::is_loaded() {
            return Err(StartupError::FunctionLoadingFailed(
                "driver did not provide core 3.3 entry points".to_string(),
            )
            .into());
        }

        let pipeline = RenderPipeline::new(&render_config).map_err(StartupError::from)?;

        let size = window.inner_size();
        pipeline.resize(size.width, size.height);
        info!("Window ready at {}x{}", size.width, size.height);

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                pipeline,
            },
            event_loop,
        ))
    }

    /// Reacts to one window event. Returns true when the event is a close
    /// signal, which ends the loop after the current iteration.
    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => true,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if is_quit_key(*physical_key) => {
                info!("Quit key pressed, closing");
                true
            }
            WindowEvent::Resized(size) => {
                if let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    self.gl_surface.resize(&self.gl_context, width, height);
                    self.pipeline.resize(size.width, size.height);
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.pipeline.draw_frame();
                if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
                    error!("Failed to swap buffers: {}", e);
                }
                false
            }
            _ => false,
        }
    }
}

fn is_quit_key(key: PhysicalKey) -> bool {
    matches!(key, PhysicalKey::Code(KeyCode::Escape))
}

fn main() -> Result<()> {
    let (mut app, event_loop) = App::new(WindowConfig::default(), RenderConfig::default())?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => {
            if app.handle_window_event(&event) {
                elwt.exit();
            }
        }
        Event::AboutToWait => {
            app.window.request_redraw();
        }
        _ => (),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_is_the_quit_key() {
        assert!(is_quit_key(PhysicalKey::Code(KeyCode::Escape)));
        assert!(!is_quit_key(PhysicalKey::Code(KeyCode::Space)));
        assert!(!is_quit_key(PhysicalKey::Code(KeyCode::Enter)));
    }
}

//! Oscillator Lab
//!
//! Interactive gravity pendulum and spring oscillator.
//!
//! Controls (when no text field has focus):
//! - S: Start
//! - Space: Pause/resume
//! - R: Reset
//! - Escape: Back to the oscillator chooser

use common::GraphicsContext;
use oscillators::viewer::App;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::ControlFlow,
    keyboard::PhysicalKey,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (ctx, event_loop) =
        pollster::block_on(GraphicsContext::new("Oscillator Lab - Rust/wgpu", 1280, 720))?;

    let mut app = App::new(ctx);
    let mut last_time = std::time::Instant::now();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, .. } => {
                let consumed = app.handle_window_event(event);

                if !consumed {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(size) => app.resize(*size),
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    physical_key: PhysicalKey::Code(key),
                                    state: ElementState::Pressed,
                                    repeat: false,
                                    ..
                                },
                            ..
                        } => app.handle_key(*key),
                        WindowEvent::RedrawRequested => {
                            let now = std::time::Instant::now();
                            let elapsed = now - last_time;
                            last_time = now;

                            app.update(elapsed);
                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    app.resize(app.ctx.size)
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    log::error!("GPU out of memory, exiting");
                                    elwt.exit();
                                }
                                Err(e) => log::warn!("render error: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.ctx.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}

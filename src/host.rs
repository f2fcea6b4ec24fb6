//! Window and GL context host.
//!
//! eframe owns the OS window, the GL context, buffer swapping and event
//! polling. This module configures the window, checks the context it is
//! handed, and forwards every frame to the [`FrameDriver`] through a paint
//! callback covering the whole window.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use eframe::{egui_glow, glow};
use egui::mutex::Mutex;
use glow::HasContext as _;

use crate::config::RenderConfig;
use crate::error::{StartupError, FATAL_EXIT_CODE};
use crate::frame_driver::{FrameDriver, RenderContext};
use crate::rotation::RotationClock;

/// Version reported by `GL_VERSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub embedded: bool,
}

impl GlVersion {
    /// Parses strings like "4.6 (Core Profile) Mesa 23.0" or
    /// "OpenGL ES 3.2 NVIDIA 535.54".
    pub fn parse(version: &str) -> Option<Self> {
        let trimmed = version.trim();
        let (embedded, rest) = match trimmed.strip_prefix("OpenGL ES") {
            Some(rest) => (true, rest.trim_start_matches(|c: char| c == '-' || c.is_ascii_alphabetic())),
            None => (false, trimmed),
        };
        let number = rest.split_whitespace().next()?;
        let mut parts = number.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts
            .next()?
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect::<String>()
            .parse()
            .ok()?;
        return Some(Self { major, minor, embedded });
    }

    /// Desktop GL at or above `required`.
    pub fn supports(&self, required: (u32, u32)) -> bool {
        !self.embedded && (self.major, self.minor) >= required
    }
}

pub fn native_options(config: &RenderConfig) -> eframe::NativeOptions {
    return eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(config.width, config.height)),
        resizable: true,
        vsync: true,
        ..Default::default()
    };
}

fn check_context(gl: &glow::Context, required: (u32, u32)) -> Result<(), StartupError> {
    let reported = unsafe { gl.get_parameter_string(glow::VERSION) };
    match GlVersion::parse(&reported) {
        Some(version) if version.supports(required) => {
            log::info!("OpenGL context: {}", reported);
            Ok(())
        }
        _ => Err(StartupError::UnsupportedGl {
            found: reported,
            required_major: required.0,
            required_minor: required.1,
        }),
    }
}

struct TriangleApp {
    driver: Arc<Mutex<FrameDriver>>,
}

impl TriangleApp {
    fn new(cc: &eframe::CreationContext<'_>, config: &RenderConfig) -> Result<Self, StartupError> {
        let gl = cc.gl.to_owned().ok_or(StartupError::MissingGlContext)?;
        check_context(&gl, config.required_gl_version)?;
        let context = RenderContext::new(gl, config)?;
        let driver = FrameDriver::new(context, RotationClock::start_now());
        return Ok(Self { driver: Arc::new(Mutex::new(driver)) });
    }
}

impl eframe::App for TriangleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (rect, _response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
                let driver = self.driver.clone();
                let cb = egui_glow::CallbackFn::new(move |info, _painter| {
                    driver.lock().frame(info.screen_size_px);
                });
                ui.painter().add(egui::PaintCallback {
                    rect,
                    callback: Arc::new(cb),
                });
            });
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.driver.lock().close();
        log::info!("window closed");
    }
}

fn fatal(err: &dyn std::fmt::Display) -> ! {
    log::error!("{}", err);
    std::process::exit(FATAL_EXIT_CODE);
}

/// Opens the window and renders until it is closed.
pub fn run(config: RenderConfig) {
    let options = native_options(&config);
    let title = config.title.clone();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| match TriangleApp::new(cc, &config) {
                Ok(app) => Box::new(app) as Box<dyn eframe::App>,
                Err(err) => fatal(&err),
            }),
        )
    }));
    if let Err(message) = windowing_outcome(outcome) {
        fatal(&message);
    }
}

/// eframe panics rather than returning errors, both while creating the
/// window and inside its event loop, so the message does not guess which.
fn windowing_outcome(outcome: std::thread::Result<()>) -> Result<(), String> {
    let payload = match outcome {
        Ok(()) => return Ok(()),
        Err(payload) => payload,
    };
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    return Err(format!("windowing failed: {}", detail));
}

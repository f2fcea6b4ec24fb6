use eframe::glow;
use glow::HasContext as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// A viewport over the whole framebuffer, anchored at (0, 0).
    pub fn covering(width: u32, height: u32) -> Self {
        return Self {
            x: 0,
            y: 0,
            width: width as i32,
            height: height as i32,
        };
    }

    pub fn apply(&self, gl: &glow::Context) {
        unsafe {
            gl.viewport(self.x, self.y, self.width, self.height);
        }
    }
}

/// Remembers the last framebuffer size so size changes can be treated as
/// resize notifications.
#[derive(Debug, Default)]
pub struct ViewportTracker {
    current: Option<Viewport>,
}

impl ViewportTracker {
    /// Records the framebuffer size. Returns the new viewport when the size
    /// differs from the previous observation.
    pub fn observe(&mut self, width: u32, height: u32) -> Option<Viewport> {
        let viewport = Viewport::covering(width, height);
        if self.current == Some(viewport) {
            return None;
        }
        self.current = Some(viewport);
        return Some(viewport);
    }

    pub fn current(&self) -> Option<Viewport> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_covers_whole_client_area() {
        let mut tracker = ViewportTracker::default();
        assert_eq!(
            tracker.observe(1024, 768),
            Some(Viewport { x: 0, y: 0, width: 1024, height: 768 })
        );
    }

    #[test]
    fn same_size_is_not_a_resize() {
        let mut tracker = ViewportTracker::default();
        tracker.observe(800, 600);
        assert_eq!(tracker.observe(800, 600), None);
        assert_eq!(tracker.current(), Some(Viewport::covering(800, 600)));
    }

    #[test]
    fn every_new_size_is_reported() {
        let mut tracker = ViewportTracker::default();
        tracker.observe(800, 600);
        assert_eq!(tracker.observe(640, 480), Some(Viewport::covering(640, 480)));
        assert_eq!(tracker.observe(800, 600), Some(Viewport::covering(800, 600)));
    }

    #[test]
    fn zero_sized_window_is_allowed() {
        assert_eq!(Viewport::covering(0, 0), Viewport { x: 0, y: 0, width: 0, height: 0 });
    }
}

//! Pointer capture for the lifetime of a gesture.
//!
//! While a box is being drawn or dragged, pointer moves and releases must be
//! delivered even when the pointer leaves the page area. Hosts implement
//! [`PointerCapture`] by installing window-level listeners on `acquire` and
//! removing them on `release`. The controller pairs every `acquire` with
//! exactly one `release`: on pointer-up, on cancellation, and when the
//! controller is dropped.

/// Host hook for routing pointer events to the controller during a gesture.
pub trait PointerCapture {
    /// Start delivering pointer moves/releases from anywhere in the window.
    fn acquire(&mut self);
    /// Stop delivering them.
    fn release(&mut self);
}

/// Capture that does nothing, for hosts that always route events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

impl<C: PointerCapture + ?Sized> PointerCapture for Box<C> {
    fn acquire(&mut self) {
        (**self).acquire();
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// Tracks whether the capture is currently held so release happens once.
#[derive(Debug)]
pub(crate) struct CaptureGuard<C: PointerCapture> {
    capture: C,
    held: bool,
}

impl<C: PointerCapture> CaptureGuard<C> {
    pub(crate) fn new(capture: C) -> Self {
        Self {
            capture,
            held: false,
        }
    }

    pub(crate) fn acquire(&mut self) {
        if !self.held {
            self.capture.acquire();
            self.held = true;
        }
    }

    pub(crate) fn release(&mut self) {
        if self.held {
            self.capture.release();
            self.held = false;
        }
    }

    pub(crate) fn is_held(&self) -> bool {
        self.held
    }
}

impl<C: PointerCapture> Drop for CaptureGuard<C> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts acquire/release calls through a shared handle.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct CountingCapture {
        pub(crate) acquired: Rc<Cell<u32>>,
        pub(crate) released: Rc<Cell<u32>>,
    }

    impl PointerCapture for CountingCapture {
        fn acquire(&mut self) {
            self.acquired.set(self.acquired.get() + 1);
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    #[test]
    fn test_guard_pairs_calls() {
        let counter = CountingCapture::default();
        let mut guard = CaptureGuard::new(counter.clone());
        guard.acquire();
        guard.acquire();
        assert!(guard.is_held());
        guard.release();
        guard.release();
        assert_eq!(counter.acquired.get(), 1);
        assert_eq!(counter.released.get(), 1);
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let counter = CountingCapture::default();
        {
            let mut guard = CaptureGuard::new(counter.clone());
            guard.acquire();
        }
        assert_eq!(counter.released.get(), 1);
    }
}

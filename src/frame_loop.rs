//! Self-rescheduling per-frame task bound to a component's mounted lifetime.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Something that can run a callback on the next display frame.
///
/// Dropping the returned `Frame` must cancel the pending callback.
pub trait FrameScheduler: 'static {
    type Frame: 'static;

    fn request(&self, callback: Box<dyn FnOnce(f64)>) -> Self::Frame;
}

struct LoopInner<S: FrameScheduler> {
    scheduler: S,
    pending: RefCell<Option<S::Frame>>,
    running: Cell<bool>,
    step: RefCell<Box<dyn FnMut(f64)>>,
}

/// Handle for a running loop. The loop stops when this is dropped.
pub struct FrameLoop<S: FrameScheduler> {
    inner: Rc<LoopInner<S>>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn start(scheduler: S, step: impl FnMut(f64) + 'static) -> Self {
        let inner = Rc::new(LoopInner {
            scheduler,
            pending: RefCell::new(None),
            running: Cell::new(true),
            step: RefCell::new(Box::new(step)),
        });
        schedule_next(&inner);
        Self { inner }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    pub fn stop(&self) {
        self.inner.running.set(false);
        self.inner.pending.borrow_mut().take();
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_next<S: FrameScheduler>(inner: &Rc<LoopInner<S>>) {
    let weak: Weak<LoopInner<S>> = Rc::downgrade(inner);
    let frame = inner.scheduler.request(Box::new(move |timestamp| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        // Release the handle of the frame that just fired before requesting
        // the next one.
        inner.pending.borrow_mut().take();
        if !inner.running.get() {
            return;
        }
        {
            let mut step = inner.step.borrow_mut();
            (*step)(timestamp);
        }
        if inner.running.get() {
            schedule_next(&inner);
        }
    }));
    *inner.pending.borrow_mut() = Some(frame);
}


#[cfg(test)]
mod tests {
    use super::manual::ManualScheduler;
    use super::*;

    #[test]
    fn step_runs_once_per_frame_and_reschedules() {
        let scheduler = ManualScheduler::default();
        let steps = Rc::new(Cell::new(0));
        let counter = steps.clone();
        let frame_loop = FrameLoop::start(scheduler.clone(), move |_| counter.set(counter.get() + 1));

        for frame in 1..=5 {
            assert_eq!(scheduler.advance(frame as f64 * 16.0), 1);
        }

        assert_eq!(steps.get(), 5);
        assert!(frame_loop.is_running());
    }

    #[test]
    fn dropping_the_loop_cancels_the_pending_frame() {
        let scheduler = ManualScheduler::default();
        let steps = Rc::new(Cell::new(0));
        let counter = steps.clone();
        let frame_loop = FrameLoop::start(scheduler.clone(), move |_| counter.set(counter.get() + 1));

        scheduler.advance(16.0);
        drop(frame_loop);

        assert_eq!(scheduler.advance(32.0), 0);
        assert_eq!(scheduler.advance(48.0), 0);
        assert_eq!(steps.get(), 1);
    }

    #[test]
    fn no_surface_mutation_after_unmount() {
        use crate::config::MosaicConfig;
        use crate::mosaic::recording::RecordingSurface;
        use crate::mosaic::{Mosaic, Square};
        use crate::pointer::PointerCell;
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let scheduler = ManualScheduler::default();
        let surface = Rc::new(RefCell::new(RecordingSurface::default()));
        let mut mosaic = Mosaic::new(MosaicConfig::default(), SmallRng::seed_from_u64(11));
        mosaic.insert(Square {
            x: 0.0,
            y: 0.0,
            opacity: 0.5,
            life: 1.0,
            decay: 0.01,
        });
        let mosaic = Rc::new(RefCell::new(mosaic));

        let frame_loop = {
            let surface = surface.clone();
            let mosaic = mosaic.clone();
            FrameLoop::start(scheduler.clone(), move |_| {
                mosaic
                    .borrow_mut()
                    .tick(&PointerCell::default(), &mut *surface.borrow_mut());
            })
        };

        scheduler.advance(16.0);
        scheduler.advance(32.0);
        assert_eq!(surface.borrow().clears, 2);
        let painted = surface.borrow().fills.clone();
        assert_eq!(painted.len(), 1);

        drop(frame_loop);
        for frame in 3..10 {
            scheduler.advance(f64::from(frame) * 16.0);
        }

        assert_eq!(surface.borrow().clears, 2);
        assert_eq!(surface.borrow().fills, painted);
        assert_eq!(mosaic.borrow().squares()[0].life, 1.0 - 0.01 - 0.01);
    }

    #[test]
    fn stop_inside_step_prevents_rescheduling() {
        let scheduler = ManualScheduler::default();
        let handle: Rc<RefCell<Option<FrameLoop<ManualScheduler>>>> = Rc::new(RefCell::new(None));
        let steps = Rc::new(Cell::new(0));

        let frame_loop = {
            let handle = handle.clone();
            let steps = steps.clone();
            FrameLoop::start(scheduler.clone(), move |_| {
                steps.set(steps.get() + 1);
                if steps.get() == 2 {
                    if let Some(frame_loop) = handle.borrow().as_ref() {
                        frame_loop.stop();
                    }
                }
            })
        };
        *handle.borrow_mut() = Some(frame_loop);

        scheduler.advance(16.0);
        scheduler.advance(32.0);
        assert_eq!(scheduler.advance(48.0), 0);
        assert_eq!(steps.get(), 2);
    }
}

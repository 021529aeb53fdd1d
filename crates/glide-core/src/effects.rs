use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl std::fmt::Debug for Dispose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Dispose").field(&!self.is_spent()).finish()
    }
}

/// Helper to build a cancellation handle.
pub fn on_cancel(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

/// Cancellation handles for work bound to a screen being in the foreground.
///
/// `clear_all` runs every handle once and empties the holder.
#[derive(Default, Debug)]
pub struct TaskHolder {
    tasks: SmallVec<[Dispose; 4]>,
}

impl TaskHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Dispose) -> Dispose {
        self.tasks.push(task.clone());
        task
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear_all(&mut self) {
        let n = self.tasks.len();
        for task in self.tasks.drain(..) {
            task.run();
        }
        if n > 0 {
            log::trace!("cancelled {n} foreground task(s)");
        }
    }
}

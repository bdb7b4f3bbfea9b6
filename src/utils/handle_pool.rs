use std::borrow::Borrow;

use super::handle::{Handle, HandleIndex};

/// `HandlePool` hands out `Handle`s with continuous indices, recycling the
/// index of a freed handle with a bumped version.
#[derive(Debug, Default)]
pub struct HandlePool {
    versions: Vec<HandleIndex>,
    frees: Vec<HandleIndex>,
}

impl HandlePool {
    pub fn new() -> HandlePool {
        HandlePool::default()
    }

    /// Creates a unused `Handle`.
    pub fn create<H: From<Handle>>(&mut self) -> H {
        let handle = if let Some(index) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version += 1;
            Handle::new(index, *version)
        } else {
            self.versions.push(1);
            Handle::new(self.versions.len() as HandleIndex - 1, 1)
        };

        handle.into()
    }

    /// Returns true if this `Handle` was created by `HandlePool`, and has not been
    /// freed yet.
    pub fn contains<H: Borrow<Handle>>(&self, handle: H) -> bool {
        let handle = handle.borrow();
        self.versions
            .get(handle.index() as usize)
            .map(|&v| v == handle.version() && v & 0x1 == 1)
            .unwrap_or(false)
    }

    /// Recycles the `Handle`. Returns false if it was not alive.
    pub fn free<H: Borrow<Handle>>(&mut self, handle: H) -> bool {
        let handle = *handle.borrow();
        if !self.contains(handle) {
            return false;
        }

        self.versions[handle.index() as usize] += 1;
        self.frees.push(handle.index());
        true
    }

    /// Returns the number of alive handles.
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

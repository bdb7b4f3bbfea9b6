use std::borrow::Borrow;

use super::handle::Handle;

/// Sparse storage indexed by `Handle`, used by backends to keep the real
/// context objects behind the opaque handles they hand out.
#[derive(Debug)]
pub struct DataVec<T> {
    buf: Vec<Option<T>>,
    versions: Vec<u32>,
}

impl<T> Default for DataVec<T> {
    fn default() -> Self {
        DataVec {
            buf: Vec::new(),
            versions: Vec::new(),
        }
    }
}

impl<T> DataVec<T> {
    pub fn new() -> Self {
        DataVec::default()
    }

    pub fn get<H>(&self, handle: H) -> Option<&T>
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        match self.versions.get(index) {
            Some(&v) if v == handle.version() => self.buf[index].as_ref(),
            _ => None,
        }
    }

    pub fn get_mut<H>(&mut self, handle: H) -> Option<&mut T>
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        match self.versions.get(index) {
            Some(&v) if v == handle.version() => self.buf[index].as_mut(),
            _ => None,
        }
    }

    pub fn create<H>(&mut self, handle: H, value: T)
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;

        while self.buf.len() <= index {
            self.buf.push(None);
            self.versions.push(0);
        }

        self.buf[index] = Some(value);
        self.versions[index] = handle.version();
    }

    pub fn free<H>(&mut self, handle: H) -> Option<T>
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        match self.versions.get(index) {
            Some(&v) if v == handle.version() => self.buf[index].take(),
            _ => None,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.buf.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stale_handle() {
        let mut data = DataVec::new();
        let h1 = Handle::new(2, 1);
        data.create(h1, "program");
        assert_eq!(data.get(h1), Some(&"program"));
        assert_eq!(data.len(), 1);

        let stale = Handle::new(2, 3);
        assert_eq!(data.get(stale), None);
        assert_eq!(data.free(stale), None);

        assert_eq!(data.free(h1), Some("program"));
        assert_eq!(data.get(h1), None);
        assert!(data.is_empty());
    }
}

use std::time::Duration;

/// A measurement of a monotonically nondecreasing clock, in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    #[inline]
    pub fn from_millis(millis: u64) -> Timestamp {
        Timestamp(millis)
    }

    #[inline]
    pub fn now() -> Timestamp {
        crate::application::sys::timestamp()
    }

    #[inline]
    pub fn elapsed(self) -> Duration {
        crate::application::sys::timestamp() - self
    }

    #[inline]
    pub fn millis(self) -> u64 {
        self.0
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        Duration::from_millis(self.0.saturating_sub(rhs.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sub_saturates() {
        let a = Timestamp::from_millis(100);
        let b = Timestamp::from_millis(250);
        assert_eq!(b - a, Duration::from_millis(150));
        assert_eq!(a - b, Duration::from_millis(0));
    }
}

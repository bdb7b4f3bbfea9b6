use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::errors::*;
use crate::utils::time::Timestamp;

pub fn timestamp() -> Timestamp {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0));

    let ms = u64::from(duration.subsec_millis()) + duration.as_secs() * 1000;
    Timestamp::from_millis(ms)
}

pub(crate) fn init() {}

/// Calls `advance` every `interval` on the current thread until it returns
/// false. Blocks until then.
pub(crate) fn run_forever<F>(interval: Duration, mut advance: F) -> Result<()>
where
    F: FnMut() -> Result<bool> + 'static,
{
    loop {
        std::thread::sleep(interval);
        if !advance()? {
            return Ok(());
        }
    }
}

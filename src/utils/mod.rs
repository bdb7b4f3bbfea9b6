//! Commonly used utilities like handles, colors and time.

#[macro_use]
pub mod handle;
pub mod color;
pub mod data_vec;
pub mod handle_pool;
pub mod time;

pub mod prelude {
    pub use super::color::{Color, Rgba, DEFAULT_COLOR_ALPHA};
    pub use super::data_vec::DataVec;
    pub use super::handle::{Handle, HandleIndex};
    pub use super::handle_pool::HandlePool;
    pub use super::time::Timestamp;
}

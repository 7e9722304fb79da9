pub mod clock;
pub mod config;
pub mod session;

pub use clock::*;
pub use config::*;
pub use session::*;

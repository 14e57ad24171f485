pub mod heartbeat;
pub mod process;
pub mod productivity_type;
pub mod window;

pub use heartbeat::Heartbeat;
pub use process::{Process, ProcessUsage};
pub use productivity_type::ProductivityType;
pub use window::{Window, WindowUsage};

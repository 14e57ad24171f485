pub mod heartbeats;
pub mod processes;
pub mod productivity_types;
pub mod usage;
pub mod windows;

pub use heartbeats::{HeartbeatRepository, HeartbeatWrite};
pub use processes::ProcessRepository;
pub use productivity_types::{ProductivityTypeRepository, TypeAssignment};
pub use usage::UsageRepository;
pub use windows::WindowRepository;

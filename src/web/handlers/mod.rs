pub mod export_handlers;
pub mod generation_handlers;
pub mod helpers;
pub mod resume_handlers;
pub mod system_handlers;

pub use export_handlers::*;
pub use generation_handlers::*;
pub use resume_handlers::*;
pub use system_handlers::*;

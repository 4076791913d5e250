pub mod common;
pub mod container;
pub mod error;
pub mod logging;
pub mod scaffold;
pub mod token;
pub mod topics;

pub use container::{handle_create, handle_start};
pub use logging::init_logging;
pub use scaffold::{handle_config, handle_consumer, handle_producer};
pub use token::handle_make_token;
pub use topics::{handle_migrate, handle_topics};

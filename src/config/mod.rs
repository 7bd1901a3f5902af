pub mod credentials;
pub mod entities;
pub mod parser;
pub mod schema;
pub mod types;

pub use types::*;
pub use parser::{is_valid_hostname, parse_config};
pub use entities::default_entities;

pub mod entity;
pub mod finding;
pub mod remediation;
pub mod risk;
pub mod score;

pub use entity::*;
pub use finding::*;
pub use remediation::*;
pub use risk::*;
pub use score::*;

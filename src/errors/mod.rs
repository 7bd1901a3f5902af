pub mod types;
pub mod classification;

pub use types::MuniError;
pub use classification::ErrorClassification;

pub mod digest;
pub mod engine;
pub mod issuer;

pub use digest::format_digest;
pub use engine::AlertEngine;
pub use issuer::IssuerRecord;

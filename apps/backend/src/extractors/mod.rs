pub mod authorized;
pub mod json_body;

pub use authorized::{AuthOutcome, Authorized};
pub use json_body::{read_json, BodyError};

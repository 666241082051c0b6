pub mod error;
pub mod mtl;
pub mod obj;
pub mod pipeline;
pub mod registry;
pub mod request;
pub mod source;

pub mod entity;
pub mod material;
pub mod mesh;
pub mod transform;

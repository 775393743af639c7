pub mod location;
pub mod resources;

pub mod error;
pub use error::LookupError;

pub mod location;
pub use location::LocationService;

pub mod resources;
pub use resources::{
    Meetups, Movies, ResourceKind, ResourceRequest, ResourceService, Shops, Trails, Weathers,
};

pub use super::locations::Entity as Locations;
pub use super::meetups::Entity as Meetups;
pub use super::movies::Entity as Movies;
pub use super::shops::Entity as Shops;
pub use super::weathers::Entity as Weathers;

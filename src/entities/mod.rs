pub mod prelude;

pub mod locations;
pub mod meetups;
pub mod movies;
pub mod shops;
pub mod weathers;

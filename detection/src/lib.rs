pub mod analysis;
pub mod catalog;
pub mod currency;
pub mod executable_utils;
pub mod matcher;
pub mod model;

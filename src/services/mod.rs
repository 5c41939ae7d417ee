pub mod catalog_service;
pub mod cart_service;

pub use catalog_service::*;
pub use cart_service::*;

pub mod ask;
pub mod catalog;
pub mod endpoint;
pub mod resources;
pub mod utils;

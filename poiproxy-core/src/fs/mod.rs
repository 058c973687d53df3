pub mod resources;

pub use resources::ResourceScanner;

pub mod descriptor;
pub mod param;

pub use descriptor::{FeatureType, RequestType, ServiceDescriptor};
pub use param::Param;

pub mod resource;

pub use resource::{
    ExtGStateParams, RegisteredResource, Resource, ResourceError, ResourceKind, ResourcePayload,
    ResourceRegistry, SharedResourceData, TilingPattern,
};

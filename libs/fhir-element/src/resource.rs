//! Resources and the owned polymorphic resource handle

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::element::Composite;

/// A top-level element identified on the wire by its `resourceType`.
pub trait Resource: Composite {
    fn resource_type(&self) -> &'static str {
        self.type_descriptor().name
    }

    fn as_composite(&self) -> &dyn Composite;

    fn as_composite_mut(&mut self) -> &mut dyn Composite;

    fn clone_resource(&self) -> Box<dyn Resource>;

    fn eq_resource(&self, other: &dyn Resource) -> bool;
}

/// An owned resource of any type, as held by `contained` and
/// `Bundle.entry.resource`.
pub struct AnyResource(Box<dyn Resource>);

impl AnyResource {
    pub fn new<R: Resource>(resource: R) -> Self {
        AnyResource(Box::new(resource))
    }

    pub fn from_box(resource: Box<dyn Resource>) -> Self {
        AnyResource(resource)
    }

    pub fn downcast_ref<R: Resource>(&self) -> Option<&R> {
        self.0.as_any().downcast_ref::<R>()
    }

    pub fn downcast_mut<R: Resource>(&mut self) -> Option<&mut R> {
        self.0.as_any_mut().downcast_mut::<R>()
    }

    pub fn is<R: Resource>(&self) -> bool {
        self.0.as_any().is::<R>()
    }

    pub fn into_inner(self) -> Box<dyn Resource> {
        self.0
    }
}

impl Clone for AnyResource {
    fn clone(&self) -> Self {
        AnyResource(self.0.clone_resource())
    }
}

impl PartialEq for AnyResource {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_resource(other.0.as_ref())
    }
}

impl fmt::Debug for AnyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Deref for AnyResource {
    type Target = dyn Resource;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for AnyResource {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl<R: Resource> From<R> for AnyResource {
    fn from(resource: R) -> Self {
        AnyResource::new(resource)
    }
}

/// Storage for embedded resources: `Vec<AnyResource>` for `contained`,
/// `Option<AnyResource>` for a single embedded resource.
pub trait ResourceSlot {
    fn resources(&self) -> Vec<&dyn Resource>;

    fn is_repeating(&self) -> bool;

    /// Store a decoded resource. Returns `false` when a single slot is
    /// already occupied.
    fn insert(&mut self, resource: AnyResource) -> bool;
}

impl ResourceSlot for Vec<AnyResource> {
    fn resources(&self) -> Vec<&dyn Resource> {
        self.iter().map(|resource| &**resource).collect()
    }

    fn is_repeating(&self) -> bool {
        true
    }

    fn insert(&mut self, resource: AnyResource) -> bool {
        self.push(resource);
        true
    }
}

impl ResourceSlot for Option<AnyResource> {
    fn resources(&self) -> Vec<&dyn Resource> {
        self.iter().map(|resource| &**resource).collect()
    }

    fn is_repeating(&self) -> bool {
        false
    }

    fn insert(&mut self, resource: AnyResource) -> bool {
        if self.is_some() {
            return false;
        }
        *self = Some(resource);
        true
    }
}

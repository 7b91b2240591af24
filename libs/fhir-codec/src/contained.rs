//! Polymorphic resource dispatch
//!
//! Contained resources and single embedded resources are decoded by reading
//! the discriminator first, asking the registry for an empty instance of that
//! type and then decoding the remaining fields into it.

use ferrum_element::{AnyResource, ResourceSlot, TypeRegistry};
use tracing::debug;

use crate::error::{FormatError, Result};

/// A zero-value instance of `type_name`.
pub(crate) fn instantiate(registry: &dyn TypeRegistry, type_name: &str) -> Result<AnyResource> {
    registry.lookup(type_name).ok_or_else(|| {
        debug!(resource_type = type_name, "unknown resource discriminator");
        FormatError::UnknownDiscriminator(type_name.to_owned())
    })
}

/// Typed decoding: the discriminator must name the target type.
pub(crate) fn expect_type(expected: &'static str, found: &str) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(FormatError::UnexpectedResourceType {
            expected,
            found: found.to_owned(),
        })
    }
}

/// Append to `contained`, or fill a single resource slot exactly once.
pub(crate) fn store(
    slot: &mut dyn ResourceSlot,
    resource: AnyResource,
    type_name: &'static str,
    field: &str,
) -> Result<()> {
    if slot.insert(resource) {
        Ok(())
    } else {
        Err(FormatError::structural(
            type_name,
            field,
            "more than one resource for a single-valued field",
        ))
    }
}

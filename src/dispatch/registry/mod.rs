//! The OperationRegistry: `(resource, operation) → descriptor`.

mod catalog;

use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult, ValidationError},
    model::operation::{OperationDescriptor, RegistryVersion, Resource},
};
use std::collections::HashMap;

/// Immutable lookup table built once for one [`RegistryVersion`].
///
/// Lookups are pure. Misses are reported as
/// [`ProxmoxError::UnknownOperation`] with the names exactly as requested.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    version: RegistryVersion,
    descriptors: HashMap<Resource, HashMap<&'static str, OperationDescriptor>>,
}

impl OperationRegistry {
    /// Builds the table of `version`, which includes every earlier version.
    pub fn new(version: RegistryVersion) -> Self {
        let mut registry = Self::empty(version);
        for descriptor in catalog::descriptors()
            .into_iter()
            .filter(|d| d.introduced_in() <= version)
        {
            registry
                .descriptors
                .entry(descriptor.resource())
                .or_default()
                .insert(descriptor.operation(), descriptor);
        }
        registry
    }

    /// A registry with no operations, for hosts that declare their own.
    pub fn empty(version: RegistryVersion) -> Self {
        Self {
            version,
            descriptors: HashMap::new(),
        }
    }

    /// Adds a descriptor.
    ///
    /// # Errors
    /// Fails if the pair is already registered or the descriptor belongs to a
    /// later version than this registry.
    pub fn register(&mut self, descriptor: OperationDescriptor) -> ProxmoxResult<()> {
        if descriptor.introduced_in() > self.version {
            return Err(ValidationError::ConstraintViolation(format!(
                "{}/{} requires registry {:?}, this registry is {:?}",
                descriptor.resource(),
                descriptor.operation(),
                descriptor.introduced_in(),
                self.version
            ))
            .into());
        }
        let operations = self.descriptors.entry(descriptor.resource()).or_default();
        if operations.contains_key(descriptor.operation()) {
            return Err(ValidationError::ConstraintViolation(format!(
                "{}/{} is already registered",
                descriptor.resource(),
                descriptor.operation()
            ))
            .into());
        }
        operations.insert(descriptor.operation(), descriptor);
        Ok(())
    }

    pub fn version(&self) -> RegistryVersion {
        self.version
    }

    pub fn resolve(&self, resource: Resource, operation: &str) -> ProxmoxResult<&OperationDescriptor> {
        self.descriptors
            .get(&resource)
            .and_then(|operations| operations.get(operation))
            .ok_or_else(|| ProxmoxError::UnknownOperation {
                resource: resource.to_string(),
                operation: operation.to_string(),
            })
    }

    /// Resolves a pair given by name, as a parameter source supplies it.
    pub fn resolve_named(&self, resource: &str, operation: &str) -> ProxmoxResult<&OperationDescriptor> {
        let unknown = || ProxmoxError::UnknownOperation {
            resource: resource.to_string(),
            operation: operation.to_string(),
        };
        let resource = Resource::parse(resource).ok_or_else(unknown)?;
        self.resolve(resource, operation).map_err(|_| unknown())
    }

    /// All descriptors, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.descriptors.values().flat_map(|operations| operations.values())
    }

    pub fn len(&self) -> usize {
        self.descriptors.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new(RegistryVersion::LATEST)
    }
}

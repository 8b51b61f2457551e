//! Operation descriptors: the binding of a (resource, operation) pair to its
//! concrete HTTP shape.

use crate::core::domain::{
    error::ProxmoxResult,
    model::{
        path_template::{PathSpec, RenderedPath},
        request_body::{BodyBuilder, RequestBody},
        work_item::ResolvedParams,
    },
};
use std::collections::BTreeSet;
use std::fmt;

/// The category of remote entity an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Vm,
    Container,
    Storage,
    Cluster,
    Backup,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Vm,
        Resource::Container,
        Resource::Storage,
        Resource::Cluster,
        Resource::Backup,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Vm => "vm",
            Resource::Container => "lxc",
            Resource::Storage => "storage",
            Resource::Cluster => "cluster",
            Resource::Backup => "backup",
        }
    }

    /// Parses a resource name, accepting the API's guest type names as aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "vm" | "qemu" => Some(Resource::Vm),
            "lxc" | "container" => Some(Resource::Container),
            "storage" => Some(Resource::Storage),
            "cluster" => Some(Resource::Cluster),
            "backup" => Some(Resource::Backup),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// Version of the operation table. Each version is a strict superset of the
/// previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistryVersion {
    /// VM, container, storage, cluster and backup operations.
    V1,
    /// Adds container status, agent status and RRD data reads.
    V2,
}

impl RegistryVersion {
    pub const LATEST: RegistryVersion = RegistryVersion::V2;
}

/// A registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    resource: Resource,
    operation: &'static str,
    method: HttpMethod,
    path: PathSpec,
    body: BodyBuilder,
    required_params: BTreeSet<&'static str>,
    since: RegistryVersion,
}

impl OperationDescriptor {
    /// Declares a descriptor. The required parameters are the path
    /// placeholders plus the fields the body builder reads.
    pub fn new(
        resource: Resource,
        operation: &'static str,
        method: HttpMethod,
        path: PathSpec,
        body: BodyBuilder,
    ) -> Self {
        let mut required_params = path.placeholders();
        required_params.extend(body.fields().iter().copied());
        if let PathSpec::ByGuestKind { selector, .. } = &path {
            required_params.insert(*selector);
        }
        Self {
            resource,
            operation,
            method,
            path,
            body,
            required_params,
            since: RegistryVersion::V1,
        }
    }

    #[must_use]
    pub fn since(mut self, version: RegistryVersion) -> Self {
        self.since = version;
        self
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &PathSpec {
        &self.path
    }

    pub fn body(&self) -> BodyBuilder {
        self.body
    }

    pub fn required_params(&self) -> &BTreeSet<&'static str> {
        &self.required_params
    }

    pub fn introduced_in(&self) -> RegistryVersion {
        self.since
    }

    /// Builds the concrete path and optional body for one item.
    pub fn prepare(&self, params: &ResolvedParams) -> ProxmoxResult<PreparedRequest> {
        Ok(PreparedRequest {
            method: self.method,
            path: self.path.render(params)?,
            body: self.body.build(params)?,
        })
    }
}

/// A call ready for the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub path: RenderedPath,
    pub body: Option<RequestBody>,
}

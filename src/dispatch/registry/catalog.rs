//! The operation table.

use crate::core::domain::model::{
    operation::{HttpMethod, OperationDescriptor, RegistryVersion, Resource},
    path_template::PathSpec,
    request_body::BodyBuilder,
};

use HttpMethod::{Delete, Get, Post, Put};

fn op(
    resource: Resource,
    operation: &'static str,
    method: HttpMethod,
    path: &'static str,
    body: BodyBuilder,
) -> OperationDescriptor {
    OperationDescriptor::new(resource, operation, method, PathSpec::fixed(path), body)
}

/// Every descriptor of every version, tagged with the version that introduced it.
pub(crate) fn descriptors() -> Vec<OperationDescriptor> {
    let mut all = Vec::new();
    all.extend(vm_operations());
    all.extend(container_operations());
    all.extend(storage_operations());
    all.extend(cluster_operations());
    all.extend(backup_operations());
    all
}

fn vm_operations() -> Vec<OperationDescriptor> {
    use Resource::Vm;
    vec![
        op(Vm, "listVms", Get, "/nodes/{node}/qemu", BodyBuilder::None),
        op(Vm, "getVm", Get, "/nodes/{node}/qemu/{vmid}/config", BodyBuilder::None),
        op(Vm, "createVm", Post, "/nodes/{node}/qemu", BodyBuilder::CreateVm),
        op(
            Vm,
            "startVm",
            Post,
            "/nodes/{node}/qemu/{vmid}/status/start",
            BodyBuilder::None,
        ),
        op(
            Vm,
            "stopVm",
            Post,
            "/nodes/{node}/qemu/{vmid}/status/stop",
            BodyBuilder::None,
        ),
        op(
            Vm,
            "restartVm",
            Post,
            "/nodes/{node}/qemu/{vmid}/status/reboot",
            BodyBuilder::None,
        ),
        op(Vm, "deleteVm", Delete, "/nodes/{node}/qemu/{vmid}", BodyBuilder::None),
        op(
            Vm,
            "cloneVm",
            Post,
            "/nodes/{node}/qemu/{vmid}/clone",
            BodyBuilder::Clone,
        ),
        op(
            Vm,
            "migrateVm",
            Post,
            "/nodes/{node}/qemu/{vmid}/migrate",
            BodyBuilder::Migrate,
        ),
        op(
            Vm,
            "configureVm",
            Put,
            "/nodes/{node}/qemu/{vmid}/config",
            BodyBuilder::Passthrough("vmConfig"),
        ),
        op(
            Vm,
            "getVmStatus",
            Get,
            "/nodes/{node}/qemu/{vmid}/status/current",
            BodyBuilder::None,
        ),
    ]
}

fn container_operations() -> Vec<OperationDescriptor> {
    use Resource::Container;
    vec![
        op(
            Container,
            "listContainers",
            Get,
            "/nodes/{node}/lxc",
            BodyBuilder::None,
        ),
        op(
            Container,
            "getContainer",
            Get,
            "/nodes/{node}/lxc/{vmid}/config",
            BodyBuilder::None,
        ),
        op(
            Container,
            "createContainer",
            Post,
            "/nodes/{node}/lxc",
            BodyBuilder::CreateContainer,
        ),
        op(
            Container,
            "startContainer",
            Post,
            "/nodes/{node}/lxc/{vmid}/status/start",
            BodyBuilder::None,
        ),
        op(
            Container,
            "stopContainer",
            Post,
            "/nodes/{node}/lxc/{vmid}/status/stop",
            BodyBuilder::None,
        ),
        op(
            Container,
            "restartContainer",
            Post,
            "/nodes/{node}/lxc/{vmid}/status/reboot",
            BodyBuilder::None,
        ),
        op(
            Container,
            "deleteContainer",
            Delete,
            "/nodes/{node}/lxc/{vmid}",
            BodyBuilder::None,
        ),
        op(
            Container,
            "cloneContainer",
            Post,
            "/nodes/{node}/lxc/{vmid}/clone",
            BodyBuilder::Clone,
        ),
        op(
            Container,
            "migrateContainer",
            Post,
            "/nodes/{node}/lxc/{vmid}/migrate",
            BodyBuilder::Migrate,
        ),
        op(
            Container,
            "configureContainer",
            Put,
            "/nodes/{node}/lxc/{vmid}/config",
            BodyBuilder::Passthrough("containerConfig"),
        ),
        op(
            Container,
            "getContainerStatus",
            Get,
            "/nodes/{node}/lxc/{vmid}/status/current",
            BodyBuilder::None,
        )
        .since(RegistryVersion::V2),
        op(
            Container,
            "getContainerAgentStatus",
            Get,
            "/nodes/{node}/lxc/{vmid}/agent/status",
            BodyBuilder::None,
        )
        .since(RegistryVersion::V2),
        op(
            Container,
            "getContainerRrdData",
            Get,
            "/nodes/{node}/lxc/{vmid}/rrddata",
            BodyBuilder::None,
        )
        .since(RegistryVersion::V2),
    ]
}

fn storage_operations() -> Vec<OperationDescriptor> {
    use Resource::Storage;
    vec![
        op(
            Storage,
            "listStorage",
            Get,
            "/nodes/{node}/storage",
            BodyBuilder::None,
        ),
        op(
            Storage,
            "getStorage",
            Get,
            "/nodes/{node}/storage/{storageId}",
            BodyBuilder::None,
        ),
        op(
            Storage,
            "createVolume",
            Post,
            "/nodes/{node}/storage/{storageId}/content",
            BodyBuilder::CreateVolume,
        ),
        op(
            Storage,
            "deleteVolume",
            Delete,
            "/nodes/{node}/storage/{storageId}/content/{volumeId}",
            BodyBuilder::None,
        ),
        op(
            Storage,
            "uploadIso",
            Post,
            "/nodes/{node}/storage/{storageId}/upload",
            BodyBuilder::UploadIso,
        ),
        op(
            Storage,
            "downloadTemplate",
            Post,
            "/nodes/{node}/storage/{storageId}/template",
            BodyBuilder::DownloadTemplate,
        ),
        op(
            Storage,
            "backupStorage",
            Get,
            "/nodes/{node}/storage/{storageId}/content",
            BodyBuilder::None,
        ),
    ]
}

fn cluster_operations() -> Vec<OperationDescriptor> {
    use Resource::Cluster;
    vec![
        op(
            Cluster,
            "getClusterStatus",
            Get,
            "/cluster/status",
            BodyBuilder::None,
        ),
        op(Cluster, "listNodes", Get, "/nodes", BodyBuilder::None),
        op(Cluster, "getNode", Get, "/nodes/{node}/status", BodyBuilder::None),
        op(Cluster, "nodeStatistics", Get, "/nodes/{node}", BodyBuilder::None),
        op(
            Cluster,
            "clusterResources",
            Get,
            "/cluster/resources",
            BodyBuilder::None,
        ),
        op(Cluster, "haStatus", Get, "/cluster/ha/status", BodyBuilder::None),
        op(Cluster, "clusterTasks", Get, "/cluster/tasks", BodyBuilder::None),
    ]
}

fn backup_operations() -> Vec<OperationDescriptor> {
    use Resource::Backup;
    vec![
        op(
            Backup,
            "listBackups",
            Get,
            "/nodes/{node}/storage/{storageId}/content?content=backup",
            BodyBuilder::None,
        ),
        op(
            Backup,
            "createBackup",
            Post,
            "/nodes/{node}/vzdump",
            BodyBuilder::CreateBackup,
        ),
        OperationDescriptor::new(
            Backup,
            "restoreBackup",
            Post,
            PathSpec::by_guest_kind("backupType", "/nodes/{node}/qemu", "/nodes/{node}/lxc"),
            BodyBuilder::Restore,
        ),
        op(
            Backup,
            "deleteBackup",
            Delete,
            "/nodes/{node}/storage/{storageId}/content/{volumeId}",
            BodyBuilder::None,
        ),
        op(Backup, "backupJobs", Get, "/cluster/backup", BodyBuilder::None),
        op(
            Backup,
            "backupConfiguration",
            Put,
            "/cluster/backup/{backupId}",
            BodyBuilder::Passthrough("backupConfig"),
        ),
    ]
}

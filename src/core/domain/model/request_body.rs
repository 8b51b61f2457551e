//! Typed request bodies and the declared builders that produce them.
//!
//! Each builder maps the human-facing parameter names collected per item onto
//! the field names the Proxmox API expects.

use crate::core::domain::{error::ProxmoxResult, model::work_item::ResolvedParams};
use serde::Serialize;
use serde_json::{Map, Value};

/// Body of `POST /nodes/{node}/qemu`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateVmBody {
    pub vmid: u64,
    pub name: String,
    pub cores: u64,
    /// Memory in MB.
    pub memory: u64,
    /// First SATA disk as `<storage>:<sizeGB>`.
    pub sata0: String,
}

/// Body of `POST /nodes/{node}/lxc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateContainerBody {
    pub vmid: u64,
    pub hostname: String,
    pub cores: u64,
    /// Memory in MB.
    pub memory: u64,
    /// Root volume as `<storage>:<sizeGB>`.
    pub rootfs: String,
    /// Template volume, e.g. `local:vztmpl/debian-12-standard_12.2-1_amd64.tar.zst`.
    pub ostemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloneBody {
    pub newid: u64,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrateBody {
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeBody {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadTemplateBody {
    pub url: String,
    pub filename: String,
}

/// Body of `POST /nodes/{node}/vzdump`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupBody {
    pub vmid: u64,
    pub storage: String,
    pub mode: String,
    #[serde(rename = "notes-template", skip_serializing_if = "Option::is_none")]
    pub notes_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestoreVmBody {
    pub vmid: u64,
    pub archive: String,
    pub storage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestoreContainerBody {
    pub vmid: u64,
    pub ostemplate: String,
    pub storage: String,
    pub restore: u8,
}

/// A request body, one variant per body shape the catalog uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    CreateVm(CreateVmBody),
    CreateContainer(CreateContainerBody),
    Clone(CloneBody),
    Migrate(MigrateBody),
    Volume(VolumeBody),
    DownloadTemplate(DownloadTemplateBody),
    Backup(BackupBody),
    RestoreVm(RestoreVmBody),
    RestoreContainer(RestoreContainerBody),
    /// Free-form configuration object (configure operations).
    Config(Map<String, Value>),
}

/// The kind of guest a backup archive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestKind {
    Qemu,
    Lxc,
}

impl GuestKind {
    /// Reads the guest kind from a parameter (`vma`/`qemu`/`vm` or `lxc`/`container`).
    pub fn from_param(params: &ResolvedParams, name: &str) -> ProxmoxResult<Self> {
        let value = params.string(name)?;
        match value.to_ascii_lowercase().as_str() {
            "vma" | "qemu" | "vm" => Ok(GuestKind::Qemu),
            "lxc" | "container" => Ok(GuestKind::Lxc),
            other => Err(crate::ProxmoxError::parameter(
                params.item_index(),
                name,
                format!("unknown backup type '{}' (expected vma or lxc)", other),
            )),
        }
    }

    /// Infers the guest kind from a vzdump archive name, if it follows the
    /// `vzdump-<type>-<vmid>-...` convention.
    pub fn from_archive(volume: &str) -> Option<Self> {
        let file = volume.rsplit(['/', ':']).next().unwrap_or(volume);
        if file.starts_with("vzdump-qemu-") {
            Some(GuestKind::Qemu)
        } else if file.starts_with("vzdump-lxc-") || file.starts_with("vzdump-openvz-") {
            Some(GuestKind::Lxc)
        } else {
            None
        }
    }
}

/// How a descriptor turns resolved parameters into a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyBuilder {
    None,
    CreateVm,
    CreateContainer,
    Clone,
    Migrate,
    CreateVolume,
    UploadIso,
    DownloadTemplate,
    CreateBackup,
    /// VM or container restore, chosen by the `backupType` parameter.
    Restore,
    /// Pass the named object parameter through unchanged.
    Passthrough(&'static str),
}

impl BodyBuilder {
    /// Parameters read only by the body (not by the path).
    pub fn fields(&self) -> &[&'static str] {
        match self {
            BodyBuilder::None => &[],
            BodyBuilder::CreateVm => &[
                "vmid",
                "vmName",
                "vmCores",
                "vmMemory",
                "vmDiskSize",
                "vmStorage",
            ],
            BodyBuilder::CreateContainer => &[
                "vmid",
                "containerName",
                "containerCores",
                "containerMemory",
                "containerDiskSize",
                "containerStorage",
                "containerTemplate",
            ],
            BodyBuilder::Clone => &["newVmid", "targetNode"],
            BodyBuilder::Migrate => &["targetNode"],
            BodyBuilder::CreateVolume => &["fileName", "contentType"],
            BodyBuilder::UploadIso => &["fileName"],
            BodyBuilder::DownloadTemplate => &["url", "fileName"],
            BodyBuilder::CreateBackup => &["vmid", "storageId", "description"],
            BodyBuilder::Restore => &["vmid", "volumeId", "storageId", "backupType"],
            BodyBuilder::Passthrough(name) => std::slice::from_ref(name),
        }
    }

    pub fn build(&self, params: &ResolvedParams) -> ProxmoxResult<Option<RequestBody>> {
        let body = match self {
            BodyBuilder::None => return Ok(None),
            BodyBuilder::CreateVm => RequestBody::CreateVm(CreateVmBody {
                vmid: params.u64("vmid")?,
                name: params.string("vmName")?,
                cores: params.u64("vmCores")?,
                memory: params.u64("vmMemory")?,
                sata0: disk_spec(params, "vmStorage", "vmDiskSize")?,
            }),
            BodyBuilder::CreateContainer => RequestBody::CreateContainer(CreateContainerBody {
                vmid: params.u64("vmid")?,
                hostname: params.string("containerName")?,
                cores: params.u64("containerCores")?,
                memory: params.u64("containerMemory")?,
                rootfs: disk_spec(params, "containerStorage", "containerDiskSize")?,
                ostemplate: params.string("containerTemplate")?,
            }),
            BodyBuilder::Clone => RequestBody::Clone(CloneBody {
                newid: params.u64("newVmid")?,
                target: params.segment("targetNode")?,
            }),
            BodyBuilder::Migrate => RequestBody::Migrate(MigrateBody {
                target: params.segment("targetNode")?,
            }),
            BodyBuilder::CreateVolume => RequestBody::Volume(VolumeBody {
                filename: params.string("fileName")?,
                content: params.string("contentType")?,
            }),
            BodyBuilder::UploadIso => RequestBody::Volume(VolumeBody {
                filename: params.string("fileName")?,
                content: "iso".to_string(),
            }),
            BodyBuilder::DownloadTemplate => RequestBody::DownloadTemplate(DownloadTemplateBody {
                url: params.string("url")?,
                filename: params.string("fileName")?,
            }),
            BodyBuilder::CreateBackup => {
                let description = params.string("description")?;
                RequestBody::Backup(BackupBody {
                    vmid: params.u64("vmid")?,
                    storage: params.segment("storageId")?,
                    mode: "snapshot".to_string(),
                    notes_template: (!description.is_empty()).then_some(description),
                })
            }
            BodyBuilder::Restore => restore_body(params)?,
            BodyBuilder::Passthrough(name) => RequestBody::Config(params.object(name)?),
        };
        Ok(Some(body))
    }
}

/// Collapses a storage pool and a size in GB into `<storage>:<size>`.
fn disk_spec(params: &ResolvedParams, storage: &str, size: &str) -> ProxmoxResult<String> {
    Ok(format!("{}:{}", params.segment(storage)?, params.u64(size)?))
}

fn restore_body(params: &ResolvedParams) -> ProxmoxResult<RequestBody> {
    let kind = GuestKind::from_param(params, "backupType")?;
    let archive = params.segment("volumeId")?;
    if let Some(archive_kind) = GuestKind::from_archive(&archive) {
        if archive_kind != kind {
            return Err(crate::ProxmoxError::parameter(
                params.item_index(),
                "backupType",
                format!("archive '{}' is a {:?} backup", archive, archive_kind),
            ));
        }
    }
    let vmid = params.u64("vmid")?;
    let storage = params.segment("storageId")?;
    Ok(match kind {
        GuestKind::Qemu => RequestBody::RestoreVm(RestoreVmBody {
            vmid,
            archive,
            storage,
        }),
        GuestKind::Lxc => RequestBody::RestoreContainer(RestoreContainerBody {
            vmid,
            ostemplate: archive,
            storage,
            restore: 1,
        }),
    })
}

use crate::{ProxmoxError, WorkItem, tests::token_client};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

#[tokio::test]
async fn test_list_backups_filters_by_content() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/storage/local/content"))
        .and(query_param("content", "backup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"volid": "local:backup/vzdump-qemu-100-2024_05_01-02_00_00.vma.zst"},
                {"volid": "local:backup/vzdump-lxc-200-2024_05_01-02_10_00.tar.zst"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payloads = token_client(&mock_server.uri(), false)
        .execute(
            &WorkItem::new("backup", "listBackups")
                .param("node", "pve1")
                .param("storageId", "local"),
        )
        .await
        .unwrap();
    assert_eq!(payloads.len(), 2);
}

#[tokio::test]
async fn test_create_backup_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/vzdump"))
        .and(body_json(json!({
            "vmid": 100,
            "storage": "backup-nfs",
            "mode": "snapshot",
            "notes-template": "nightly"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:vzdump"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    token_client(&mock_server.uri(), false)
        .execute(
            &WorkItem::new("backup", "createBackup")
                .param("node", "pve1")
                .param("vmid", 100)
                .param("storageId", "backup-nfs")
                .param("description", "nightly"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_restore_routes_by_backup_type() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .and(body_json(json!({
            "vmid": 300,
            "archive": "local:backup/vzdump-qemu-100.vma.zst",
            "storage": "local-lvm"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:qmrestore"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/lxc"))
        .and(body_json(json!({
            "vmid": 301,
            "ostemplate": "local:backup/vzdump-lxc-200.tar.zst",
            "storage": "local-lvm",
            "restore": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:vzrestore"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let restore = |vmid: u64, kind: &str, archive: &str| {
        WorkItem::new("backup", "restoreBackup")
            .param("node", "pve1")
            .param("vmid", vmid)
            .param("storageId", "local-lvm")
            .param("backupType", kind)
            .param("volumeId", archive)
    };
    let items = vec![
        restore(300, "vma", "local:backup/vzdump-qemu-100.vma.zst"),
        restore(301, "lxc", "local:backup/vzdump-lxc-200.tar.zst"),
    ];
    let records = token_client(&mock_server.uri(), false)
        .run_batch(&items)
        .await
        .unwrap();

    assert_eq!(records[0].json["data"], "UPID:qmrestore");
    assert_eq!(records[1].json["data"], "UPID:vzrestore");
}

#[tokio::test]
async fn test_restore_rejects_mismatched_archive() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = token_client(&mock_server.uri(), false)
        .execute(
            &WorkItem::new("backup", "restoreBackup")
                .param("node", "pve1")
                .param("vmid", 300)
                .param("storageId", "local-lvm")
                .param("backupType", "lxc")
                .param("volumeId", "local:backup/vzdump-qemu-100.vma.zst"),
        )
        .await;

    assert!(matches!(
        result,
        Err(ProxmoxError::Parameter { ref name, .. }) if name == "backupType"
    ));
}

#[tokio::test]
async fn test_backup_configuration_update() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api2/json/cluster/backup/backup-job-1"))
        .and(body_json(json!({"schedule": "sun 01:00", "enabled": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    token_client(&mock_server.uri(), false)
        .execute(
            &WorkItem::new("backup", "backupConfiguration")
                .param("backupId", "backup-job-1")
                .param("backupConfig", json!({"schedule": "sun 01:00", "enabled": 1})),
        )
        .await
        .unwrap();
}

use crate::{ProxmoxError, WorkItem, tests::token_client};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_json, method, path},
};

#[tokio::test]
async fn test_storage_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/storage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"storage": "local", "type": "dir", "active": 1},
                {"storage": "local-lvm", "type": "lvmthin", "active": 1}
            ]
        })))
        .mount(&mock_server)
        .await;

    let payloads = token_client(&mock_server.uri(), false)
        .execute(&WorkItem::new("storage", "listStorage").param("node", "pve1"))
        .await
        .unwrap();
    assert_eq!(payloads[1]["storage"], "local-lvm");
}

#[tokio::test]
async fn test_volume_operations() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/storage/local/content"))
        .and(body_json(json!({"filename": "vm-100-disk-1", "content": "images"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "local:100/vm-100-disk-1.raw"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(
            "/api2/json/nodes/pve1/storage/local/content/local:100%2Fvm-100-disk-1.raw",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = vec![
        WorkItem::new("storage", "createVolume")
            .param("node", "pve1")
            .param("storageId", "local")
            .param("fileName", "vm-100-disk-1")
            .param("contentType", "images"),
        WorkItem::new("storage", "deleteVolume")
            .param("node", "pve1")
            .param("storageId", "local")
            .param("volumeId", "local:100/vm-100-disk-1.raw"),
    ];
    let records = token_client(&mock_server.uri(), false)
        .run_batch(&items)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].json["data"], "local:100/vm-100-disk-1.raw");
}

#[tokio::test]
async fn test_download_template_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/storage/local/template"))
        .and(body_json(json!({
            "url": "http://download.proxmox.com/images/system/debian-12-standard.tar.zst",
            "filename": "debian-12-standard.tar.zst"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:dl"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    token_client(&mock_server.uri(), false)
        .execute(
            &WorkItem::new("storage", "downloadTemplate")
                .param("node", "pve1")
                .param("storageId", "local")
                .param(
                    "url",
                    "http://download.proxmox.com/images/system/debian-12-standard.tar.zst",
                )
                .param("fileName", "debian-12-standard.tar.zst"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_volume_refuses_dot_segments() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server.uri(), false);
    for (storage, volume) in [("local", ".."), ("..", "vm-100-disk-1"), ("local", ".")] {
        let result = client
            .execute(
                &WorkItem::new("storage", "deleteVolume")
                    .param("node", "pve1")
                    .param("storageId", storage)
                    .param("volumeId", volume),
            )
            .await;
        assert!(
            matches!(result, Err(ProxmoxError::Parameter { .. })),
            "{}/{} gave {:?}",
            storage,
            volume,
            result
        );
    }
}

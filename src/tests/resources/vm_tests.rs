use crate::{ProxmoxError, WorkItem, tests::token_client};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_json, header, method, path},
};

#[tokio::test]
async fn test_vms_list_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .and(header("Authorization", "PVEAPIToken=root@pam!ci=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "vmid": 100,
                    "name": "ubuntu-vm",
                    "status": "running",
                    "maxmem": 8589934592_i64,
                    "tags": "ubuntu,production"
                },
                {
                    "vmid": 101,
                    "name": "windows-vm",
                    "status": "stopped"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let payloads = token_client(&mock_server.uri(), false)
        .execute(&WorkItem::new("vm", "listVms").param("node", "pve1"))
        .await
        .unwrap();

    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0]["name"], "ubuntu-vm");
    assert_eq!(payloads[1]["status"], "stopped");
}

#[tokio::test]
async fn test_vm_create_maps_fields() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .and(body_json(json!({
            "vmid": 120,
            "name": "web-01",
            "cores": 4,
            "memory": 4096,
            "sata0": "local-lvm:32"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:pve1:create"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let item = WorkItem::new("vm", "createVm")
        .param("node", "pve1")
        .param("vmid", 120)
        .param("vmName", "web-01")
        .param("vmCores", 4)
        .param("vmMemory", "4096")
        .param("vmDiskSize", 32)
        .param("vmStorage", "local-lvm");
    let payloads = token_client(&mock_server.uri(), false)
        .execute(&item)
        .await
        .unwrap();

    assert_eq!(payloads, vec![json!({"data": "UPID:pve1:create"})]);
}

#[tokio::test]
async fn test_vm_clone_and_migrate_bodies() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/clone"))
        .and(body_json(json!({"newid": 150, "target": "pve2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:clone"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/migrate"))
        .and(body_json(json!({"target": "pve3"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:migrate"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server.uri(), false);
    client
        .execute(
            &WorkItem::new("vm", "cloneVm")
                .param("node", "pve1")
                .param("vmid", 100)
                .param("newVmid", 150)
                .param("targetNode", "pve2"),
        )
        .await
        .unwrap();
    client
        .execute(
            &WorkItem::new("qemu", "migrateVm")
                .param("node", "pve1")
                .param("vmid", 100)
                .param("targetNode", "pve3"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_vm_configure_passes_object_through() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api2/json/nodes/pve1/qemu/100/config"))
        .and(body_json(json!({"cores": 8, "description": "resized"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payloads = token_client(&mock_server.uri(), false)
        .execute(
            &WorkItem::new("vm", "configureVm")
                .param("node", "pve1")
                .param("vmid", 100)
                .param("vmConfig", json!({"cores": 8, "description": "resized"})),
        )
        .await
        .unwrap();

    assert_eq!(payloads, vec![json!({"data": null})]);
}

#[tokio::test]
async fn test_vm_delete_encodes_path_segments() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api2/json/nodes/node%2Fa/qemu/100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:del"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    token_client(&mock_server.uri(), false)
        .execute(
            &WorkItem::new("vm", "deleteVm")
                .param("node", "node/a")
                .param("vmid", 100),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_vm_delete_refuses_ids_that_leave_the_path() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = token_client(&mock_server.uri(), false);
    for vmid in ["..", ".", "abc"] {
        let result = client
            .execute(
                &WorkItem::new("vm", "deleteVm")
                    .param("node", "pve1")
                    .param("vmid", vmid),
            )
            .await;
        assert!(
            matches!(result, Err(ProxmoxError::Parameter { ref name, .. }) if name == "vmid"),
            "vmid {:?} gave {:?}",
            vmid,
            result
        );
    }
}

#[tokio::test]
async fn test_vm_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/999/config"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": {"vmid": "VM 999 not found"}
        })))
        .mount(&mock_server)
        .await;

    let result = token_client(&mock_server.uri(), true)
        .execute(
            &WorkItem::new("vm", "getVm")
                .param("node", "pve1")
                .param("vmid", 999),
        )
        .await;

    assert!(matches!(
        result,
        Err(ProxmoxError::RemoteApi { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_vm_create_missing_parameter_makes_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = token_client(&mock_server.uri(), false)
        .execute(
            &WorkItem::new("vm", "createVm")
                .param("node", "pve1")
                .param("vmid", 120)
                .param("vmName", "web-01"),
        )
        .await;

    assert!(matches!(result, Err(ProxmoxError::Parameter { item_index: 0, .. })));
}

use crate::{NodeOption, ProxmoxClient, ProxmoxError, WorkItem, tests::token_client};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_list_nodes_options() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"node": "pve1"}, {"node": "pve2"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let nodes = token_client(&mock_server.uri(), false)
        .list_nodes()
        .await
        .unwrap();

    assert_eq!(
        nodes,
        vec![
            NodeOption {
                display_name: "pve1".to_string(),
                id: "pve1".to_string(),
            },
            NodeOption {
                display_name: "pve2".to_string(),
                id: "pve2".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_list_nodes_with_invalid_login() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/access/ticket"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ProxmoxClient::builder()
        .server_url(mock_server.uri())
        .credentials("root@pam", "wrong")
        .build()
        .unwrap();
    let result = client.list_nodes().await;
    assert!(matches!(result, Err(ProxmoxError::Authentication(_))));
}

#[tokio::test]
async fn test_cluster_resources_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/cluster/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "node/pve1", "type": "node", "node": "pve1", "status": "online"},
                {"id": "qemu/100", "type": "qemu", "node": "pve1", "vmid": 100},
                {"id": "storage/pve1/local", "type": "storage", "storage": "local"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let records = token_client(&mock_server.uri(), false)
        .run_batch(&vec![WorkItem::new("cluster", "clusterResources")])
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.item_index == 0));
    assert_eq!(records[1].json["id"], "qemu/100");
}

#[tokio::test]
async fn test_node_status_and_statistics_routes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"uptime": 3600, "cpu": 0.05}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"subdir": "qemu"}, {"subdir": "lxc"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = vec![
        WorkItem::new("cluster", "getNode").param("node", "pve1"),
        WorkItem::new("cluster", "nodeStatistics").param("node", "pve1"),
    ];
    let records = token_client(&mock_server.uri(), false)
        .run_batch(&items)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].json["uptime"], 3600);
    assert_eq!(records[2].json["subdir"], "lxc");
}

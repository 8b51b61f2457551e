pub mod api_response;
pub mod auth_session;
pub mod credentials;
pub mod execution_result;
pub mod node_list_item;
pub mod operation;
pub mod path_template;
pub mod request_body;
pub mod work_item;

pub mod batch_processor;
pub mod node_lister;

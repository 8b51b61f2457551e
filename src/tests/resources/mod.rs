mod backup_tests;
mod cluster_tests;
mod storage_tests;
mod vm_tests;

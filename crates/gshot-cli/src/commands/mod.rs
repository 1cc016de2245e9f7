pub mod branch;
pub mod commit;
pub mod init;
pub mod log;
pub mod restore;

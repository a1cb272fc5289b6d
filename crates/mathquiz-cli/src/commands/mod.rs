pub mod init;
pub mod list_operators;
pub mod run;
pub mod version;

//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod get;
pub mod get_id;
pub mod init;
pub mod list;
pub mod remove;
pub mod rotate;
pub mod rotate_master;
pub mod version;

mod init;
mod resolve;
mod serve;

pub use init::cmd_init;
pub use resolve::cmd_resolve;
pub use serve::cmd_serve;

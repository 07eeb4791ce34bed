//! CLI Commands

pub mod classify;
pub mod policy;
pub mod show;
pub mod sync;

pub use self::classify::ClassifyCommand;
pub use self::policy::PolicyCommand;
pub use self::show::ShowCommand;
pub use self::sync::SyncCommand;

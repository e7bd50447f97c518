//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, programmatic collection building,
//! and CLI assertion helpers using `assert_cmd`.

mod collection;
mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use collection::TestCollection;
#[allow(unused_imports)]
pub use command::VaultportCommand;
#[allow(unused_imports)]
pub use env::TestEnv;

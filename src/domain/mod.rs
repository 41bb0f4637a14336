//! Domain logic - pure rules independent of git, files and the version tool

pub mod branch;
pub mod bump;
pub mod commit;
pub mod version;

pub use branch::BranchContext;
pub use bump::BumpKind;
pub use version::BumpedVersion;

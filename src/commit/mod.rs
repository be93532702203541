//! Heuristic Conventional Commits suggestions.

pub mod generator;
pub mod scope_detector;
pub mod type_detector;
pub mod types;

pub use generator::{
    CommitMessage, GenerateOptions, GenerateResult, format_commit_message,
    generate_commit_message,
};
pub use scope_detector::{detect_scope, scope_for_path};
pub use type_detector::{detect_type, type_for_path};
pub use types::{CommitType, Confidence};

pub mod analyzer;
pub mod clone;
pub mod export;
pub mod manifest;
pub mod options;
pub mod repo_list;
pub mod report;
pub mod workspace;

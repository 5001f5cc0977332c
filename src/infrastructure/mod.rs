//! 외부 세계(파일/네트워크/콘솔)와 맞닿는 인프라 계층.

pub mod adapters;
pub mod analysis;
pub mod config;
pub mod render;
pub mod vcs;

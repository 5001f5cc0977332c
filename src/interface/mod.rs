//! 사용자 진입점(CLI) 인터페이스 계층.

pub mod cli;

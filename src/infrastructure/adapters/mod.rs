//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod analysis_factory;
mod config_repository;
mod report_renderer;
mod reporter;
mod review_factory;
mod target_resolver;
mod token_resolver;

pub use analysis_factory::SonarAnalysisFactory;
pub use config_repository::JsonConfigRepository;
pub use report_renderer::MarkdownReportRenderer;
pub use reporter::ConsoleReporter;
pub use review_factory::ReviewFactoryAdapter;
pub use target_resolver::UrlTargetResolver;
pub use token_resolver::ConfigTokenResolver;

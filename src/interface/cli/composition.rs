//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::sync_report::SyncReportUseCase;
use crate::infrastructure::adapters::{
    ConfigTokenResolver, ConsoleReporter, JsonConfigRepository, MarkdownReportRenderer,
    ReviewFactoryAdapter, SonarAnalysisFactory, UrlTargetResolver,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
#[derive(Default)]
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    target_resolver: UrlTargetResolver,
    token_resolver: ConfigTokenResolver,
    analysis_factory: SonarAnalysisFactory,
    review_factory: ReviewFactoryAdapter,
    renderer: MarkdownReportRenderer,
    reporter: ConsoleReporter,
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 리포트 동기화 유스케이스를 생성한다.
    pub fn sync_report_usecase(&self) -> SyncReportUseCase<'_> {
        SyncReportUseCase {
            config_repo: &self.config_repo,
            target_resolver: &self.target_resolver,
            token_resolver: &self.token_resolver,
            analysis_factory: &self.analysis_factory,
            review_factory: &self.review_factory,
            renderer: &self.renderer,
            reporter: &self.reporter,
        }
    }
}

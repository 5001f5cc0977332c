//! 토큰 해석 포트 구현 어댑터.

use crate::application::config::{AnalysisConfig, HostConfig};
use crate::application::ports::{TokenResolution, TokenResolver};
use crate::infrastructure::config::{resolve_analysis_token, resolve_host_token};

/// 설정(token/env)에 기반해 런타임 토큰을 해석한다.
#[derive(Default)]
pub struct ConfigTokenResolver;

impl TokenResolver for ConfigTokenResolver {
    fn resolve_host_token(&self, host_cfg: Option<&HostConfig>) -> TokenResolution {
        resolve_host_token(host_cfg)
    }

    fn resolve_analysis_token(&self, analysis: &AnalysisConfig) -> TokenResolution {
        resolve_analysis_token(analysis)
    }
}

//! 설정 값(token/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{AnalysisConfig, HostConfig};
use crate::application::ports::TokenResolution;

/// Host(VCS) 토큰을 해석한다. inline 값이 환경변수보다 우선한다.
pub fn resolve_host_token(host_cfg: Option<&HostConfig>) -> TokenResolution {
    let Some(cfg) = host_cfg else {
        return TokenResolution::default();
    };

    resolve(cfg.token.as_deref(), cfg.token_env.as_deref())
}

/// 분석 서버 토큰을 해석한다.
pub fn resolve_analysis_token(analysis: &AnalysisConfig) -> TokenResolution {
    resolve(analysis.token.as_deref(), analysis.token_env.as_deref())
}

fn resolve(inline: Option<&str>, env_name: Option<&str>) -> TokenResolution {
    if let Some(token) = inline.map(str::trim).filter(|v| !v.is_empty()) {
        return TokenResolution {
            token: Some(token.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let Some(env_name) = env_name.map(str::trim).filter(|v| !v.is_empty()) else {
        return TokenResolution::default();
    };

    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => TokenResolution {
            token: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => TokenResolution {
            token: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_inline_token_wins_over_env() {
        let resolution = resolve(Some("  abc  "), Some("SONARGATE_TEST_UNSET"));
        assert_eq!(resolution.token.as_deref(), Some("abc"));
        assert_eq!(resolution.source.as_deref(), Some("inline"));
    }

    #[test]
    fn unit_missing_env_keeps_source_hint() {
        let resolution = resolve(None, Some("SONARGATE_TEST_DEFINITELY_UNSET"));
        assert_eq!(resolution.token, None);
        assert_eq!(
            resolution.source.as_deref(),
            Some("env:SONARGATE_TEST_DEFINITELY_UNSET (missing)")
        );
    }

    #[test]
    fn unit_no_configuration_resolves_to_nothing() {
        let resolution = resolve_host_token(None);
        assert_eq!(resolution.token, None);
        assert_eq!(resolution.source, None);
    }
}

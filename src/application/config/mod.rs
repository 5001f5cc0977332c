//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 분석 서버 이슈 검색 페이지 크기 기본값.
pub const DEFAULT_PAGE_SIZE: u64 = 200;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 분석 서버(SonarQube) 연결 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// VCS 호스트별 인증/엔드포인트 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 이슈 검색 페이지 크기
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AnalysisConfig {
    /// 분석 서버 base URL (예: https://sonar.example.com)
    pub host: Option<String>,
    /// 분석 프로젝트 key
    pub project_key: Option<String>,
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름
    pub token_env: Option<String>,
    /// branch plugin 사용 여부(PR 단위 조회 파라미터 추가)
    pub branch_plugin: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HostConfig {
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름
    pub token_env: Option<String>,
    /// API base URL override(선택)
    pub api_base: Option<String>,
}

impl Config {
    pub fn page_size(&self) -> u64 {
        self.defaults.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.analysis.merge_from(other.analysis);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.page_size.is_some() {
            self.page_size = other.page_size;
        }
    }
}

impl AnalysisConfig {
    pub fn branch_plugin(&self) -> bool {
        self.branch_plugin.unwrap_or(false)
    }

    pub fn merge_from(&mut self, other: AnalysisConfig) {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.project_key.is_some() {
            self.project_key = other.project_key;
        }
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.branch_plugin.is_some() {
            self.branch_plugin = other.branch_plugin;
        }
    }
}

impl HostConfig {
    pub fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}

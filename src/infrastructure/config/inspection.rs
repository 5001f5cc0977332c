//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::{resolve_analysis_token, resolve_host_token};
use crate::application::config::{DefaultsConfig, HostConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub analysis: AnalysisInspection,
    pub hosts: BTreeMap<String, HostInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub page_size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisInspection {
    pub host: Option<String>,
    pub project_key: Option<String>,
    pub branch_plugin: bool,
    pub token_source: Option<String>,
    pub token_resolved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let mut hosts = BTreeMap::new();
        for (host, cfg) in &loaded.config.hosts {
            hosts.insert(host.clone(), host_inspection(cfg));
        }

        let analysis_resolution = resolve_analysis_token(&loaded.config.analysis);

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: loaded.config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                page_size: loaded.config.page_size(),
            },
            analysis: AnalysisInspection {
                host: loaded.config.analysis.host.clone(),
                project_key: loaded.config.analysis.project_key.clone(),
                branch_plugin: loaded.config.analysis.branch_plugin(),
                token_resolved: analysis_resolution.token.is_some(),
                token_source: analysis_resolution.source,
            },
            hosts,
        }
    }
}

fn host_inspection(cfg: &HostConfig) -> HostInspection {
    let resolution = resolve_host_token(Some(cfg));
    HostInspection {
        token_source: resolution.source,
        token_resolved: resolution.token.is_some(),
        api_base: cfg.api_base.clone(),
    }
}

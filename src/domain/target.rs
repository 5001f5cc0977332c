//! 입력 URL을 GitHub Pull Request 대상으로 해석하는 모듈.

use anyhow::{Result, bail};
use url::Url;

/// 동기화 대상 PR 식별자.
#[derive(Debug, Clone)]
pub struct PullRequestTarget {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub url: String,
}

impl PullRequestTarget {
    /// `/owner/repo/pull/<number>` 패턴의 URL을 파싱한다.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input)?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("URL host is missing"))?
            .to_string();

        let segments: Vec<String> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).map(ToString::to_string).collect())
            .unwrap_or_default();

        if segments.len() < 4 || segments[2] != "pull" {
            bail!("unsupported pull request URL: {input}");
        }

        let Ok(number) = segments[3].parse() else {
            bail!("pull request number is not numeric: {input}");
        };

        Ok(Self {
            host,
            owner: segments[0].clone(),
            repo: segments[1].clone(),
            number,
            url: input.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_parse_accepts_github_pull_url() {
        let target = PullRequestTarget::parse("https://github.com/acme/widgets/pull/42").unwrap();
        assert_eq!(target.host, "github.com");
        assert_eq!(target.owner, "acme");
        assert_eq!(target.repo, "widgets");
        assert_eq!(target.number, 42);
    }

    #[test]
    fn unit_parse_accepts_enterprise_host() {
        let target =
            PullRequestTarget::parse("https://git.corp.example.com/acme/widgets/pull/7").unwrap();
        assert_eq!(target.host, "git.corp.example.com");
        assert_eq!(target.number, 7);
    }

    #[test]
    fn unit_parse_rejects_non_pull_urls() {
        assert!(PullRequestTarget::parse("https://github.com/acme/widgets").is_err());
        assert!(PullRequestTarget::parse("https://github.com/acme/widgets/issues/42").is_err());
        assert!(PullRequestTarget::parse("https://github.com/acme/widgets/pull/abc").is_err());
        assert!(PullRequestTarget::parse("not a url").is_err());
    }
}

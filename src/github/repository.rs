//! Determine which GitHub repository releases are published to.

use crate::EnvConfig;
use crate::error::{GitHubError, Result};
use std::path::Path;

/// GitHub owner/repo pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepository {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl std::fmt::Display for GitHubRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl GitHubRepository {
    /// Parse `owner/repo`
    pub fn from_slug(slug: &str) -> Result<Self> {
        match slug.trim().split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(GitHubError::RepositoryNotFound {
                reason: format!("'{}' is not in owner/repo form", slug),
            }
            .into()),
        }
    }

    /// `GITHUB_REPOSITORY` first, then the `origin` remote of `project_path`
    pub async fn detect(env: &EnvConfig, project_path: &Path) -> Result<Self> {
        if let Some(slug) = env.get("GITHUB_REPOSITORY") {
            return Self::from_slug(&slug);
        }

        let url = detect_origin_url(project_path).await?;
        let (owner, repo) = parse_github_url(&url)?;
        Ok(Self { owner, repo })
    }
}

/// Detect origin URL from git config
async fn detect_origin_url(repo_path: &Path) -> Result<String> {
    let output = tokio::process::Command::new("git")
        .args(["remote", "get-url", "origin"])
        .current_dir(repo_path)
        .output()
        .await
        .map_err(|e| GitHubError::RepositoryNotFound {
            reason: format!("git remote get-url origin: {}", e),
        })?;

    if !output.status.success() {
        return Err(GitHubError::RepositoryNotFound {
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Parse GitHub owner/repo from a remote URL.
///
/// Supports:
/// - `git@github.com:owner/repo.git`
/// - `https://github.com/owner/repo(.git)`
/// - `ssh://git@github.com/owner/repo.git`
pub fn parse_github_url(url: &str) -> Result<(String, String)> {
    // SCP-like: git@github.com:owner/repo.git
    if url.contains('@') && url.contains(':') && !url.contains("://") {
        if let Some((_, path)) = url.split_once(':') {
            let path = path.trim_end_matches(".git");
            match path.split_once('/') {
                Some((owner, repo)) if !repo.contains('/') => {
                    return Ok((owner.to_string(), repo.to_string()));
                }
                _ => {}
            }
        }
    }

    if let Some(path_start) = url.find("github.com/") {
        let path = url[path_start + "github.com/".len()..].trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() >= 2 {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    Err(GitHubError::RepositoryNotFound {
        reason: format!("could not parse GitHub owner/repo from URL '{}'", url),
    }
    .into())
}

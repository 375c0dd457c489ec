//! GitHub Release management over the REST API

use crate::EnvConfig;
use crate::error::{GitHubError, Result};
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tokio_util::io::ReaderStream;
use url::Url;

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Release created or resolved on GitHub. Lives only for the current run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseData {
    /// Numeric release id
    pub id: u64,
    /// Asset upload URL template (`.../assets{?name,label}`)
    pub upload_url: String,
    /// Release page URL
    pub html_url: String,
}

/// Payload for `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReleaseRequest {
    /// Tag to create the release for
    pub tag_name: String,
    /// Release title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Commit or branch the tag is created from, if it doesn't exist yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
}

/// Operations the publisher needs from a release host
#[allow(async_fn_in_trait)]
pub trait ReleaseApi {
    /// Create a release
    async fn create_release(&self, request: &CreateReleaseRequest) -> Result<ReleaseData>;

    /// Look up an existing release by id
    async fn get_release(&self, release_id: u64) -> Result<ReleaseData>;

    /// Upload one file as a release asset, named after the file
    async fn upload_asset(&self, release: &ReleaseData, path: &Path) -> Result<()>;
}

/// Configuration for GitHub releases
#[derive(Debug, Clone)]
pub struct GitHubReleaseConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// GitHub token (from environment when `None`)
    pub token: Option<String>,
    /// REST API base URL
    pub api_url: String,
}

impl Default for GitHubReleaseConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// GitHub release manager
#[derive(Debug, Clone)]
pub struct GitHubReleaseManager {
    http: reqwest::Client,
    config: GitHubReleaseConfig,
    token: String,
}

/// rustls provider installation must happen once per process
static RUSTLS_INITIALIZED: OnceLock<()> = OnceLock::new();

impl GitHubReleaseManager {
    /// Create new GitHub release manager
    pub fn new(config: GitHubReleaseConfig, env_config: &EnvConfig) -> Result<Self> {
        RUSTLS_INITIALIZED.get_or_init(|| {
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                log::debug!("rustls crypto provider already installed");
            }
        });

        let token = config
            .token
            .clone()
            .or_else(|| env_config.get("GITHUB_TOKEN"))
            .or_else(|| env_config.get("GH_TOKEN"))
            .ok_or(GitHubError::MissingToken)?;

        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            config,
            token,
        })
    }

    fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.config.api_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo
        )
    }

    fn request(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

impl ReleaseApi for GitHubReleaseManager {
    async fn create_release(&self, request: &CreateReleaseRequest) -> Result<ReleaseData> {
        log::debug!("Creating release {:?}", request);

        let response = self
            .request(Method::POST, self.releases_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::CreateReleaseFailed {
                tag: request.tag_name.clone(),
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }
            .into());
        }

        Ok(response.json::<ReleaseData>().await?)
    }

    async fn get_release(&self, release_id: u64) -> Result<ReleaseData> {
        let response = self
            .request(
                Method::GET,
                format!("{}/{}", self.releases_url(), release_id),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::GetReleaseFailed {
                release_id,
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }
            .into());
        }

        Ok(response.json::<ReleaseData>().await?)
    }

    async fn upload_asset(&self, release: &ReleaseData, path: &Path) -> Result<()> {
        let asset = asset_name(path)?;
        let upload_failed = |reason: String| GitHubError::UploadFailed {
            asset: asset.clone(),
            reason,
        };

        // Bundles can be hundreds of megabytes; stream instead of buffering
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| upload_failed(e.to_string()))?;
        let size = file
            .metadata()
            .await
            .map_err(|e| upload_failed(e.to_string()))?
            .len();

        let mut url = upload_endpoint(&release.upload_url)?;
        url.query_pairs_mut().append_pair("name", &asset);

        let response = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, size)
            .body(Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await
            .map_err(|e| upload_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upload_failed(format!("{} {}", status, body)).into());
        }

        log::info!("Uploaded {} ({} bytes) to release {}", asset, size, release.id);
        Ok(())
    }
}

/// File name an artifact is uploaded under
pub fn asset_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| {
            GitHubError::UploadFailed {
                asset: path.display().to_string(),
                reason: "invalid artifact file name".to_string(),
            }
            .into()
        })
}

/// Strip the RFC 6570 suffix (`{?name,label}`) from an upload URL template
pub fn upload_endpoint(upload_url: &str) -> Result<Url> {
    let base = upload_url
        .split_once('{')
        .map_or(upload_url, |(base, _)| base);
    Url::parse(base).map_err(|source| {
        GitHubError::InvalidUploadUrl {
            url: upload_url.to_string(),
            source,
        }
        .into()
    })
}

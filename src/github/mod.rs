//! GitHub release creation and asset upload.

mod release;
mod release_manager;
mod repository;
mod templates;

pub use release::{
    ReleaseSettings, ReleaseTarget, ResolvedRelease, resolve_release, strip_tag_ref,
    upload_assets,
};
pub use release_manager::{
    CreateReleaseRequest, DEFAULT_API_URL, GitHubReleaseConfig, GitHubReleaseManager, ReleaseApi,
    ReleaseData, asset_name, upload_endpoint,
};
pub use repository::{GitHubRepository, parse_github_url};
pub use templates::{Template, VERSION_PLACEHOLDER, apply_templates, release_templates};

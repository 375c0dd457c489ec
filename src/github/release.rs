//! Release target selection, creation or reuse, and asset upload.

use super::release_manager::{CreateReleaseRequest, ReleaseApi, ReleaseData};
use super::templates::{Template, apply_templates};
use crate::error::{CliError, Result};
use std::path::PathBuf;

/// Release-related inputs for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseSettings {
    /// Tag to create (`refs/tags/` prefix already stripped)
    pub tag_name: Option<String>,
    /// Release title
    pub release_name: Option<String>,
    /// Release notes
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
    /// Commit the tag is created from
    pub commitish: Option<String>,
    /// Existing release to upload into; `0` means none
    pub release_id: u64,
}

/// Where assets should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// Create a new release from tag and name
    Create,
    /// Upload into an existing release
    Reuse(u64),
    /// Build only
    None,
}

/// Release resolved for the current run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRelease {
    /// Created during this run
    Created(ReleaseData),
    /// Looked up by id
    Reused(ReleaseData),
}

impl ResolvedRelease {
    /// Release data regardless of origin
    pub fn data(&self) -> &ReleaseData {
        match self {
            ResolvedRelease::Created(data) | ResolvedRelease::Reused(data) => data,
        }
    }
}

/// Strip a leading `refs/tags/` from a git ref
pub fn strip_tag_ref(tag: &str) -> String {
    tag.strip_prefix("refs/tags/").unwrap_or(tag).to_string()
}

impl ReleaseSettings {
    /// Tag and release name must be given together
    pub fn validate(&self) -> Result<()> {
        let tag = self.tag_name.as_deref().is_some_and(|t| !t.is_empty());
        let name = self.release_name.as_deref().is_some_and(|n| !n.is_empty());
        if tag != name {
            return Err(CliError::ConflictingArguments {
                arguments: vec!["tagName".to_string(), "releaseName".to_string()],
            }
            .into());
        }
        Ok(())
    }

    /// Tag takes precedence over an explicit release id
    pub fn target(&self) -> ReleaseTarget {
        match (&self.tag_name, &self.release_name) {
            (Some(tag), Some(name)) if !tag.is_empty() && !name.is_empty() => {
                ReleaseTarget::Create
            }
            _ if self.release_id != 0 => ReleaseTarget::Reuse(self.release_id),
            _ => ReleaseTarget::None,
        }
    }

    /// Creation payload with templates applied to tag, name and body
    pub fn create_request(&self, templates: &[Template]) -> Option<CreateReleaseRequest> {
        let tag = self.tag_name.as_deref()?;
        let name = self.release_name.as_deref()?;

        Some(CreateReleaseRequest {
            tag_name: apply_templates(templates, tag),
            name: apply_templates(templates, name),
            body: apply_templates(templates, &self.body),
            target_commitish: self.commitish.clone().filter(|c| !c.is_empty()),
            draft: self.draft,
            prerelease: self.prerelease,
        })
    }
}

/// Create or look up the release the settings point at
pub async fn resolve_release<A: ReleaseApi>(
    api: &A,
    settings: &ReleaseSettings,
    templates: &[Template],
) -> Result<Option<ResolvedRelease>> {
    match settings.target() {
        ReleaseTarget::Create => {
            let Some(request) = settings.create_request(templates) else {
                return Ok(None);
            };
            log::info!("Creating release {} ({})", request.name, request.tag_name);
            let release = api.create_release(&request).await?;
            log::info!("Created release {}", release.html_url);
            Ok(Some(ResolvedRelease::Created(release)))
        }
        ReleaseTarget::Reuse(id) => {
            log::info!("Using existing release {}", id);
            Ok(Some(ResolvedRelease::Reused(api.get_release(id).await?)))
        }
        ReleaseTarget::None => Ok(None),
    }
}

/// Upload artifacts one at a time, stopping at the first failure
pub async fn upload_assets<A: ReleaseApi>(
    api: &A,
    release: &ReleaseData,
    artifacts: &[PathBuf],
) -> Result<()> {
    for artifact in artifacts {
        log::info!("Uploading {}", artifact.display());
        api.upload_asset(release, artifact).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GitHubError, ReleaseError};
    use crate::github::templates::VERSION_PLACEHOLDER;
    use std::cell::RefCell;
    use std::path::Path;

    #[derive(Default)]
    struct FakeApi {
        created: RefCell<Vec<CreateReleaseRequest>>,
        uploads: RefCell<Vec<(u64, PathBuf)>>,
        fail_upload: bool,
    }

    fn release(id: u64) -> ReleaseData {
        ReleaseData {
            id,
            upload_url: format!(
                "https://uploads.github.com/repos/o/r/releases/{id}/assets{{?name,label}}"
            ),
            html_url: format!("https://github.com/o/r/releases/{id}"),
        }
    }

    impl ReleaseApi for FakeApi {
        async fn create_release(&self, request: &CreateReleaseRequest) -> Result<ReleaseData> {
            self.created.borrow_mut().push(request.clone());
            Ok(release(7))
        }

        async fn get_release(&self, release_id: u64) -> Result<ReleaseData> {
            Ok(release(release_id))
        }

        async fn upload_asset(&self, release: &ReleaseData, path: &Path) -> Result<()> {
            if self.fail_upload {
                return Err(GitHubError::UploadFailed {
                    asset: path.display().to_string(),
                    reason: "502 Bad Gateway".to_string(),
                }
                .into());
            }
            self.uploads
                .borrow_mut()
                .push((release.id, path.to_path_buf()));
            Ok(())
        }
    }

    fn create_settings() -> ReleaseSettings {
        ReleaseSettings {
            tag_name: Some("v__VERSION__".to_string()),
            release_name: Some("Release __VERSION__".to_string()),
            body: "see __VERSION__ notes".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_strip_tag_ref() {
        assert_eq!(strip_tag_ref("refs/tags/v1.0.0"), "v1.0.0");
        assert_eq!(strip_tag_ref("v1.0.0"), "v1.0.0");
    }

    #[test]
    fn test_tag_without_name_is_rejected() {
        let settings = ReleaseSettings {
            tag_name: Some("v1.0.0".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ReleaseError::Cli(CliError::ConflictingArguments { .. }))
        ));
    }

    #[test]
    fn test_target_selection() {
        assert_eq!(create_settings().target(), ReleaseTarget::Create);
        assert_eq!(
            ReleaseSettings {
                release_id: 42,
                ..Default::default()
            }
            .target(),
            ReleaseTarget::Reuse(42)
        );
        assert_eq!(ReleaseSettings::default().target(), ReleaseTarget::None);
        assert_eq!(
            ReleaseSettings {
                release_id: 42,
                ..create_settings()
            }
            .target(),
            ReleaseTarget::Create
        );
    }

    #[tokio::test]
    async fn test_templates_applied_before_create() {
        let api = FakeApi::default();
        let templates = vec![Template::new(VERSION_PLACEHOLDER, "1.2.3")];

        let resolved = resolve_release(&api, &create_settings(), &templates)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(resolved, ResolvedRelease::Created(_)));

        let created = api.created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].tag_name, "v1.2.3");
        assert_eq!(created[0].name, "Release 1.2.3");
        assert_eq!(created[0].body, "see 1.2.3 notes");
    }

    #[tokio::test]
    async fn test_reuse_existing_release_uploads_in_order() {
        let api = FakeApi::default();
        let settings = ReleaseSettings {
            release_id: 42,
            ..Default::default()
        };

        let resolved = resolve_release(&api, &settings, &[])
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(resolved, ResolvedRelease::Reused(_)));
        assert!(api.created.borrow().is_empty());

        let artifacts = vec![PathBuf::from("a.dmg"), PathBuf::from("b.app.tar.gz")];
        upload_assets(&api, resolved.data(), &artifacts)
            .await
            .unwrap();
        assert_eq!(
            *api.uploads.borrow(),
            vec![
                (42, PathBuf::from("a.dmg")),
                (42, PathBuf::from("b.app.tar.gz"))
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_failure_stops_early() {
        let api = FakeApi {
            fail_upload: true,
            ..Default::default()
        };
        let artifacts = vec![PathBuf::from("a.deb"), PathBuf::from("b.AppImage")];
        let err = upload_assets(&api, &release(1), &artifacts)
            .await
            .unwrap_err();
        match err {
            ReleaseError::GitHub(GitHubError::UploadFailed { asset, .. }) => {
                assert_eq!(asset, "a.deb")
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(api.uploads.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_no_target_resolves_nothing() {
        let api = FakeApi::default();
        let resolved = resolve_release(&api, &ReleaseSettings::default(), &[])
            .await
            .unwrap();
        assert!(resolved.is_none());
    }
}

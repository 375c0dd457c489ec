//! Post-process, release and upload for a finished build.
//!
//! The stages run strictly in order. Nothing is touched on disk or over the
//! network when the settings name no release target.

use crate::bundler::PostProcessor;
use crate::error::Result;
use crate::github::{
    ReleaseApi, ReleaseData, ReleaseSettings, ReleaseTarget, ResolvedRelease, Template,
    resolve_release, upload_assets,
};
use std::path::PathBuf;

/// What a publish run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Artifacts in their uploadable form, release ++ debug order
    pub artifacts: Vec<PathBuf>,
    /// Release the artifacts went to, if any
    pub release: Option<ResolvedRelease>,
}

impl PublishOutcome {
    /// Release created during this run; only these are reported as outputs
    pub fn created_release(&self) -> Option<&ReleaseData> {
        match &self.release {
            Some(ResolvedRelease::Created(data)) => Some(data),
            _ => None,
        }
    }
}

/// Publish already-built artifacts according to `settings`.
///
/// With no release target the artifacts are returned as built.
pub async fn publish_artifacts<A: ReleaseApi>(
    api: &A,
    settings: &ReleaseSettings,
    templates: &[Template],
    post_processor: &PostProcessor,
    artifacts: Vec<PathBuf>,
) -> Result<PublishOutcome> {
    if settings.target() == ReleaseTarget::None {
        log::info!("No tag or release id given, skipping upload");
        return Ok(PublishOutcome {
            artifacts,
            release: None,
        });
    }

    let artifacts = post_processor.apply(artifacts).await?;

    let Some(release) = resolve_release(api, settings, templates).await? else {
        return Ok(PublishOutcome {
            artifacts,
            release: None,
        });
    };

    upload_assets(api, release.data(), &artifacts).await?;

    Ok(PublishOutcome {
        artifacts,
        release: Some(release),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::CreateReleaseRequest;
    use std::cell::RefCell;
    use std::path::Path;

    #[derive(Default)]
    struct RecordingApi {
        calls: RefCell<Vec<String>>,
    }

    impl ReleaseApi for RecordingApi {
        async fn create_release(&self, request: &CreateReleaseRequest) -> Result<ReleaseData> {
            self.calls
                .borrow_mut()
                .push(format!("create {}", request.tag_name));
            Ok(ReleaseData {
                id: 9,
                upload_url: "https://uploads.example/assets{?name,label}".to_string(),
                html_url: "https://example/releases/9".to_string(),
            })
        }

        async fn get_release(&self, release_id: u64) -> Result<ReleaseData> {
            self.calls.borrow_mut().push(format!("get {}", release_id));
            Ok(ReleaseData {
                id: release_id,
                upload_url: "https://uploads.example/assets{?name,label}".to_string(),
                html_url: format!("https://example/releases/{}", release_id),
            })
        }

        async fn upload_asset(&self, release: &ReleaseData, path: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("upload {} {}", release.id, path.display()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_no_target_skips_everything() {
        let api = RecordingApi::default();
        let processor = PostProcessor::MacosAppArchive {
            app_name: "Demo".to_string(),
            version: "1.0.0".to_string(),
            arch: "x64".to_string(),
        };
        // Would fail to archive if post-processing ran
        let artifacts = vec![PathBuf::from("/missing/Demo.app")];

        let outcome = publish_artifacts(
            &api,
            &ReleaseSettings::default(),
            &[],
            &processor,
            artifacts.clone(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.artifacts, artifacts);
        assert!(outcome.release.is_none());
        assert!(api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_reuse_uploads_without_outputs() {
        let api = RecordingApi::default();
        let settings = ReleaseSettings {
            release_id: 42,
            ..Default::default()
        };

        let outcome = publish_artifacts(
            &api,
            &settings,
            &[],
            &PostProcessor::Passthrough,
            vec![PathBuf::from("a.deb"), PathBuf::from("b.AppImage")],
        )
        .await
        .unwrap();

        assert_eq!(
            *api.calls.borrow(),
            vec!["get 42", "upload 42 a.deb", "upload 42 b.AppImage"]
        );
        assert!(outcome.created_release().is_none());
    }

    #[tokio::test]
    async fn test_create_then_upload() {
        let api = RecordingApi::default();
        let settings = ReleaseSettings {
            tag_name: Some("v__VERSION__".to_string()),
            release_name: Some("Release __VERSION__".to_string()),
            ..Default::default()
        };
        let templates = vec![Template::new("__VERSION__", "1.2.3")];

        let outcome = publish_artifacts(
            &api,
            &settings,
            &templates,
            &PostProcessor::Passthrough,
            vec![PathBuf::from("a.msi")],
        )
        .await
        .unwrap();

        assert_eq!(*api.calls.borrow(), vec!["create v1.2.3", "upload 9 a.msi"]);
        assert_eq!(outcome.created_release().map(|r| r.id), Some(9));
    }
}

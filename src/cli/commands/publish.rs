//! Publish command: build, then release and upload.

use super::helpers::{build_artifacts, report_artifacts};
use crate::EnvConfig;
use crate::bundler::{Platform, PostProcessor};
use crate::cli::action::ActionOutputs;
use crate::cli::{PublishArgs, RuntimeConfig};
use crate::error::Result;
use crate::github::{
    DEFAULT_API_URL, GitHubReleaseConfig, GitHubReleaseManager, GitHubRepository, ReleaseTarget,
    release_templates,
};
use crate::publish::publish_artifacts;

/// Execute publish command
pub(super) async fn execute_publish(
    args: &PublishArgs,
    config: &RuntimeConfig,
    env_config: &EnvConfig,
) -> Result<i32> {
    // Tag/name pairing is checked before anything is built
    let settings = args.release_settings()?;
    settings.validate()?;

    let platform = Platform::current();
    let (builder, artifacts) = build_artifacts(&args.build, config, env_config, platform).await?;
    let outputs = ActionOutputs::from_env(env_config);

    if settings.target() == ReleaseTarget::None {
        config.warning_println("No tag name or release id given, skipping upload");
        outputs.set_artifact_paths(&artifacts)?;
        return Ok(0);
    }

    config.section("Publishing");
    let repository = GitHubRepository::detect(env_config, &args.build.project_path()).await?;
    config.verbose_println(&format!("Repository: {}", repository));

    let api = GitHubReleaseManager::new(
        GitHubReleaseConfig {
            owner: repository.owner,
            repo: repository.repo,
            token: None,
            api_url: env_config
                .get("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        },
        env_config,
    )?;

    let options = args.build.build_options()?;
    let post_processor =
        PostProcessor::for_platform(platform, builder.info(), options.target.as_deref());
    let templates = release_templates(builder.info());

    let outcome =
        publish_artifacts(&api, &settings, &templates, &post_processor, artifacts).await?;
    report_artifacts(config, "Uploaded artifacts:", &outcome.artifacts);

    if let Some(release) = outcome.created_release() {
        outputs.set("releaseId", &release.id.to_string())?;
        outputs.set("releaseUploadUrl", &release.upload_url)?;
        outputs.set("releaseHtmlUrl", &release.html_url)?;
    }
    outputs.set_artifact_paths(&outcome.artifacts)?;

    if let Some(release) = &outcome.release {
        config.success_println(&format!("Published to {}", release.data().html_url));
    }
    Ok(0)
}

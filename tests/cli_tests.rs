#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn bin() -> Command {
        let mut cmd = Command::cargo_bin("kodegen_bundler_tauri").unwrap();
        for var in [
            "INPUT_TAGNAME",
            "INPUT_RELEASENAME",
            "INPUT_RELEASEID",
            "INPUT_PROJECTPATH",
            "GITHUB_ACTIONS",
            "GITHUB_OUTPUT",
            "CARGO_TARGET_DIR",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    #[test]
    fn test_help_lists_commands() {
        bin()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("build"))
            .stdout(predicate::str::contains("publish"));
    }

    #[test]
    fn test_tag_without_release_name_fails_before_build() {
        let dir = tempfile::TempDir::new().unwrap();
        bin()
            .args(["publish", "--tag-name", "v1.0.0", "--project-path"])
            .arg(dir.path())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Conflicting arguments"));
    }

    #[test]
    fn test_inputs_read_from_environment() {
        bin()
            .arg("publish")
            .env("INPUT_RELEASENAME", "Release v1")
            .env("INPUT_TAGNAME", "")
            .env("INPUT_PROJECTPATH", "/definitely/not/here")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Conflicting arguments"));
    }

    #[test]
    fn test_error_annotation_in_actions() {
        bin()
            .args(["build", "--project-path", "/definitely/not/here"])
            .env("GITHUB_ACTIONS", "true")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("::error::"))
            .stdout(predicate::str::contains("does not exist"));
    }

    #[test]
    fn test_invalid_release_id() {
        bin()
            .args(["publish", "--release-id", "latest"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("releaseId must be a number"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_build_writes_artifact_output() {
        let project = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(project.path().join("src-tauri")).unwrap();
        std::fs::write(
            project.path().join("src-tauri/tauri.conf.json"),
            r#"{ "package": { "productName": "demo", "version": "2.0.0" } }"#,
        )
        .unwrap();
        std::fs::write(
            project.path().join("fake-tauri.sh"),
            "d=src-tauri/target/x86_64-unknown-linux-gnu/release/bundle/deb\nmkdir -p $d\ntouch $d/demo_2.0.0_amd64.deb\n",
        )
        .unwrap();
        let output_file = project.path().join("github-output");

        bin()
            .args([
                "build",
                "--tauri-script",
                "sh fake-tauri.sh",
                "--target",
                "x86_64-unknown-linux-gnu",
                "--project-path",
            ])
            .arg(project.path())
            .env("GITHUB_OUTPUT", &output_file)
            .assert()
            .success()
            .stdout(predicate::str::contains("demo_2.0.0_amd64.deb"));

        let outputs = std::fs::read_to_string(&output_file).unwrap();
        assert!(outputs.starts_with("artifactPaths=["));
        assert!(outputs.contains("demo_2.0.0_amd64.deb"));
    }
}

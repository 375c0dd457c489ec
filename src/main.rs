//! Kodegen Bundler Tauri - build a Tauri app and publish it to GitHub releases.
//!
//! Runs as a plain CLI or as a GitHub Actions step (inputs from `INPUT_*`,
//! outputs to `$GITHUB_OUTPUT`).

use kodegen_bundler_tauri::EnvConfig;
use kodegen_bundler_tauri::cli;
use kodegen_bundler_tauri::cli::{OutputManager, error_annotation};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let env = EnvConfig::from_env();
            let output = OutputManager::new(false, false, &env);
            output.error(&format!("Fatal error: {e}"));

            if env.is_github_actions() {
                println!("{}", error_annotation(&e.to_string()));
            }

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}

//! Publish command implementation.

use std::path::PathBuf;

use clap::Args;
use rtc_config::{CliSettings, Config, Representation};
use rtc_confluence::{
    ConfluenceClient, DryRunResult, PagePublisher, PublishAction, PublishConfig, PublishRequest,
    PublishResult,
};
use rtc_project::{ProjectFiles, ProjectLoader};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for publishing a readme.
#[derive(Args, Debug)]
pub(crate) struct PublishArgs {
    /// Atlassian account user name.
    #[arg(short, long, env = "RTC_USERNAME")]
    username: Option<String>,

    /// Atlassian API token.
    #[arg(short = 'k', long = "apikey", env = "RTC_APIKEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Confluence space key.
    #[arg(short, long, env = "RTC_SPACE")]
    space: Option<String>,

    /// Atlassian Cloud site name (`https://<company>.atlassian.net/wiki`).
    #[arg(short, long, env = "RTC_COMPANY")]
    company: Option<String>,

    /// Full wiki base URL (overrides --company).
    #[arg(long, env = "RTC_BASE_URL")]
    base_url: Option<String>,

    /// ID of the parent page.
    #[arg(short, long, env = "RTC_ANCESTOR")]
    ancestor: Option<String>,

    /// Path to the readme (default: readme.md in any case).
    #[arg(long)]
    readme: Option<PathBuf>,

    /// Path to the package manifest (default: package.json, then Cargo.toml).
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Page title (default: package name).
    #[arg(long)]
    title: Option<String>,

    /// Body representation: `storage` or `editor`.
    #[arg(long)]
    representation: Option<Representation>,

    /// Version message for the update.
    #[arg(short, long)]
    message: Option<String>,

    /// Preview changes without updating Confluence.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover readme2confluence.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is incomplete, the project files
    /// cannot be read, or Confluence rejects a request.
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        // Validate before touching files or the network
        let settings = config.require_confluence()?;

        let project = &config.project_resolved;
        let files = ProjectLoader::new(&project.dir)
            .readme(project.readme.clone())
            .manifest(project.manifest.clone())
            .title(project.title.clone())
            .load()?;
        output.info(&format!(
            "Publishing {} as \"{}\"",
            files.readme_path.display(),
            files.title
        ));
        if let Some(warning) = readme_warning(&files) {
            output.warning(&warning);
        }

        let client =
            ConfluenceClient::from_config(&settings.base_url, &settings.username, &settings.api_key);
        let publisher = PagePublisher::new(&client, PublishConfig::from(&settings));
        let request = self.request(&files);

        if self.dry_run {
            let result = publisher.dry_run(&request)?;
            print_dry_run_result(output, &result);
        } else {
            let result = publisher.publish(&request)?;
            print_publish_result(output, &result);
        }

        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_url: self.base_url.clone(),
            company: self.company.clone(),
            username: self.username.clone(),
            api_key: self.api_key.clone(),
            space: self.space.clone(),
            ancestor: self.ancestor.clone(),
            representation: self.representation,
            project_dir: None,
            readme: self.readme.clone(),
            manifest: self.manifest.clone(),
            title: self.title.clone(),
        }
    }

    fn request<'a>(&'a self, files: &'a ProjectFiles) -> PublishRequest<'a> {
        PublishRequest {
            title: &files.title,
            readme: &files.readme,
            message: self.message.as_deref(),
        }
    }
}

/// Warning for a readme that would publish a page with only the banner.
fn readme_warning(files: &ProjectFiles) -> Option<String> {
    files.readme.trim().is_empty().then(|| {
        format!(
            "Warning: {} is empty, the page will only contain the banner",
            files.readme_path.display()
        )
    })
}

fn print_dry_run_result(output: &Output, result: &DryRunResult) {
    output.highlight("\n[DRY RUN] No changes made.");

    match (&result.existing_page_id, result.current_version) {
        (Some(id), Some(version)) => output.info(&format!(
            "Would update page \"{}\" ({id}) from v{version} to v{}",
            result.title,
            result.next_version()
        )),
        _ => output.info(&format!("Would create page \"{}\"", result.title)),
    }
    output.info(&format!(
        "Body: {} bytes ({})",
        result.html.len(),
        result.representation
    ));
}

fn print_publish_result(output: &Output, result: &PublishResult) {
    match result.action {
        PublishAction::Created => output.info(&format!("Created page \"{}\"", result.page.title)),
        PublishAction::Updated { previous_version } => output.info(&format!(
            "Updated page \"{}\" from v{previous_version} to v{}",
            result.page.title, result.page.version.number
        )),
    }
    output.highlight(&result.url);
    output.success("Success!");
}

//! Release publishing
//!
//! Publishing runs eight strictly sequential steps: pre-flight checks,
//! commit resolution, request construction, release creation, response
//! parsing, asset uploads, tagging and the tag push. The first failure aborts
//! the run. Nothing is rolled back: when a later step fails after the release
//! was created, the error log carries the release URL so the run can be
//! finished by hand.

use tracing::{debug, error, info, warn};

use crate::config::{validate_publish_target, Config, ReleaseConfiguration};
use crate::error::{RemoteError, Result};
use crate::http::{HttpGateway, HttpRequest};
use crate::types::{release_tag, PublishReport, ReleaseAsset, ReleaseRequest, ReleaseResponse, UploadedAsset};
use crate::vcs::VersionControl;

use super::preflight::PreflightValidator;

/// Status the release API answers a successful creation with
const CREATED: u16 = 201;

/// Settings for a publish run
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// URL of the releases collection
    pub releases_endpoint: String,
    /// Remote the tag is pushed to
    pub remote: String,
    /// Treat non-2xx asset uploads as failures
    pub check_upload_status: bool,
    /// Stop after building the request
    pub dry_run: bool,
}

impl PublishOptions {
    /// Derive options from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            releases_endpoint: validate_publish_target(config)?,
            remote: config.git.remote.clone(),
            check_upload_status: config.github.check_upload_status,
            dry_run: false,
        })
    }

    /// Set dry run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Creates the remote release, uploads assets, then tags and pushes
pub struct ReleasePublisher<'a, V, H>
where
    V: VersionControl + ?Sized,
    H: HttpGateway + ?Sized,
{
    vcs: &'a V,
    http: &'a H,
    options: PublishOptions,
}

impl<'a, V, H> ReleasePublisher<'a, V, H>
where
    V: VersionControl + ?Sized,
    H: HttpGateway + ?Sized,
{
    pub fn new(vcs: &'a V, http: &'a H, options: PublishOptions) -> Self {
        Self { vcs, http, options }
    }

    /// Run the publish workflow for `version` with the given assets
    pub fn publish(
        &self,
        config: &ReleaseConfiguration,
        version: &str,
        assets: &[ReleaseAsset],
    ) -> Result<PublishReport> {
        let start = std::time::Instant::now();

        PreflightValidator::new(self.vcs).validate(config)?;

        let commit = self.vcs.head_commit_hash()?;
        info!(version, commit = %commit, "publishing release");

        let request = ReleaseRequest::for_version(version, &commit);
        let mut report = PublishReport::new(version, &commit);

        if self.options.dry_run {
            info!(
                endpoint = %self.options.releases_endpoint,
                tag = %request.tag_name,
                assets = assets.len(),
                "dry run, release not created"
            );
            report.dry_run = true;
            return Ok(report);
        }

        let release = self.create_release(&request)?;
        report.release_url = release.html_url.clone();
        report.assets_url = Some(release.assets_url.clone());

        for asset in assets {
            self.upload_asset(&release, asset)
                .inspect_err(|e| self.log_partial_failure(&release, "asset upload", e))?;
            report.uploaded.push(UploadedAsset::from(asset));
        }

        let tag = release_tag(version);
        let message = format!("Release {}", tag);
        self.vcs
            .create_annotated_tag(&tag, &message)
            .inspect_err(|e| self.log_partial_failure(&release, "tagging", e))?;
        info!(tag = %tag, "tagged release commit");

        self.vcs
            .push_tag(&self.options.remote, &tag)
            .map_err(|e| {
                self.log_partial_failure(&release, "tag push", &e);
                RemoteError::TagPushFailed {
                    tag: tag.clone(),
                    source: Box::new(e),
                }
            })?;
        report.tag_pushed = true;
        info!(
            tag = %tag,
            remote = %self.options.remote,
            duration_ms = start.elapsed().as_millis(),
            "release published"
        );

        Ok(report)
    }

    fn create_release(&self, request: &ReleaseRequest) -> Result<ReleaseResponse> {
        let body = serde_json::to_vec(request)?;
        debug!(endpoint = %self.options.releases_endpoint, "creating release");

        let response = self
            .http
            .request(HttpRequest::post_json(&self.options.releases_endpoint, body))?;

        if response.status != CREATED {
            return Err(RemoteError::UnexpectedStatus {
                operation: "creating the release".to_string(),
                status: response.status,
                body: response.body,
            }
            .into());
        }

        let release: ReleaseResponse = serde_json::from_str(&response.body)
            .map_err(|e| RemoteError::MalformedResponse(format!("missing assets_url: {}", e)))?;

        match url::Url::parse(&release.assets_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(RemoteError::MalformedResponse(format!(
                    "assets_url is not a URL: '{}'",
                    release.assets_url
                ))
                .into())
            }
        }

        info!(
            id = ?release.id,
            url = ?release.html_url,
            "release created"
        );
        Ok(release)
    }

    fn upload_asset(&self, release: &ReleaseResponse, asset: &ReleaseAsset) -> Result<()> {
        debug!(name = %asset.name, size = asset.bytes.len(), "uploading asset");
        let response = self
            .http
            .request(HttpRequest::post_bytes(&release.assets_url, asset.bytes.clone()))?;

        if !response.is_success() {
            if self.options.check_upload_status {
                return Err(RemoteError::UnexpectedStatus {
                    operation: format!("uploading asset '{}'", asset.name),
                    status: response.status,
                    body: response.body,
                }
                .into());
            }
            warn!(
                name = %asset.name,
                status = response.status,
                "asset upload was not accepted, continuing"
            );
            return Ok(());
        }

        info!(name = %asset.name, status = response.status, "uploaded asset");
        Ok(())
    }

    fn log_partial_failure(
        &self,
        release: &ReleaseResponse,
        step: &str,
        err: &crate::error::TagshipError,
    ) {
        error!(
            step,
            release = ?release.html_url.as_deref().unwrap_or(&release.assets_url),
            error = %err,
            "release was created but publishing did not complete"
        );
    }
}

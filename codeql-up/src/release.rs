use crate::config::ReleaseConfig;
use crate::error::{InstallError, Result};
use crate::platform::Platform;
use crate::progress::ProgressSink;
use std::time::Duration;

pub struct ReleaseClient {
    http: reqwest::Client,
    config: ReleaseConfig,
}

impl ReleaseClient {
    pub fn new(config: ReleaseConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("codeql-up")
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the latest release tag from the releases API.
    pub async fn fetch_latest_tag(&self) -> Result<String> {
        let response = self
            .http
            .get(&self.config.api_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        parse_tag_name(&body).ok_or(InstallError::TagNotFound)
    }

    /// URL of the distribution archive for `version` on `platform`.
    pub fn download_url(&self, version: &str, platform: Platform) -> String {
        format!(
            "{}/v{}/codeql-{}.zip",
            self.config.download_base,
            version,
            platform.archive_suffix()
        )
    }

    /// Download the archive at `url` to a temporary file, streaming to disk.
    /// The file is removed on drop, so an aborted download leaves nothing
    /// behind.
    pub async fn download_archive(
        &self,
        url: &str,
        progress: &dyn ProgressSink,
    ) -> Result<tempfile::NamedTempFile> {
        if progress.is_cancelled() {
            return Err(InstallError::Cancelled);
        }

        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut temp_file = tempfile::Builder::new()
            .prefix("codeql")
            .suffix(".zip")
            .tempfile()?;

        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;
        use std::io::Write;

        while let Some(chunk) = stream.next().await {
            if progress.is_cancelled() {
                return Err(InstallError::Cancelled);
            }
            let chunk = chunk?;
            temp_file.write_all(&chunk)?;
        }
        temp_file.flush()?;

        Ok(temp_file)
    }
}

/// Locate the release tag in a releases API response.
///
/// Scans for the `"tag_name"` key instead of parsing the full response
/// shape; only this one field matters, and the match tolerates an optional
/// leading `v` on the tag.
pub(crate) fn parse_tag_name(body: &str) -> Option<String> {
    let key = "\"tag_name\"";
    let after_key = &body[body.find(key)? + key.len()..];
    let rest = after_key.trim_start().strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let tag = &rest[..rest.find('"')?];
    let version = tag.strip_prefix('v').unwrap_or(tag);
    (!version.is_empty()).then(|| version.to_string())
}

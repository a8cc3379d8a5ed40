/*
 * This file is part of release-publisher, licensed under the MIT License (MIT).
 *
 * Copyright (c) 2024 easybill GmbH
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::Context;
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::Configuration;
use crate::entity::{CreateReleaseRequest, CreatedRelease};
use crate::error::PublishError;

/// An accessor for the GitHub release api of the configured repository. Only the calls that are
/// needed to publish a release asset are exposed.
pub(crate) struct GitHubAccessor {
    http_client: Client,
    token: SecretString,
    configuration: Configuration,
}

impl GitHubAccessor {
    /// Constructs a new GitHub accessor which authenticates all requests using the given token.
    ///
    /// # Arguments
    /// * `configuration` - The configuration holding the target repository and api urls.
    /// * `token` - The bearer token to send with each request.
    pub fn new(configuration: Configuration, token: SecretString) -> anyhow::Result<Self> {
        let user_agent = format!("release-publisher/{}", env!("CARGO_PKG_VERSION"));
        let http_client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("unable to build http client")?;
        Ok(Self {
            http_client,
            token,
            configuration,
        })
    }

    /// Creates a new release for the given tag. The response body is parsed as json regardless of
    /// the response status, an error is only returned if it contains no release id.
    ///
    /// # Arguments
    /// * `tag_name` - The name of the existing tag to create the release for.
    pub async fn create_release(&self, tag_name: &str) -> Result<CreatedRelease, PublishError> {
        let release_url = self.configuration.release_collection_url()?;
        debug!("Requesting release creation for tag {} at {}", tag_name, release_url);

        let response = self
            .http_client
            .post(release_url)
            .header(AUTHORIZATION, self.authorization_header())
            .json(&CreateReleaseRequest { tag_name })
            .send()
            .await?;
        let status = response.status();
        warn_on_unsuccessful_status("release creation", status);

        let response_body = response.text().await?;
        let parsed_body: Value = serde_json::from_str(&response_body)
            .map_err(|source| PublishError::MalformedResponse { status, source })?;
        CreatedRelease::from_response(parsed_body)
    }

    /// Get the url to which an asset with the given name is uploaded for the given release.
    ///
    /// # Arguments
    /// * `release_id` - The id of the release to attach the asset to.
    /// * `asset_name` - The name of the asset.
    pub fn asset_upload_url(&self, release_id: u64, asset_name: &str) -> Result<Url, PublishError> {
        self.configuration.asset_upload_url(release_id, asset_name)
    }

    /// Uploads the given content to the given asset upload url and returns the raw response text.
    ///
    /// # Arguments
    /// * `upload_url` - The upload url, see `asset_upload_url`.
    /// * `content` - The raw bytes of the asset.
    pub async fn upload_release_asset(
        &self,
        upload_url: Url,
        content: Vec<u8>,
    ) -> Result<String, PublishError> {
        debug!("Uploading {} bytes to {}", content.len(), upload_url);
        let response = self
            .http_client
            .post(upload_url)
            .header(AUTHORIZATION, self.authorization_header())
            .header(CONTENT_TYPE, &self.configuration.asset_content_type)
            .body(content)
            .send()
            .await?;
        warn_on_unsuccessful_status("asset upload", response.status());

        let response_text = response.text().await?;
        Ok(response_text)
    }

    fn authorization_header(&self) -> String {
        format!("bearer {}", self.token.expose_secret())
    }
}

/// Non-success statuses are not treated as errors, the operator decides based on the printed response.
fn warn_on_unsuccessful_status(action: &str, status: StatusCode) {
    if !status.is_success() {
        warn!("GitHub responded to {} with status {}", action, status);
    }
}

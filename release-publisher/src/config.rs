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
use std::path::Path;

use anyhow::{bail, Context};
use reqwest::Url;
use serde::Deserialize;
use tokio::fs;

use crate::cli::Cli;
use crate::error::PublishError;

/// The configuration of the release publisher. Every option is optional in the configuration
/// file and falls back to the defaults of the APOC procedures repository.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Configuration {
    /// The owner (user or organization) of the repository to publish the release to.
    pub repository_owner: String,
    /// The name of the repository to publish the release to.
    pub repository_name: String,
    /// The base url of the GitHub REST api.
    pub api_base_url: String,
    /// The base url of the GitHub upload api.
    pub upload_base_url: String,
    /// The content type that is sent along with the uploaded asset.
    pub asset_content_type: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            repository_owner: String::from("neo4j-contrib"),
            repository_name: String::from("neo4j-apoc-procedures"),
            api_base_url: String::from("https://api.github.com"),
            upload_base_url: String::from("https://uploads.github.com"),
            asset_content_type: String::from("application/java-archive"),
        }
    }
}

impl Configuration {
    /// Loads the configuration from the given file path, returning an error if the file reading or toml parsing fails.
    ///
    /// # Arguments
    /// * `file_path` - The path to load the configuration from.
    pub async fn load_from_file(file_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_path = file_path.as_ref();
        let toml_file_content = fs::read_to_string(file_path)
            .await
            .with_context(|| format!("unable to read configuration {}", file_path.display()))?;
        let parsed_configuration: Configuration = toml::from_str(&toml_file_content)
            .with_context(|| format!("unable to parse configuration {}", file_path.display()))?;
        Ok(parsed_configuration)
    }

    /// Replaces the configured values with the ones explicitly provided on the command line.
    ///
    /// # Arguments
    /// * `cli` - The parsed command line options.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(owner) = &cli.repository_owner {
            self.repository_owner = owner.clone();
        }
        if let Some(name) = &cli.repository_name {
            self.repository_name = name.clone();
        }
        if let Some(content_type) = &cli.asset_content_type {
            self.asset_content_type = content_type.clone();
        }
    }

    /// Validates that the configuration options are all set correctly for the publisher to function.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.repository_owner.trim().is_empty() {
            bail!("repository owner must not be empty")
        }
        if self.repository_name.trim().is_empty() {
            bail!("repository name must not be empty")
        }
        if self.asset_content_type.trim().is_empty() {
            bail!("asset content type must not be empty")
        }

        validate_base_url(&self.api_base_url)?;
        validate_base_url(&self.upload_base_url)?;
        Ok(())
    }

    /// Get the url of the releases collection of the configured repository.
    pub fn release_collection_url(&self) -> Result<Url, PublishError> {
        extend_base_url(
            &self.api_base_url,
            &[
                "repos",
                &self.repository_owner,
                &self.repository_name,
                "releases",
            ],
        )
    }

    /// Get the url to which an asset with the given name can be uploaded for the given release.
    ///
    /// # Arguments
    /// * `release_id` - The id of the release to attach the asset to.
    /// * `asset_name` - The name of the asset, passed as the `name` query parameter.
    pub fn asset_upload_url(&self, release_id: u64, asset_name: &str) -> Result<Url, PublishError> {
        let release_id = release_id.to_string();
        let mut upload_url = extend_base_url(
            &self.upload_base_url,
            &[
                "repos",
                &self.repository_owner,
                &self.repository_name,
                "releases",
                &release_id,
                "assets",
            ],
        )?;
        upload_url
            .query_pairs_mut()
            .clear()
            .append_pair("name", asset_name);
        Ok(upload_url)
    }
}

/// Checks that the given url is an absolute http(s) url that can be extended with path segments.
fn validate_base_url(url: &str) -> anyhow::Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("invalid base url {}", url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("invalid base url {}: scheme must be http or https", url)
    }
    if parsed.cannot_be_a_base() {
        bail!("invalid base url {}: cannot be used as a base", url)
    }

    Ok(())
}

/// Appends the given path segments to the given base url.
fn extend_base_url(base_url: &str, segments: &[&str]) -> Result<Url, PublishError> {
    let invalid_url = || PublishError::InvalidUrl {
        url: base_url.to_string(),
    };
    let mut url = Url::parse(base_url).map_err(|_| invalid_url())?;
    url.path_segments_mut()
        .map_err(|_| invalid_url())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn default_release_collection_url() {
        let configuration = Configuration::default();
        let url = configuration.release_collection_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/neo4j-contrib/neo4j-apoc-procedures/releases"
        );
    }

    #[test]
    fn default_asset_upload_url() {
        let configuration = Configuration::default();
        let url = configuration.asset_upload_url(123, "app.jar").unwrap();
        assert_eq!(
            url.as_str(),
            "https://uploads.github.com/repos/neo4j-contrib/neo4j-apoc-procedures/releases/123/assets?name=app.jar"
        );
    }

    #[test]
    fn base_url_with_path_prefix_is_kept() {
        let configuration = Configuration {
            api_base_url: String::from("https://github.example.com/api/v3/"),
            ..Configuration::default()
        };
        let url = configuration.release_collection_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.example.com/api/v3/repos/neo4j-contrib/neo4j-apoc-procedures/releases"
        );
    }

    #[test]
    fn asset_name_is_encoded_in_query() {
        let configuration = Configuration::default();
        let url = configuration
            .asset_upload_url(7, "apoc 4.4&all.jar")
            .unwrap();
        assert_eq!(url.query(), Some("name=apoc+4.4%26all.jar"));
    }

    #[test]
    fn non_base_url_is_rejected() {
        let configuration = Configuration {
            upload_base_url: String::from("mailto:releases@example.com"),
            ..Configuration::default()
        };
        assert!(matches!(
            configuration.asset_upload_url(1, "app.jar"),
            Err(PublishError::InvalidUrl { .. })
        ));
        assert!(configuration.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(Configuration::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_values() {
        let configuration = Configuration {
            repository_owner: String::from("  "),
            ..Configuration::default()
        };
        assert!(configuration.validate().is_err());

        let configuration = Configuration {
            asset_content_type: String::new(),
            ..Configuration::default()
        };
        assert!(configuration.validate().is_err());

        let configuration = Configuration {
            api_base_url: String::from("ftp://api.github.com"),
            ..Configuration::default()
        };
        assert!(configuration.validate().is_err());
    }

    #[tokio::test]
    async fn load_partial_configuration_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "repository_owner = \"neo4j\"").unwrap();
        writeln!(file, "upload_base_url = \"http://localhost:8080\"").unwrap();

        let configuration = Configuration::load_from_file(file.path()).await.unwrap();
        assert_eq!(configuration.repository_owner, "neo4j");
        assert_eq!(configuration.upload_base_url, "http://localhost:8080");
        assert_eq!(configuration.repository_name, "neo4j-apoc-procedures");
        assert_eq!(configuration.asset_content_type, "application/java-archive");
    }

    #[tokio::test]
    async fn load_invalid_configuration_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "repository_owner = [").unwrap();
        assert!(Configuration::load_from_file(file.path()).await.is_err());
    }

    #[test]
    fn command_line_overrides_configured_values() {
        let cli = Cli::try_parse_from([
            "release-publisher",
            "--repo-owner",
            "neo4j",
            "--content-type",
            "application/octet-stream",
            "4.4.0.1",
            "apoc.jar",
        ])
        .unwrap();

        let mut configuration = Configuration::default();
        configuration.apply_overrides(&cli);
        assert_eq!(configuration.repository_owner, "neo4j");
        assert_eq!(configuration.repository_name, "neo4j-apoc-procedures");
        assert_eq!(configuration.asset_content_type, "application/octet-stream");
    }
}

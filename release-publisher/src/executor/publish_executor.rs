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

use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use tokio::fs;

use crate::accessor::github_accessor::GitHubAccessor;
use crate::error::PublishError;

/// Creates a release for the given tag and uploads the given file as asset to it. The release
/// response, the upload url and the upload response are written to the given output.
///
/// Note that the release is not removed again if reading or uploading the asset fails.
///
/// # Arguments
/// * `github_accessor` - The accessor for the release api of the target repository.
/// * `tag_name` - The name of the existing tag to create the release for.
/// * `file_path` - The path of the file to upload.
/// * `output` - The target for the operator facing output.
pub async fn publish_release_asset(
    github_accessor: &GitHubAccessor,
    tag_name: &str,
    file_path: &Path,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    info!("Creating release for tag {}...", tag_name);
    let release = github_accessor.create_release(tag_name).await?;
    writeln!(output, "{}", serde_json::to_string_pretty(&release.raw)?)?;
    info!("Created release {} for tag {}", release.id, tag_name);

    let asset_content = fs::read(file_path)
        .await
        .map_err(|source| PublishError::AssetRead {
            path: file_path.to_path_buf(),
            source,
        })?;
    let asset_name = asset_name_of(file_path)?;

    let upload_url = github_accessor.asset_upload_url(release.id, &asset_name)?;
    writeln!(output, "{}", upload_url)?;
    info!(
        "Uploading {} ({} bytes) to release {}...",
        asset_name,
        asset_content.len(),
        release.id
    );
    let upload_response = github_accessor
        .upload_release_asset(upload_url, asset_content)
        .await?;
    writeln!(output, "{}", upload_response)?;

    Ok(())
}

/// Get the name of the asset for the given path, which is the final component of it. Names that
/// are not valid UTF-8 are rejected instead of being converted lossily.
fn asset_name_of(file_path: &Path) -> Result<String, PublishError> {
    file_path
        .file_name()
        .and_then(|name| name.to_str())
        .map(String::from)
        .ok_or_else(|| PublishError::InvalidAssetPath {
            path: PathBuf::from(file_path),
        })
}

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
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The errors that can occur while publishing a release asset.
#[derive(Debug, Error)]
pub(crate) enum PublishError {
    /// The release creation response did not contain a numeric release id, usually because GitHub
    /// answered with an error payload (for example bad credentials or an unknown tag).
    #[error("release creation response contains no release id: {response}")]
    MissingReleaseId {
        /// The full json response returned by the api.
        response: serde_json::Value,
    },
    /// The release creation response body is not valid json.
    #[error("release creation response (status {status}) is not valid json: {source}")]
    MalformedResponse {
        status: reqwest::StatusCode,
        #[source]
        source: serde_json::Error,
    },
    /// The asset file could not be read from disk.
    #[error("unable to read asset file {}: {source}", path.display())]
    AssetRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The asset path has no final component, or it is not valid UTF-8, so it cannot be used as the asset name.
    #[error("unable to derive an asset name from path {}", path.display())]
    InvalidAssetPath { path: PathBuf },
    /// A configured base url cannot be extended with path segments.
    #[error("url {url} cannot be used as a base url")]
    InvalidUrl { url: String },
    /// The request could not be sent or the response body could not be read.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

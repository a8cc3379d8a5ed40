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
use serde::Serialize;
use serde_json::Value;

use crate::error::PublishError;

/// The request body sent to the GitHub api to create a new release.
#[derive(Serialize, Clone, Debug)]
pub(crate) struct CreateReleaseRequest<'a> {
    /// The name of the existing tag to create the release for.
    pub tag_name: &'a str,
}

/// A release that was created on GitHub. Only the id is extracted from the response, the
/// full json payload is kept for display purposes.
#[derive(Clone, Debug)]
pub(crate) struct CreatedRelease {
    /// The id of the release, used to address the asset upload.
    pub id: u64,
    /// The full json response returned by the api.
    pub raw: Value,
}

impl CreatedRelease {
    /// Extracts the release information from the given api response, returning an error if the
    /// response has no numeric `id` field.
    ///
    /// # Arguments
    /// * `response` - The parsed json body of the release creation response.
    pub fn from_response(response: Value) -> Result<Self, PublishError> {
        match response.get("id").and_then(Value::as_u64) {
            Some(id) => Ok(Self { id, raw: response }),
            None => Err(PublishError::MissingReleaseId { response }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_release_request_serializes_tag_name_only() {
        let request = CreateReleaseRequest { tag_name: "4.4.0.1" };
        let serialized = serde_json::to_value(&request).unwrap();
        assert_eq!(serialized, json!({ "tag_name": "4.4.0.1" }));
    }

    #[test]
    fn created_release_keeps_full_response() {
        let response = json!({ "id": 123, "tag_name": "4.4.0.1", "draft": false });
        let release = CreatedRelease::from_response(response.clone()).unwrap();
        assert_eq!(release.id, 123);
        assert_eq!(release.raw, response);
    }

    #[test]
    fn error_payload_without_id_is_rejected() {
        let response = json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        });
        let error = CreatedRelease::from_response(response.clone()).unwrap_err();
        match error {
            PublishError::MissingReleaseId { response: returned } => assert_eq!(returned, response),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let error = CreatedRelease::from_response(json!({ "id": "123" })).unwrap_err();
        assert!(matches!(error, PublishError::MissingReleaseId { .. }));
    }
}

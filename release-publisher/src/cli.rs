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

use std::path::PathBuf;
use std::process::exit;

use clap::error::ErrorKind;
use clap::Parser;

/// Creates a GitHub release for an existing tag and uploads a single asset to it.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub(crate) struct Cli {
    /// The name of the existing tag to create the release for.
    pub tag_name: String,
    /// The path of the file to upload as release asset.
    pub file_path: PathBuf,
    /// The token used to authenticate against the GitHub api.
    #[arg(
        long = "token",
        env = "GITHUB_TOKEN",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub token: String,
    /// The path where the optional configuration file is located.
    #[arg(short = 'c', long = "config-path", env = "RELEASE_PUBLISHER_CONFIG_PATH")]
    pub configuration_path: Option<PathBuf>,
    /// Overrides the owner of the repository to publish the release to.
    #[arg(long = "repo-owner")]
    pub repository_owner: Option<String>,
    /// Overrides the name of the repository to publish the release to.
    #[arg(long = "repo-name")]
    pub repository_name: Option<String>,
    /// Overrides the content type sent along with the uploaded asset.
    #[arg(long = "content-type")]
    pub asset_content_type: Option<String>,
}

impl Cli {
    /// Parses the command line arguments. If they are missing or invalid the usage is printed
    /// to stdout and the process exits with status 1, help and version requests exit normally.
    pub fn parse_or_usage() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => {
                    println!("{}", err.render());
                    exit(1)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_arguments() {
        let cli = Cli::try_parse_from([
            "release-publisher",
            "--token",
            "secret",
            "4.4.0.1",
            "build/out/app.jar",
        ])
        .unwrap();
        assert_eq!(cli.tag_name, "4.4.0.1");
        assert_eq!(cli.file_path, PathBuf::from("build/out/app.jar"));
        assert_eq!(cli.token, "secret");
        assert!(cli.configuration_path.is_none());
    }

    #[test]
    fn missing_file_argument_is_rejected() {
        let err = Cli::try_parse_from(["release-publisher", "4.4.0.1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_all_arguments_is_rejected() {
        let err = Cli::try_parse_from(["release-publisher"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}

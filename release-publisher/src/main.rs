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
use std::process::exit;

use anyhow::Context;
use env_logger::Env;
use log::{error, info, warn};
use secrecy::SecretString;

use crate::accessor::github_accessor::GitHubAccessor;
use crate::cli::Cli;
use crate::config::Configuration;
use crate::executor::publish_executor::publish_release_asset;

mod accessor;
mod cli;
pub(crate) mod config;
pub(crate) mod entity;
pub(crate) mod error;
pub(crate) mod executor;

const GIT_SHA: &str = env!("GIT_HASH");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse the arguments first, missing arguments print the usage and exit before anything else happens
    let cli = Cli::parse_or_usage();

    // initializes the logger, using the "info" level if the RUST_LOG environment variable isn't set
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_module_path(false)
        .format_target(false)
        .format_timestamp_secs()
        .try_init()
        .context("unable to initialize logging")?;
    info!(
        "Running release-publisher version {} (git commit {})",
        VERSION, GIT_SHA
    );

    // execute the release publishing and display the error message if an error occurred
    if let Err(err) = run(cli).await {
        error!("Issue occurred while publishing release: {:#}", err);
        exit(1)
    }

    Ok(())
}

/// Loads the configuration and publishes the release asset described by the given command line.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut configuration = match &cli.configuration_path {
        Some(configuration_path) => Configuration::load_from_file(configuration_path).await?,
        None => Configuration::default(),
    };
    configuration.apply_overrides(&cli);
    configuration
        .validate()
        .context("issue detected while validating configuration")?;
    info!(
        "Publishing to repository {}/{}",
        configuration.repository_owner, configuration.repository_name
    );

    if cli.token.is_empty() {
        warn!("No GitHub token provided, requests will most likely be rejected");
    }
    let token = SecretString::from(cli.token);
    let github_accessor = GitHubAccessor::new(configuration, token)?;

    let mut stdout = io::stdout().lock();
    publish_release_asset(&github_accessor, &cli.tag_name, &cli.file_path, &mut stdout).await
}

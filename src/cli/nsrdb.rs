use clap::Parser;
use reqwest::Url;

use crate::{api::nsrdb, prelude::*};

#[derive(Parser)]
pub struct NsrdbArgs {
    /// NREL developer API key.
    #[clap(long = "nsrdb-api-key", env = "NSRDB_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Email address the API key is registered with.
    #[clap(long = "nsrdb-api-email", env = "NSRDB_API_EMAIL")]
    email: String,

    #[clap(
        long = "nsrdb-base-url",
        env = "NSRDB_BASE_URL",
        default_value = "https://developer.nrel.gov"
    )]
    base_url: Url,

    /// The downloads take a while, especially under a rate limit.
    #[clap(long = "nsrdb-timeout", env = "NSRDB_TIMEOUT", default_value = "2min")]
    timeout: humantime::Duration,
}

impl NsrdbArgs {
    pub fn new_client(&self) -> Result<nsrdb::Client> {
        nsrdb::Client::new(
            self.base_url.clone(),
            self.api_key.clone(),
            self.email.clone(),
            self.timeout.into(),
        )
    }
}

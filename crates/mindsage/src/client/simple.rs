use crate::client::base::{BaseClient, Config};
use mindsage_http::{BaseHttpClient, HttpClient};

pub struct SimpleClient<H = HttpClient> {
    config: Config,
    http_client: H,
}

impl SimpleClient {
    pub fn new(config: Config) -> Result<Self, mindsage_http::Error> {
        let http_client = HttpClient::new(config.timeout)?;
        Ok(Self { config, http_client })
    }
}

impl<H: BaseHttpClient> SimpleClient<H> {
    /// Uses a custom transport, e.g. a preconfigured or scripted one.
    #[must_use]
    pub fn with_http_client(config: Config, http_client: H) -> Self {
        Self { config, http_client }
    }
}

impl<H: BaseHttpClient> BaseClient for SimpleClient<H> {
    type Http = H;

    fn get_http_client(&self) -> &H {
        &self.http_client
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

use std::future::Future;

use bytes::Bytes;
use eyre::{Context as _, Result};
use http_body_util::{BodyExt, Empty};
use hyper::{header::USER_AGENT, Method, Request, StatusCode, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client as HyperClient},
    rt::TokioExecutor,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub use self::response::ProfilePage;

mod response;

static MY_USER_AGENT: &str = env!("CARGO_PKG_NAME");

/// Bytes that are escaped when a player id is put into the url path.
/// Sub-delimiters and `/` are kept as they are.
const PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

type InnerClient = HyperClient<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// Anything that can hand out profile pages.
pub trait ProfileSource: Send + Sync + 'static {
    /// Returns `None` if the page was not served with status 200.
    fn fetch_profile(&self, id: &str)
        -> impl Future<Output = Result<Option<ProfilePage>>> + Send;
}

pub struct Client {
    client: InnerClient,
    base_url: Box<str>,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);

        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())
            .context("failed to configure TLS")?
            .https_or_http()
            .enable_all_versions()
            .wrap_connector(http);

        let client = HyperClient::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    pub fn profile_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, utf8_percent_encode(id, PATH))
    }

    /// Sends a GET request and returns the body if the status is 200
    async fn send_get_request(&self, url: impl AsRef<str>) -> Result<Option<Bytes>> {
        let url = url.as_ref();
        trace!("sending GET request to url {url}");

        let uri: Uri = url
            .parse()
            .with_context(|| format!("invalid url `{url}`"))?;

        let req = Request::builder()
            .uri(uri)
            .method(Method::GET)
            .header(USER_AGENT, MY_USER_AGENT)
            .body(Empty::new())
            .context("failed to build GET request")?;

        let response = self
            .client
            .request(req)
            .await
            .with_context(|| format!("failed to receive GET response from {url}"))?;

        let status = response.status();

        if status != StatusCode::OK {
            debug!("received status code {status} from url {url}");

            return Ok(None);
        }

        response
            .into_body()
            .collect()
            .await
            .map(|collected| Some(collected.to_bytes()))
            .with_context(|| format!("failed to extract response bytes from {url}"))
    }
}

impl ProfileSource for Client {
    async fn fetch_profile(&self, id: &str) -> Result<Option<ProfilePage>> {
        match self.send_get_request(self.profile_url(id)).await? {
            Some(bytes) => ProfilePage::try_from(bytes).map(Some),
            None => Ok(None),
        }
    }
}

use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::Url;

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
pub struct UrlParam<C> {
    inner: C,
    param_name: &'static str,
    key: String,
}

impl<C> UrlParam<C> {
    pub fn new(inner: C, param_name: &'static str, key: impl Into<String>) -> Self {
        Self {
            inner,
            param_name,
            key: key.into(),
        }
    }

    fn sign(&self, url: &mut Url) {
        url.query_pairs_mut().append_pair(self.param_name, &self.key);
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.sign(req.url_mut());
        self.inner.execute(req).await
    }
}

use async_trait::async_trait;
use dirdesk_schema::{ActionResponse, CountResponse, EntityRecord, SearchRequest};
use reqwest::header::CONTENT_DISPOSITION;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::endpoints::EntityEndpoints;
use crate::config::BasicConfig;
use crate::error::PanelError;
use crate::panel::EntityContext;
use crate::utils::logging::{body_preview, with_pretty_json_debug};

pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

/// An exported spreadsheet and the name the server suggested for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The REST surface of one entity kind.
///
/// Application failures (`success: false`) come back as `Ok`; `Err` is
/// reserved for transport, status and parse failures.
#[async_trait]
pub trait EntityApi: Send + Sync {
    async fn count(&self) -> Result<CountResponse, PanelError>;

    async fn search(&self, term: &str) -> Result<Vec<EntityRecord>, PanelError>;

    async fn add(&self, record: &EntityRecord) -> Result<ActionResponse, PanelError>;

    async fn list(&self) -> Result<Vec<EntityRecord>, PanelError>;

    async fn delete(&self, id: &str) -> Result<ActionResponse, PanelError>;

    async fn update(&self, id: &str, record: &EntityRecord) -> Result<ActionResponse, PanelError>;

    async fn download(&self) -> Result<Download, PanelError>;
}

/// [`EntityApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEntityApi {
    client: reqwest::Client,
    endpoints: EntityEndpoints,
    fallback_filename: String,
}

impl HttpEntityApi {
    pub fn new(
        client: reqwest::Client,
        base: &Url,
        ctx: &EntityContext,
    ) -> Result<Self, PanelError> {
        Ok(Self {
            client,
            endpoints: EntityEndpoints::new(base, ctx)?,
            fallback_filename: format!("{}_list.xlsx", ctx.token()),
        })
    }

    /// Builds the reqwest client from `basic` settings and binds it to `ctx`.
    pub fn from_config(cfg: &BasicConfig, ctx: &EntityContext) -> Result<Self, PanelError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("dirdesk/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10));

        if let Some(secs) = cfg.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        Self::new(builder.build()?, &cfg.base_url, ctx)
    }

    pub fn endpoints(&self) -> &EntityEndpoints {
        &self.endpoints
    }
}

#[async_trait]
impl EntityApi for HttpEntityApi {
    async fn count(&self) -> Result<CountResponse, PanelError> {
        let resp = self.client.get(self.endpoints.count().clone()).send().await?;
        read_any_status(resp).await
    }

    async fn search(&self, term: &str) -> Result<Vec<EntityRecord>, PanelError> {
        let body = SearchRequest {
            search_term: term.to_string(),
        };
        let resp = self
            .client
            .post(self.endpoints.search().clone())
            .json(&body)
            .send()
            .await?;
        read_json(resp).await
    }

    async fn add(&self, record: &EntityRecord) -> Result<ActionResponse, PanelError> {
        with_pretty_json_debug(record, |payload| {
            debug!(url = %self.endpoints.add(), payload = %payload, "Posting new entity");
        });
        let resp = self
            .client
            .post(self.endpoints.add().clone())
            .json(record)
            .send()
            .await?;
        read_any_status(resp).await
    }

    async fn list(&self) -> Result<Vec<EntityRecord>, PanelError> {
        let resp = self.client.get(self.endpoints.list().clone()).send().await?;
        read_json(resp).await
    }

    async fn delete(&self, id: &str) -> Result<ActionResponse, PanelError> {
        let resp = self.client.delete(self.endpoints.delete(id)?).send().await?;
        read_any_status(resp).await
    }

    async fn update(&self, id: &str, record: &EntityRecord) -> Result<ActionResponse, PanelError> {
        let url = self.endpoints.update(id)?;
        with_pretty_json_debug(record, |payload| {
            debug!(url = %url, payload = %payload, "Updating entity");
        });
        let resp = self.client.put(url).json(record).send().await?;
        read_any_status(resp).await
    }

    async fn download(&self) -> Result<Download, PanelError> {
        let resp = self
            .client
            .get(self.endpoints.download().clone())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            log_unsuccessful(status, &resp.bytes().await.unwrap_or_default());
            return Err(PanelError::UpstreamStatus(status));
        }

        let filename = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| self.fallback_filename.clone());
        let bytes = resp.bytes().await?.to_vec();
        Ok(Download { filename, bytes })
    }
}

/// Decodes a success body; any non-2xx status is an error.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, PanelError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    if !status.is_success() {
        log_unsuccessful(status, &bytes);
        return Err(PanelError::UpstreamStatus(status));
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decodes the body whatever the status: the server reports failures with
/// 4xx/5xx codes and a JSON body (`{success, message}` or `{error}`). A
/// non-2xx body that does not decode is an upstream error.
async fn read_any_status<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, PanelError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    match serde_json::from_slice::<T>(&bytes) {
        Ok(body) => {
            if !status.is_success() {
                debug!(
                    %status,
                    body = %body_preview(&bytes, UPSTREAM_BODY_PREVIEW_CHARS),
                    "Entity API answered with an error body"
                );
            }
            Ok(body)
        }
        Err(_) if !status.is_success() => {
            log_unsuccessful(status, &bytes);
            Err(PanelError::UpstreamStatus(status))
        }
        Err(err) => Err(err.into()),
    }
}

fn log_unsuccessful(status: reqwest::StatusCode, bytes: &[u8]) {
    debug!(
        %status,
        body = %body_preview(bytes, UPSTREAM_BODY_PREVIEW_CHARS),
        "Entity API returned an unsuccessful status"
    );
}

/// Pulls `filename` out of a `Content-Disposition` header value.
fn attachment_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_from_content_disposition() {
        assert_eq!(
            attachment_filename("attachment; filename=speakers_list.xlsx").as_deref(),
            Some("speakers_list.xlsx")
        );
        assert_eq!(
            attachment_filename("attachment; filename=\"alumni list.xlsx\"").as_deref(),
            Some("alumni list.xlsx")
        );
        assert_eq!(attachment_filename("inline"), None);
        assert_eq!(attachment_filename("attachment; filename=\"\""), None);
    }

    #[test]
    fn http_api_binds_endpoints_to_context() {
        let ctx = EntityContext::new("vendors", "Vendor").unwrap();
        let base = Url::parse("http://127.0.0.1:5000/").unwrap();
        let api = HttpEntityApi::new(reqwest::Client::new(), &base, &ctx).unwrap();

        assert_eq!(
            api.endpoints().count().as_str(),
            "http://127.0.0.1:5000/api/vendors/count"
        );
        assert_eq!(api.fallback_filename, "vendors_list.xlsx");
    }
}

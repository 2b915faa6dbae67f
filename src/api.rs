// API client module: a small blocking HTTP client for the two Lemlist
// endpoints the binaries use. Requests are sent one at a time; callers
// decide what to do with failures.

use crate::config::Settings;
use crate::leads::AddLeadRequest;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
    #[error("API key cannot be used in an Authorization header")]
    InvalidApiKey(#[from] InvalidHeaderValue),
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status of the response, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Payload of the create-campaign endpoint. Everything but the name is
/// configured later in the Lemlist UI.
#[derive(Serialize, Debug)]
pub struct CreateCampaignRequest<'a> {
    pub name: &'a str,
}

/// The only part of the create-campaign response we care about.
#[derive(Deserialize, Debug, Default)]
pub struct CreatedCampaign {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// Builds `Basic base64(":" + api_key)`: Lemlist expects an empty user
/// name and the API key as password.
pub fn basic_auth_value(api_key: &Secret<String>) -> Result<HeaderValue, ApiError> {
    let encoded = STANDARD.encode(format!(":{}", api_key.expose_secret()));
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Blocking Lemlist client. Authentication and content type are set once as
/// default headers.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &Secret<String>) -> Result<Self, ApiError> {
        let url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_owned()))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_owned()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, basic_auth_value(api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;
        Ok(ApiClient {
            client,
            base_url: url,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::new(&settings.api_url, &settings.api_key)
    }

    /// Appends `segments` to the base URL. Each segment is percent-encoded,
    /// so a campaign id can never escape its path component.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// POST /campaigns
    pub fn create_campaign(
        &self,
        req: &CreateCampaignRequest<'_>,
    ) -> Result<CreatedCampaign, ApiError> {
        let url = self.endpoint(&["campaigns"]);
        log::debug!("POST {}", url);
        let res = self.client.post(url).json(req).send()?;
        let res = check_status(res)?;

        // The campaign exists at this point, an odd body is not a failure.
        Ok(created_campaign(res.text()))
    }

    /// POST /campaigns/{campaign_id}/leads
    pub fn add_lead(&self, campaign_id: &str, lead: &AddLeadRequest<'_>) -> Result<(), ApiError> {
        let url = self.endpoint(&["campaigns", campaign_id, "leads"]);
        log::debug!("POST {}", url);
        let res = self.client.post(url).json(lead).send()?;
        check_status(res)?;
        Ok(())
    }
}

/// Reads the id out of a 2xx create-campaign body, falling back to an
/// unknown id when the body can't be read or parsed.
fn created_campaign<E: std::fmt::Display>(body: Result<String, E>) -> CreatedCampaign {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            log::warn!("Cannot read create-campaign response: {}", e);
            return CreatedCampaign::default();
        }
    };
    serde_json::from_str(&body).unwrap_or_else(|e| {
        log::warn!("Unexpected create-campaign response ({}): {}", e, body);
        CreatedCampaign::default()
    })
}

/// Turns any non-2xx response into `ApiError::Status`, keeping the body for
/// the error report.
fn check_status(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().unwrap_or_else(|_| "".into());
    Err(ApiError::Status { status, body })
}

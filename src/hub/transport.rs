//! Authenticated GET/HEAD transport and the redirect policy for HEAD probes.
//!
//! Listing requests ride an agent with ordinary automatic redirect handling.
//! Metadata probes use a second agent with redirects disabled so every 3xx
//! reply comes back to [`decide`], which only follows same-authority
//! relative redirects. Absolute redirects point at third-party CDN hosts
//! serving LFS blobs; following them would attach the bearer credential to a
//! foreign host and start a content transfer that metadata resolution never
//! wants.

use tracing::{debug, trace};
use ureq::http::HeaderMap;
use ureq::Agent;
use url::Url;

use super::HubClient;
use crate::error::HubError;

const MAX_REDIRECT_HOPS: usize = 10;

/// Agent for listing GETs: automatic redirects, statuses handed back as data.
pub(crate) fn listing_agent() -> Agent {
    let config = Agent::config_builder().http_status_as_error(false).build();
    config.into()
}

/// Agent for HEAD probes: the policy loop owns redirect handling, so the
/// agent must hand 3xx replies back untouched.
pub(crate) fn probe_agent() -> Agent {
    let config = Agent::config_builder()
        .http_status_as_error(false)
        .max_redirects(0)
        .max_redirects_will_error(false)
        .build();
    config.into()
}

/// A completed HTTP exchange, reduced to what the callers consume.
pub(crate) struct Reply {
    pub status: u16,
    pub headers: HeaderMap,
    /// URL of the last request actually issued (after any followed redirects).
    pub final_url: Url,
    pub body: String,
}

impl Reply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// One outgoing probe request: target plus the headers to replay on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ProbeRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

/// Verdict of the redirect policy for a single 3xx reply.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RedirectAction {
    Follow(ProbeRequest),
    Stop,
}

/// Decide whether to follow a redirect reply.
///
/// Relative locations are resolved against the previous request, keeping its
/// scheme and authority; the original headers are replayed and the resolved
/// absolute location is stamped into a `Location` header on the outgoing
/// request, so the final URL stays recoverable from the request chain.
/// Absolute locations, unparsable locations, and anything that resolves to a
/// different authority terminate the request with the reply in hand.
pub(crate) fn decide(previous: &ProbeRequest, location: Option<&str>) -> RedirectAction {
    let Some(location) = location else {
        return RedirectAction::Stop;
    };

    match Url::parse(location) {
        // Absolute target (or a non-hierarchical scheme): never follow.
        Ok(_) => RedirectAction::Stop,
        Err(url::ParseError::RelativeUrlWithoutBase) => follow_relative(previous, location),
        Err(_) => RedirectAction::Stop,
    }
}

fn follow_relative(previous: &ProbeRequest, location: &str) -> RedirectAction {
    let Ok(resolved) = previous.url.join(location) else {
        return RedirectAction::Stop;
    };

    // Protocol-relative locations ("//host/path") resolve to a different
    // authority and are refused like absolute ones.
    if resolved.scheme() != previous.url.scheme()
        || resolved.host() != previous.url.host()
        || resolved.port_or_known_default() != previous.url.port_or_known_default()
    {
        return RedirectAction::Stop;
    }

    let mut headers: Vec<(String, String)> = previous
        .headers
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("location"))
        .cloned()
        .collect();
    headers.push(("Location".to_string(), resolved.to_string()));

    RedirectAction::Follow(ProbeRequest {
        url: resolved,
        headers,
    })
}

/// GET with bearer authentication and automatic redirect handling.
///
/// Success is a status in [200,300). Statuses in [400,500) signal an
/// authorization failure; every other non-success status surfaces with its
/// numeric code.
pub(crate) fn http_get(client: &HubClient, url: &Url) -> Result<Reply, HubError> {
    let mut builder = client.listing_agent().get(url.as_str());
    if let Some(token) = client.token() {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }

    let mut response = builder.call().map_err(|source| HubError::Transport {
        url: url.to_string(),
        message: source.to_string(),
    })?;

    let status = response.status().as_u16();
    debug!(%url, status, "GET");

    let body = if (200..300).contains(&status) {
        response
            .body_mut()
            .read_to_string()
            .map_err(|source| HubError::Transport {
                url: url.to_string(),
                message: source.to_string(),
            })?
    } else {
        String::new()
    };

    classify(
        Reply {
            status,
            headers: response.headers().clone(),
            final_url: url.clone(),
            body,
        },
        300,
    )
}

/// HEAD with bearer authentication, `Accept-Encoding: identity`, and the
/// redirect policy loop.
///
/// Success is a status in [200,400): a redirect the policy refused to follow
/// passes through as the terminal reply rather than being treated as an
/// error here.
pub(crate) fn http_head(client: &HubClient, url: &Url) -> Result<Reply, HubError> {
    let mut request = ProbeRequest {
        url: url.clone(),
        headers: probe_headers(client),
    };

    for _ in 0..=MAX_REDIRECT_HOPS {
        let reply = send_head(client.probe_agent(), &request)?;
        if (300..400).contains(&reply.status) {
            if let RedirectAction::Follow(next) = decide(&request, reply.header("Location")) {
                trace!(from = %request.url, to = %next.url, "following same-host redirect");
                request = next;
                continue;
            }
            trace!(url = %request.url, status = reply.status, "redirect not followed");
        }
        return classify(reply, 400);
    }

    Err(HubError::Transport {
        url: url.to_string(),
        message: format!("redirect chain exceeded {MAX_REDIRECT_HOPS} hops"),
    })
}

fn send_head(agent: &Agent, request: &ProbeRequest) -> Result<Reply, HubError> {
    let mut builder = agent.head(request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder.call().map_err(|source| HubError::Transport {
        url: request.url.to_string(),
        message: source.to_string(),
    })?;

    let status = response.status().as_u16();
    debug!(url = %request.url, status, "HEAD");

    Ok(Reply {
        status,
        headers: response.headers().clone(),
        final_url: request.url.clone(),
        body: String::new(),
    })
}

fn probe_headers(client: &HubClient) -> Vec<(String, String)> {
    // Identity encoding keeps Content-Length equal to the stored size.
    let mut headers = vec![("Accept-Encoding".to_string(), "identity".to_string())];
    if let Some(token) = client.token() {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }
    headers
}

fn classify(reply: Reply, success_upper: u16) -> Result<Reply, HubError> {
    let status = reply.status;
    if (200..success_upper).contains(&status) {
        return Ok(reply);
    }
    if (400..500).contains(&status) {
        return Err(HubError::AuthorizationRequired {
            url: reply.final_url.to_string(),
            status,
        });
    }
    Err(HubError::HttpStatus {
        url: reply.final_url.to_string(),
        status,
    })
}

//! Remote catalogue client for the PokeAPI listing and detail endpoints.
//!
//! Each call issues exactly one request through the HTTP capability; there is
//! no caching, batching or retrying at this layer. Responses come back as
//! events carrying a [`FetchResult`], so the update loop never sees transport
//! types.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::capabilities::AppHttp;
use crate::event::Event;
use crate::model::LoadPhase;
use crate::pokemon::{Pokemon, PokemonListPage};

pub const BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// The only error kind that crosses the client boundary. Raised for transport
/// failures, non-2xx statuses and undecodable bodies; handled at the
/// controller, never propagated further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("invalid entity reference: {0}")]
    BadUrl(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

pub fn list_url(offset: u32, limit: u32) -> String {
    format!("{BASE_URL}/?offset={offset}&limit={limit}")
}

/// Entity references come from the listing payload, so check them before
/// handing them to the shell's HTTP stack.
pub fn validate_reference(reference: &str) -> FetchResult<()> {
    let parsed =
        Url::parse(reference).map_err(|e| FetchError::BadUrl(format!("{reference}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::BadUrl(format!(
            "{reference}: unsupported scheme '{other}'"
        ))),
    }
}

/// GET one page of the listing at the given offset/limit.
pub fn fetch_page(http: &AppHttp, offset: u32, limit: u32, phase: LoadPhase) {
    http.get(list_url(offset, limit))
        .expect_json::<PokemonListPage>()
        .send(move |result| Event::ListPageLoaded {
            phase,
            result: Box::new(into_body(result)),
        });
}

/// GET one entity's full document by its absolute reference. The batch/index
/// pair routes the response back to the staging slot it belongs to.
pub fn fetch_detail(http: &AppHttp, reference: &str, batch: u64, index: usize) -> FetchResult<()> {
    validate_reference(reference)?;

    http.get(reference)
        .expect_json::<Pokemon>()
        .send(move |result| Event::DetailLoaded {
            batch,
            index,
            result: Box::new(into_body(result)),
        });

    Ok(())
}

/// Collapse a capability response into the domain result the controller works
/// with: success body, or one `FetchError`.
fn into_body<T>(result: crux_http::Result<crux_http::Response<T>>) -> FetchResult<T> {
    match result {
        Ok(mut response) => {
            let status = u16::from(response.status());
            if !(200..300).contains(&status) {
                return Err(FetchError::Status(status));
            }
            response
                .take_body()
                .ok_or_else(|| FetchError::Decode("response body missing".to_string()))
        }
        Err(crux_http::Error::Http(e)) => Err(FetchError::Status(u16::from(e.code))),
        Err(crux_http::Error::Json(message)) => Err(FetchError::Decode(message)),
        Err(e) => Err(FetchError::Transport(e.to_string())),
    }
}

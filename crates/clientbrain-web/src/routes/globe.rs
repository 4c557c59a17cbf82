//! `GET /globe.png`: a server-rendered still of the globe.

use std::convert::Infallible;

use clientbrain_globe::render_still;
use serde::Deserialize;
use tracing::error;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StillQuery {
    /// Animation frame to show; frame 0 is the globe at rest.
    #[serde(default)]
    pub frame: u64,
}

pub async fn still(query: StillQuery, state: AppState) -> Result<Response, Infallible> {
    let params = (*state.globe).clone();
    let size = state.config.globe.still_size;
    let frame = query.frame;

    let rendered = tokio::task::spawn_blocking(move || render_still(&params, size, frame).to_png()).await;

    let png = match rendered {
        Ok(Ok(png)) => png,
        Ok(Err(e)) => {
            error!(error = %e, "globe still encoding failed");
            return Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
        Err(e) => {
            error!(error = %e, "globe render task failed");
            return Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
    };

    let reply = warp::reply::with_header(png, "content-type", "image/png");
    Ok(warp::reply::with_header(reply, "cache-control", "public, max-age=3600").into_response())
}

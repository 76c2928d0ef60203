use axum::routing::{get, post};
use axum::Router;
use snafu::{OptionExt as _, ResultExt as _};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

mod clip;
mod error;
mod reel;
mod state;

pub use error::*;
pub use reel::CreateReel;
pub use state::*;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

pub fn create_router(app: App) -> Router {
    Router::new()
        .route("/clip", get(clip::list))
        .route("/clip/", get(clip::list))
        .route("/clip/:index", get(clip::info))
        .route("/reel", get(reel::list).post(reel::create))
        .route("/reel/", get(reel::list).post(reel::create))
        .route("/reel/:index", get(reel::info))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app)
}

/// Positions in a collection arrive as path segments. Anything that is not an integer is a bad
/// request.
fn parse_index(kind: &'static str, input: &str) -> Result<usize> {
    let index: i64 = input.parse().context(InvalidIndexSnafu { input })?;
    checked_index(kind, index)
}

/// Negative positions can never be in range, wherever they come from.
fn checked_index(kind: &'static str, index: i64) -> Result<usize> {
    usize::try_from(index).ok().context(NotFoundSnafu { kind, index })
}

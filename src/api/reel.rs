use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use snafu::ResultExt as _;
use tracing::instrument;

use super::*;
use crate::model::{Definition, Reel, ReelRecord, Standard};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReel {
    pub name: String,
    pub standard: String,
    pub definition: String,
    /// Positions in the clip catalog, in playback order. Signed so that a negative position is
    /// reported as missing, the same as in a path.
    pub clips: Vec<i64>,
    pub save: bool,
}

/// Assemble a reel from catalog clips, saving it when asked to.
#[instrument(skip_all)]
pub async fn create(
    State(app): State<App>, payload: std::result::Result<Json<CreateReel>, JsonRejection>,
) -> Result<(StatusCode, Json<ReelRecord>)> {
    let Json(payload) = payload.map_err(|rejection| {
        InvalidBodySnafu {
            message: rejection.body_text(),
        }
        .build()
    })?;

    tracing::info!(reel = %payload.name, clips = ?payload.clips, save = payload.save, "create reel");

    let standard: Standard = payload.standard.parse().context(ModelSnafu)?;
    let definition: Definition = payload.definition.parse().context(ModelSnafu)?;

    // `get` hands out copies, so assembly never touches the catalog
    let mut clips = Vec::with_capacity(payload.clips.len());
    for index in payload.clips {
        let index = checked_index("clip", index)?;
        clips.push(app.clips.get(index).await.context(StoreSnafu)?);
    }

    let reel = Reel::new(payload.name, standard, definition, clips).context(ModelSnafu)?;
    tracing::info!(duration = %reel.get_duration(), "assembled reel `{}`", reel.name);

    if !payload.save {
        return Ok((StatusCode::OK, Json(reel.to_record())));
    }

    let index = app.reels.save(&reel).await.context(StoreSnafu)?;
    tracing::info!(index, "saved reel `{}`", reel.name);

    Ok((StatusCode::CREATED, Json(reel.to_record())))
}

#[instrument(skip(app))]
pub async fn list(State(app): State<App>) -> Result<Json<Vec<ReelRecord>>> {
    let reels = app.reels.list().await.context(StoreSnafu)?;
    Ok(Json(reels.iter().map(|reel| reel.to_record()).collect()))
}

#[instrument(skip(app))]
pub async fn info(State(app): State<App>, Path(index): Path<String>) -> Result<Json<ReelRecord>> {
    let index = parse_index("reel", &index)?;
    let reel = app.reels.get(index).await.context(StoreSnafu)?;
    Ok(Json(reel.to_record()))
}

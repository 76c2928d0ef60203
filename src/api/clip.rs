use axum::extract::{Path, State};
use axum::Json;
use snafu::ResultExt as _;
use tracing::instrument;

use super::*;
use crate::model::ClipRecord;

#[instrument(skip(app))]
pub async fn list(State(app): State<App>) -> Result<Json<Vec<ClipRecord>>> {
    let clips = app.clips.list().await.context(StoreSnafu)?;
    Ok(Json(clips.iter().map(|clip| clip.to_record()).collect()))
}

#[instrument(skip(app))]
pub async fn info(State(app): State<App>, Path(index): Path<String>) -> Result<Json<ClipRecord>> {
    let index = parse_index("clip", &index)?;
    let clip = app.clips.get(index).await.context(StoreSnafu)?;
    Ok(Json(clip.to_record()))
}

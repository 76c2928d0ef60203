use std::sync::Arc;

use derive_new::new;

use crate::model::{Clip, Reel};
use crate::store::Store;

/// Shared by every handler. Cloning only bumps the reference counts.
#[derive(Debug, Clone, new)]
pub struct App {
    pub clips: Arc<Store<Clip>>,
    pub reels: Arc<Store<Reel>>,
}

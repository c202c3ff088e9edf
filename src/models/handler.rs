use std::sync::Arc;

use crate::giveaway::manager::GiveawayManager;

#[derive(Clone)]
pub struct Handler {
    pub manager: Arc<GiveawayManager>,
}

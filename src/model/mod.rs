pub use self::{
    player::{PlayerRecord, DEFAULT_RANK},
    stats::{FactionCount, ProfileStats},
};

mod player;
mod stats;

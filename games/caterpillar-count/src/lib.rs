//! Caterpillar Count: click the numbered leaves in ascending order; every
//! correct leaf adds a segment to the caterpillar.

use wasm_bindgen::prelude::*;
use leaf_engine::*;

pub mod caterpillar;
pub mod field;
pub mod game;
pub mod leaf;
pub mod sequence;
pub mod settings;

pub use field::{ClickOutcome, FieldParams, LeafField};
pub use game::{CaterpillarGame, GamePhase};
pub use leaf::{Leaf, LeafId};
pub use sequence::SequenceState;
pub use settings::{Settings, SettingsError};

leaf_web::export_game!(CaterpillarGame, "caterpillar-count");

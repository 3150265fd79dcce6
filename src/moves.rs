use schema::{MoveCategory, MoveData, MoveEffects, MoveTarget, PokemonType};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

/// Fallback move used when a Pokemon has no PP left on any move.
static STRUGGLE: LazyLock<Arc<MoveData>> = LazyLock::new(|| {
    Arc::new(MoveData {
        name: "Struggle".to_string(),
        description: "Used only when every other move is out of PP.".to_string(),
        move_type: PokemonType::Typeless,
        power: 50,
        accuracy: None,
        pp: 1,
        priority: 0,
        category: MoveCategory::Physical,
        target: MoveTarget::Foe,
        effects: MoveEffects::default(),
        secondaries: Vec::new(),
    })
});

pub fn struggle() -> Arc<MoveData> {
    Arc::clone(&STRUGGLE)
}

/// A learned move: shared definition plus this Pokemon's remaining PP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub data: Arc<MoveData>,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: Arc<MoveData>) -> Self {
        let pp = data.pp;
        MoveInstance { data, pp }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn max_pp(&self) -> u8 {
        self.data.pp
    }

    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }
}

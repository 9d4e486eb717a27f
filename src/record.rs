use serde::{Deserialize, Serialize};

/// A page as it appears in the graph file: one tab-separated line with
/// the key, the current rank and zero or more neighbor keys.
///
/// The serde derive drives the tab-delimited codec of the storage
/// adapter: the trailing `neighbors` sequence absorbs however many
/// fields the line carries after the rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub key: String,
    pub rank: f64,
    #[serde(default)]
    pub neighbors: Vec<String>,
}

/// The per-key value carried by the working collection between rounds.
///
/// Each pipeline stage has its own value type (contribution, neighbor
/// list, joined pair); this is the one flowing across the round
/// boundary, with the rank and the neighbor list as real fields rather
/// than a tab-joined string re-parsed at every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub rank: f64,
    pub neighbors: Vec<String>,
}

impl PageRecord {
    pub fn new(key: impl Into<String>, rank: f64, neighbors: Vec<String>) -> PageRecord {
        PageRecord {
            key: key.into(),
            rank,
            neighbors,
        }
    }

    /// Split the record into the keyed form used by the engine.
    pub fn into_pair(self) -> (String, PageState) {
        (
            self.key,
            PageState {
                rank: self.rank,
                neighbors: self.neighbors,
            },
        )
    }

    pub fn from_pair((key, state): (String, PageState)) -> PageRecord {
        PageRecord {
            key,
            rank: state.rank,
            neighbors: state.neighbors,
        }
    }
}

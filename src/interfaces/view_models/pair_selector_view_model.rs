use super::format::{fixed, pair_label};
use crate::application::stores::TradingState;
use crate::domain::trading::pair::{PairCategory, PairFilter};

pub struct PairOption {
    pub symbol: String,
    pub label: String,
    pub category: PairCategory,
    pub spread: String,
    pub is_active: bool,
}

pub struct PairSelectorView {
    pub filter: PairFilter,
    pub options: Vec<PairOption>,
}

impl PairSelectorView {
    pub fn build(state: &TradingState, filter: PairFilter) -> Self {
        let options = state
            .pairs_by_category(filter)
            .into_iter()
            .map(|pair| PairOption {
                symbol: pair.symbol.clone(),
                label: pair_label(&pair.symbol),
                category: pair.category,
                spread: fixed(pair.spread, 1),
                is_active: pair.symbol == state.active_pair,
            })
            .collect();
        Self { filter, options }
    }
}

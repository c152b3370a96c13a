use super::signal_card::SignalCard;
use crate::domain::trading::types::{SignalStatus, TradingSignal};

/// Signals page: three sections, newest first within each.
/// Cancelled signals are listed with the closed history.
#[derive(Debug, Default)]
pub struct SignalsView {
    pub new: Vec<SignalCard>,
    pub active: Vec<SignalCard>,
    pub closed: Vec<SignalCard>,
}

impl SignalsView {
    pub fn build(signals: &[TradingSignal]) -> Self {
        let mut view = Self::default();
        for signal in signals {
            let card = SignalCard::from_signal(signal);
            match signal.status {
                SignalStatus::New => view.new.push(card),
                SignalStatus::Active => view.active.push(card),
                SignalStatus::Closed | SignalStatus::Cancelled => view.closed.push(card),
            }
        }
        view
    }

    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.active.is_empty() && self.closed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock_data;

    #[test]
    fn test_partition() {
        let mut signals = mock_data::signals();
        let mut cancelled = signals[0].clone();
        cancelled.id = "signal-004".to_string();
        cancelled.status = SignalStatus::Cancelled;
        signals.push(cancelled);

        let view = SignalsView::build(&signals);
        assert!(view.new.is_empty());
        let active: Vec<_> = view.active.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(active, ["signal-001", "signal-003"]);
        let closed: Vec<_> = view.closed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(closed, ["signal-002", "signal-004"]);
    }

    #[test]
    fn test_empty() {
        assert!(SignalsView::build(&[]).is_empty());
    }
}

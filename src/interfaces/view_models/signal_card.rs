use super::format::{fixed, pct, price};
use crate::domain::trading::types::{SignalDirection, SignalStatus, TradingSignal};

/// Colour intent, resolved to a palette by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Accent,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalCard {
    pub id: String,
    pub pair: String,
    pub direction: &'static str,
    pub direction_tone: Tone,
    pub status: String,
    pub status_tone: Tone,
    pub entry: String,
    pub take_profit: String,
    pub stop_loss: String,
    pub confidence: String,
    pub risk_reward: Option<String>,
    pub profit_loss: Option<String>,
    pub profit_loss_tone: Tone,
    pub explanation: String,
}

impl SignalCard {
    pub fn from_signal(signal: &TradingSignal) -> Self {
        let (direction, direction_tone) = match signal.direction {
            SignalDirection::Buy => ("BUY", Tone::Positive),
            SignalDirection::Sell => ("SELL", Tone::Negative),
        };
        let status_tone = match signal.status {
            SignalStatus::Active => Tone::Accent,
            SignalStatus::New => Tone::Positive,
            SignalStatus::Closed | SignalStatus::Cancelled => Tone::Neutral,
        };
        // profit_loss is already a percentage
        let profit_loss = signal.profit_loss.map(|pl| {
            let sign = if pl > 0.0 { "+" } else { "" };
            format!("{}{}%", sign, fixed(pl, 2))
        });
        let profit_loss_tone = match signal.profit_loss {
            Some(pl) if pl > 0.0 => Tone::Positive,
            Some(pl) if pl < 0.0 => Tone::Negative,
            _ => Tone::Neutral,
        };

        Self {
            id: signal.id.clone(),
            pair: signal.pair.clone(),
            direction,
            direction_tone,
            status: signal.status.to_string().to_uppercase(),
            status_tone,
            entry: price(signal.entry_price),
            take_profit: price(signal.take_profit),
            stop_loss: price(signal.stop_loss),
            confidence: format!("{} confidence", pct(signal.confidence, 0)),
            risk_reward: signal
                .risk_reward_ratio()
                .map(|rr| format!("1:{:.1}", rr)),
            profit_loss,
            profit_loss_tone,
            explanation: signal.explanation.clone(),
        }
    }
}

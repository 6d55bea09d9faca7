//! Fusion of the three analytic engines into one decision

use std::collections::BTreeMap;

use super::{MetaConfig, RegimeDecision};
use crate::behavior::BehaviorMetrics;
use crate::chaos::{ChaosMetrics, Regime};
use crate::micro::MicrostructureMetrics;

/// Stateless meta-strategy engine
pub struct MetaEngine {
    config: MetaConfig,
}

impl MetaEngine {
    pub fn new(config: MetaConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(MetaConfig::default())
    }

    /// Fuse engine outputs into a position multiplier and trade gate.
    ///
    /// Inputs are optional so that one failed engine degrades the
    /// decision instead of crashing it: any missing metric forces the
    /// conservative outcome (gate closed, multiplier at the floor).
    pub fn fuse(
        &self,
        chaos: Option<&ChaosMetrics>,
        behavior: Option<&BehaviorMetrics>,
        micro: Option<&MicrostructureMetrics>,
    ) -> RegimeDecision {
        let mut recommendations = BTreeMap::new();

        let mut missing = Vec::new();
        if chaos.is_none() {
            missing.push("chaos");
        }
        if behavior.is_none() {
            missing.push("behavior");
        }
        if micro.is_none() {
            missing.push("microstructure");
        }
        let (Some(chaos), Some(behavior), Some(micro)) = (chaos, behavior, micro) else {
            recommendations.insert(
                "gate_missing_input".into(),
                format!("missing engine metrics: {}; trading halted", missing.join(", ")),
            );
            return self.degraded_decision(chaos, micro, recommendations);
        };

        let mut multiplier = 1.0
            * (1.0 - self.config.chaos_weight * chaos.chaos_index)
            * (1.0 - self.config.leverage_weight * micro.leverage_risk_index)
            * (1.0 - self.config.impulsiveness_weight * behavior.impulsiveness_index)
            * (1.0 - self.config.chase_weight * behavior.chase_selloff_index);
        multiplier = multiplier.max(self.config.multiplier_floor);

        let chaotic_leverage = chaos.regime == Regime::Chaotic
            && micro.leverage_risk_index > self.config.high_leverage_threshold;
        let loss_streak = behavior.consecutive_losses >= self.config.consecutive_loss_cap;
        let chasing = behavior.chase_selloff_index > self.config.chase_ceiling;

        if chaotic_leverage {
            recommendations.insert(
                "gate_chaotic_leverage".into(),
                format!(
                    "chaotic regime with leverage risk {:.2} above {:.2}",
                    micro.leverage_risk_index, self.config.high_leverage_threshold
                ),
            );
        }
        if loss_streak {
            recommendations.insert(
                "gate_loss_streak".into(),
                format!(
                    "{} consecutive losses reached the cap of {}",
                    behavior.consecutive_losses, self.config.consecutive_loss_cap
                ),
            );
        }
        if chasing {
            recommendations.insert(
                "gate_chasing".into(),
                format!(
                    "chase/sell-off index {:.2} above ceiling {:.2}",
                    behavior.chase_selloff_index, self.config.chase_ceiling
                ),
            );
        }
        if micro.reduced_confidence {
            recommendations.insert(
                "note_reduced_confidence".into(),
                "leverage risk estimated without open interest".into(),
            );
        }

        let allow_new_trades = !(chaotic_leverage || loss_streak || chasing);
        recommendations.insert("regime".into(), chaos.regime.label().into());
        recommendations.insert(
            "position_multiplier".into(),
            format!("{multiplier:.2}"),
        );

        RegimeDecision {
            regime: chaos.regime,
            chaos_index: chaos.chaos_index,
            whale_activity_index: micro.whale_activity_index,
            leverage_risk_index: micro.leverage_risk_index,
            position_multiplier: multiplier,
            allow_new_trades,
            recommendations,
        }
    }

    /// Conservative decision used when an engine input is missing
    fn degraded_decision(
        &self,
        chaos: Option<&ChaosMetrics>,
        micro: Option<&MicrostructureMetrics>,
        mut recommendations: BTreeMap<String, String>,
    ) -> RegimeDecision {
        let regime = chaos.map_or(Regime::Neutral, |c| c.regime);
        recommendations.insert("regime".into(), regime.label().into());
        recommendations.insert(
            "position_multiplier".into(),
            format!("{:.2}", self.config.multiplier_floor),
        );
        RegimeDecision {
            regime,
            chaos_index: chaos.map_or(0.0, |c| c.chaos_index),
            whale_activity_index: micro.map_or(0.0, |m| m.whale_activity_index),
            leverage_risk_index: micro.map_or(0.0, |m| m.leverage_risk_index),
            position_multiplier: self.config.multiplier_floor,
            allow_new_trades: false,
            recommendations,
        }
    }
}

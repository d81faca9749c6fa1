//! Events emitted by governance instances on every successful mutation.

use serde::Serialize;
use vaultgov_types::{Address, Timestamp, VaultNft};

use crate::kind::ParameterKind;

/// An observable record of a stage, commit or initialization.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GovernanceEvent {
    /// A value was staged and may be committed from `eligible_at`.
    Staged {
        instance: Address,
        governance: &'static str,
        kind: ParameterKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        vault: Option<VaultNft>,
        actor: Address,
        value: serde_json::Value,
        eligible_at: Timestamp,
    },
    /// A staged value became the committed value.
    Committed {
        instance: Address,
        governance: &'static str,
        kind: ParameterKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        vault: Option<VaultNft>,
        actor: Address,
        value: serde_json::Value,
    },
    /// A factory-bearing governance was bound to its factory.
    Initialized {
        instance: Address,
        governance: &'static str,
        factory: Address,
    },
}

impl GovernanceEvent {
    pub fn instance(&self) -> &Address {
        match self {
            Self::Staged { instance, .. }
            | Self::Committed { instance, .. }
            | Self::Initialized { instance, .. } => instance,
        }
    }
}

/// Synchronous fan-out event bus for governance events.
///
/// Listeners run inline on the mutating call, after the state change.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&GovernanceEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&GovernanceEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &GovernanceEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn initialized() -> GovernanceEvent {
        GovernanceEvent::Initialized {
            instance: Address::from_low_u8(100),
            governance: "AaveVaultGovernance",
            factory: Address::from_low_u8(200),
        }
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&initialized());

        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::default();
        bus.emit(&initialized());
    }

    #[test]
    fn staged_event_json_shape() {
        let event = GovernanceEvent::Staged {
            instance: Address::from_low_u8(100),
            governance: "LpIssuerGovernance",
            kind: ParameterKind::DelayedStrategyParams,
            vault: Some(VaultNft::new(3)),
            actor: Address::from_low_u8(1),
            value: serde_json::json!({ "management_fee": 200 }),
            eligible_at: Timestamp::new(1101),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "staged");
        assert_eq!(json["kind"], "DelayedStrategyParams");
        assert_eq!(json["vault"], 3);
        assert_eq!(json["eligible_at"], 1101);
        assert_eq!(json["value"]["management_fee"], 200);
        assert_eq!(json["actor"], "0x0000000000000000000000000000000000000001");
    }

    #[test]
    fn instance_wide_events_omit_vault() {
        let event = GovernanceEvent::Committed {
            instance: Address::from_low_u8(100),
            governance: "AaveVaultGovernance",
            kind: ParameterKind::DelayedProtocolParams,
            vault: None,
            actor: Address::from_low_u8(1),
            value: serde_json::Value::Null,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("vault").is_none());
        assert_eq!(event.instance(), &Address::from_low_u8(100));
    }
}

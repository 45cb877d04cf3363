// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavior rules and call resolution.
//!
//! Rules are kept in registration order and scanned newest first: the most
//! recently registered rule whose scope matches a call answers it, however
//! specific older rules are. Each rule counts the calls its scope matched;
//! that count indexes the rule's once-queue before its default applies.

use crate::matcher::InputFilter;
use crate::outcome::Outcome;
use clientmock_client::{OperationId, Request};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_RULE: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a registered rule.
///
/// Ids are never reused, so a handle kept across a reset cannot reach a
/// rule of the new registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RuleId(u64);

impl RuleId {
    fn next() -> Self {
        Self(NEXT_RULE.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which calls a rule applies to.
#[derive(Clone, Debug)]
pub(crate) enum Scope {
    /// Every call.
    ClientDefault,
    /// Any operation whose input satisfies the filter.
    AnyOperationInput(InputFilter),
    /// One operation, any input.
    Operation(OperationId),
    /// One operation whose input satisfies the filter.
    OperationInput(OperationId, InputFilter),
}

impl Scope {
    pub(crate) fn any(filter: Option<InputFilter>) -> Self {
        match filter {
            Some(filter) => Scope::AnyOperationInput(filter),
            None => Scope::ClientDefault,
        }
    }

    pub(crate) fn operation(operation: OperationId, filter: Option<InputFilter>) -> Self {
        match filter {
            Some(filter) => Scope::OperationInput(operation, filter),
            None => Scope::Operation(operation),
        }
    }

    pub(crate) fn matches(&self, request: &Request) -> bool {
        match self {
            Scope::ClientDefault => true,
            Scope::AnyOperationInput(filter) => filter.matches(&request.input),
            Scope::Operation(operation) => request.operation == *operation,
            Scope::OperationInput(operation, filter) => {
                request.operation == *operation && filter.matches(&request.input)
            }
        }
    }
}

#[derive(Debug)]
struct Rule {
    id: RuleId,
    scope: Scope,
    /// Indexed by match position; the next chainable position is `once.len()`.
    once: Vec<Outcome>,
    default: Option<Outcome>,
    matched: usize,
}

/// How a call was answered.
#[derive(Debug)]
pub(crate) struct Resolution {
    pub(crate) rule: Option<RuleId>,
    pub(crate) outcome: Outcome,
}

/// Ordered set of rules owned by one binding.
#[derive(Debug, Default)]
pub(crate) struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Append a fresh rule.
    pub(crate) fn register(&mut self, scope: Scope) -> RuleId {
        let id = RuleId::next();
        self.rules.push(Rule {
            id,
            scope,
            once: Vec::new(),
            default: None,
            matched: 0,
        });
        id
    }

    /// Most recently registered client-default rule, registering one if
    /// there is none.
    pub(crate) fn client_default(&mut self) -> RuleId {
        let existing = self
            .rules
            .iter()
            .rev()
            .find(|rule| matches!(rule.scope, Scope::ClientDefault))
            .map(|rule| rule.id);
        match existing {
            Some(id) => id,
            None => self.register(Scope::ClientDefault),
        }
    }

    /// Set a rule's default outcome. `false` if the rule is unknown.
    pub(crate) fn set_default(&mut self, id: RuleId, outcome: Outcome) -> bool {
        match self.rule_mut(id) {
            Some(rule) => {
                rule.default = Some(outcome);
                true
            }
            None => false,
        }
    }

    /// Queue a one-shot outcome at the rule's next chainable position.
    /// `false` if the rule is unknown.
    pub(crate) fn push_once(&mut self, id: RuleId, outcome: Outcome) -> bool {
        match self.rule_mut(id) {
            Some(rule) => {
                rule.once.push(outcome);
                true
            }
            None => false,
        }
    }

    /// Pick the outcome for a call.
    ///
    /// Every rule whose scope matches advances its match count, shadowed
    /// ones included; only the newest matching rule answers.
    pub(crate) fn resolve(&mut self, request: &Request) -> Resolution {
        let mut selected = None;
        for rule in self.rules.iter_mut().rev() {
            if !rule.scope.matches(request) {
                continue;
            }
            let position = rule.matched;
            rule.matched += 1;
            if selected.is_none() {
                let outcome = rule
                    .once
                    .get(position)
                    .or(rule.default.as_ref())
                    .cloned()
                    .unwrap_or(Outcome::Resolve(None));
                tracing::debug!(
                    operation = %request.operation,
                    rule = rule.id.0,
                    position,
                    "selected rule"
                );
                selected = Some(Resolution {
                    rule: Some(rule.id),
                    outcome,
                });
            }
        }

        selected.unwrap_or_else(|| {
            tracing::trace!(operation = %request.operation, "no rule matched");
            Resolution {
                rule: None,
                outcome: Outcome::Resolve(None),
            }
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }

    fn rule_mut(&mut self, id: RuleId) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|rule| rule.id == id)
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;

//! Style rules and selector matching.

use crate::error::StyleError;
use crate::style::Style;
use serde::{Deserialize, Serialize};

/// Interaction state a component is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentState {
    #[default]
    Normal,
    Hover,
    Focus,
    Active,
    Disabled,
}

/// What a selector needs to know about a component.
pub trait Styled {
    fn type_tag(&self) -> &str;
    fn id(&self) -> Option<&str>;
    /// The raw class attribute; whitespace separates class names.
    fn class_names(&self) -> Option<&str>;
    fn inline_style(&self) -> Option<&Style>;
}

/// A style rule: optional type, id, class and state constraints plus a body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSelector {
    applied_type: Option<String>,
    applied_id: Option<String>,
    applied_class: Option<String>,
    applied_state: Option<ComponentState>,
    body: Style,
}

impl StyleSelector {
    /// A rule with no constraints; it matches every component.
    pub fn new(body: Style) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, type_tag: impl Into<String>) -> Self {
        self.applied_type = Some(type_tag.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.applied_id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.applied_class = Some(class.into());
        self
    }

    pub fn with_state(mut self, state: ComponentState) -> Self {
        self.applied_state = Some(state);
        self
    }

    pub fn applied_type(&self) -> Option<&str> {
        self.applied_type.as_deref()
    }

    pub fn applied_id(&self) -> Option<&str> {
        self.applied_id.as_deref()
    }

    pub fn applied_class(&self) -> Option<&str> {
        self.applied_class.as_deref()
    }

    pub fn applied_state(&self) -> Option<ComponentState> {
        self.applied_state
    }

    pub fn body(&self) -> &Style {
        &self.body
    }

    pub fn is_catch_all(&self) -> bool {
        self.applied_type.is_none() && self.applied_id.is_none() && self.applied_class.is_none()
    }

    /// Every specified dimension must match. The state is recorded on the rule
    /// but does not take part in matching.
    pub fn matches<C: Styled + ?Sized>(&self, component: &C, _state: ComponentState) -> bool {
        if self.is_catch_all() {
            return true;
        }
        let mut matched = true;
        if let Some(id) = &self.applied_id {
            if component.id() != Some(id.as_str()) {
                matched = false;
            }
        }
        if let Some(type_tag) = &self.applied_type {
            if component.type_tag() != type_tag {
                matched = false;
            }
        }
        if let Some(class) = &self.applied_class {
            let has_class = component
                .class_names()
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class));
            if !has_class {
                matched = false;
            }
        }
        matched
    }
}

/// Rules in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<StyleSelector>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: StyleSelector) -> Result<(), StyleError> {
        let constraints = [
            ("id", &rule.applied_id),
            ("class", &rule.applied_class),
            ("type", &rule.applied_type),
        ];
        for (what, value) in constraints {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(StyleError::Argument(format!(
                    "selector {what} must not be empty"
                )));
            }
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn rules(&self) -> &[StyleSelector] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends clones of every matching rule's items to `target`, in
    /// declaration order. Returns how many rules matched.
    pub fn merge_into<C: Styled + ?Sized>(
        &self,
        target: &mut Style,
        component: &C,
        state: ComponentState,
    ) -> usize {
        let mut matched = 0;
        for rule in self.rules.iter().filter(|r| r.matches(component, state)) {
            target.merge_from(&rule.body, false);
            matched += 1;
        }
        log::trace!(
            "{} of {} rules matched <{}>",
            matched,
            self.rules.len(),
            component.type_tag()
        );
        matched
    }
}

//! Ancestor-aware style resolution.

use crate::selector::{ComponentState, RuleSet, Styled};
use crate::style::Style;

/// Stack of style frames: index 0 is the root ancestor, the top is the
/// component being resolved.
#[derive(Debug, Clone, Default)]
pub struct StyleCascade {
    frames: Vec<Style>,
}

impl StyleCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, style: Style) {
        self.frames.push(style);
    }

    pub fn pop(&mut self) -> Option<Style> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> Option<&Style> {
        self.frames.last()
    }

    /// Resolves the top frame: inherited items from every ancestor (root
    /// first), then all of the top frame's own items, flattened.
    pub fn full_style(&self) -> Style {
        let mut resolved = Style::new();
        let Some((own, ancestors)) = self.frames.split_last() else {
            return resolved;
        };
        for frame in ancestors {
            resolved.merge_from(frame, true);
        }
        resolved.merge_from(own, false);
        resolved.flatten()
    }

    /// A component's own style: matching rules in declaration order, then the
    /// inline style so it wins over any rule.
    pub fn component_style<C: Styled + ?Sized>(
        rules: &RuleSet,
        component: &C,
        state: ComponentState,
    ) -> Style {
        let mut style = Style::new();
        rules.merge_into(&mut style, component, state);
        if let Some(inline) = component.inline_style() {
            style.merge_from(inline, false);
        }
        style
    }
}

//! The component tree handed to the renderer.
//!
//! Components are plain data: a type tag, optional id and classes, an optional
//! inline style and one piece of content. Trees are usually built by a markup
//! layer; they can also be read from JSON, where the inline style is written
//! as declarations (`"font-size: 14; fill-color: #333"`).

use folio_style::{ComponentState, RuleSet, Style, StyleSelector, Styled};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentContent {
    #[default]
    None,
    Text(String),
    /// Key of an image resource, mapped to a path by the registry.
    Image(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentNode {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "class")]
    pub classes: Option<String>,
    #[serde(default, deserialize_with = "inline_declarations")]
    pub style: Option<Style>,
    #[serde(default)]
    pub content: ComponentContent,
    #[serde(default)]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = ComponentContent::Text(text.into());
        self
    }

    pub fn with_image(mut self, key: impl Into<String>) -> Self {
        self.content = ComponentContent::Image(key.into());
        self
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }
}

impl Styled for ComponentNode {
    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn class_names(&self) -> Option<&str> {
        self.classes.as_deref()
    }

    fn inline_style(&self) -> Option<&Style> {
        self.style.as_ref()
    }
}

fn inline_declarations<'de, D>(deserializer: D) -> Result<Option<Style>, D::Error>
where
    D: Deserializer<'de>,
{
    let text: Option<String> = Option::deserialize(deserializer)?;
    text.map(|t| Style::from_declarations(&t).map_err(serde::de::Error::custom))
        .transpose()
}

/// A style rule as written in a document file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleSpec {
    #[serde(default, rename = "type")]
    pub type_tag: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub state: Option<ComponentState>,
    #[serde(deserialize_with = "declarations")]
    pub style: Style,
}

fn declarations<'de, D>(deserializer: D) -> Result<Style, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    Style::from_declarations(&text).map_err(serde::de::Error::custom)
}

impl RuleSpec {
    fn into_selector(self) -> StyleSelector {
        let mut rule = StyleSelector::new(self.style);
        if let Some(t) = self.type_tag {
            rule = rule.with_type(t);
        }
        if let Some(id) = self.id {
            rule = rule.with_id(id);
        }
        if let Some(class) = self.class {
            rule = rule.with_class(class);
        }
        if let Some(state) = self.state {
            rule = rule.with_state(state);
        }
        rule
    }
}

/// A document file: the style rules and the root component.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    pub root: ComponentNode,
}

impl Document {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds the rule set in declaration order.
    pub fn rule_set(&self) -> Result<RuleSet, folio_style::StyleError> {
        let mut rules = RuleSet::new();
        for spec in &self.rules {
            rules.push(spec.clone().into_selector())?;
        }
        Ok(rules)
    }
}

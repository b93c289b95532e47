//! Outbound message model — text, flex and template messages as the LINE
//! Messaging API expects them on the wire.

use serde::Serialize;

/// A message sent through the reply API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text {
        text: String,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: FlexContainer,
    },
    Template {
        #[serde(rename = "altText")]
        alt_text: String,
        template: Template,
    },
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn flex(alt_text: impl Into<String>, contents: impl Into<FlexContainer>) -> Self {
        Self::Flex {
            alt_text: alt_text.into(),
            contents: contents.into(),
        }
    }

    pub fn template(alt_text: impl Into<String>, template: Template) -> Self {
        Self::Template {
            alt_text: alt_text.into(),
            template,
        }
    }
}

/// An action attached to a button or text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Uri {
        label: String,
        uri: String,
    },
    Postback {
        label: String,
        data: String,
        #[serde(rename = "displayText", skip_serializing_if = "Option::is_none")]
        display_text: Option<String>,
    },
}

impl Action {
    pub fn uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::Uri {
            label: label.into(),
            uri: uri.into(),
        }
    }

    /// Postback action that echoes its label into the chat when tapped.
    pub fn postback(label: impl Into<String>, data: impl Into<String>) -> Self {
        let label = label.into();
        Self::Postback {
            display_text: Some(label.clone()),
            label,
            data: data.into(),
        }
    }
}

/// Template message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Template {
    Buttons {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        text: String,
        actions: Vec<Action>,
    },
}

// ── Flex ────────────────────────────────────────────────────────────────

/// Top-level flex container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlexContainer {
    Bubble(Bubble),
    Carousel(Carousel),
}

impl From<Bubble> for FlexContainer {
    fn from(bubble: Bubble) -> Self {
        Self::Bubble(bubble)
    }
}

impl From<Carousel> for FlexContainer {
    fn from(carousel: Carousel) -> Self {
        Self::Carousel(carousel)
    }
}

/// A single card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<FlexBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<FlexBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FlexBox>,
}

impl Bubble {
    pub fn new() -> Self {
        Self {
            kind: "bubble",
            size: None,
            header: None,
            body: None,
            footer: None,
        }
    }

    pub fn size(mut self, size: &str) -> Self {
        self.size = Some(size.to_string());
        self
    }

    pub fn header(mut self, header: FlexBox) -> Self {
        self.header = Some(header);
        self
    }

    pub fn body(mut self, body: FlexBox) -> Self {
        self.body = Some(body);
        self
    }

    pub fn footer(mut self, footer: FlexBox) -> Self {
        self.footer = Some(footer);
        self
    }
}

impl Default for Bubble {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontally scrolling list of bubbles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carousel {
    #[serde(rename = "type")]
    kind: &'static str,
    pub contents: Vec<Bubble>,
}

impl Carousel {
    /// LINE rejects carousels with more bubbles than this.
    pub const MAX_BUBBLES: usize = 12;

    pub fn new(contents: Vec<Bubble>) -> Self {
        Self {
            kind: "carousel",
            contents,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Horizontal,
    Vertical,
}

/// A flex component. Each variant serializes its own `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Box(FlexBox),
    Text(FlexText),
    Button(FlexButton),
    Separator(Separator),
}

/// Thin horizontal rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Separator {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl Default for Separator {
    fn default() -> Self {
        Self { kind: "separator" }
    }
}

impl From<FlexBox> for Component {
    fn from(b: FlexBox) -> Self {
        Self::Box(b)
    }
}

impl From<FlexText> for Component {
    fn from(t: FlexText) -> Self {
        Self::Text(t)
    }
}

impl From<FlexButton> for Component {
    fn from(b: FlexButton) -> Self {
        Self::Button(b)
    }
}

/// Layout box holding other components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexBox {
    #[serde(rename = "type")]
    kind: &'static str,
    pub layout: Layout,
    pub contents: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
}

impl FlexBox {
    pub fn new(layout: Layout) -> Self {
        Self {
            kind: "box",
            layout,
            contents: Vec::new(),
            margin: None,
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Layout::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Layout::Vertical)
    }

    pub fn margin(mut self, margin: &str) -> Self {
        self.margin = Some(margin.to_string());
        self
    }

    pub fn push(mut self, component: impl Into<Component>) -> Self {
        self.contents.push(component.into());
        self
    }

    pub fn separator(mut self) -> Self {
        self.contents.push(Component::Separator(Separator::default()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexText {
    #[serde(rename = "type")]
    kind: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl FlexText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: text.into(),
            weight: None,
            size: None,
            margin: None,
            wrap: None,
            color: None,
            action: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = Some("bold".to_string());
        self
    }

    pub fn size(mut self, size: &str) -> Self {
        self.size = Some(size.to_string());
        self
    }

    pub fn margin(mut self, margin: &str) -> Self {
        self.margin = Some(margin.to_string());
        self
    }

    pub fn wrap(mut self) -> Self {
        self.wrap = Some(true);
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexButton {
    #[serde(rename = "type")]
    kind: &'static str,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
}

impl FlexButton {
    pub fn new(action: Action) -> Self {
        Self {
            kind: "button",
            action,
            style: None,
            height: None,
            margin: None,
        }
    }

    pub fn style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn height(mut self, height: &str) -> Self {
        self.height = Some(height.to_string());
        self
    }

    pub fn margin(mut self, margin: &str) -> Self {
        self.margin = Some(margin.to_string());
        self
    }
}

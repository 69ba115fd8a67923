//! Template compiler and renderer
//!
//! A template is plain text with `${name}` or `${name:argument}` tokens. On
//! first render the template is compiled into an ordered list of segments,
//! one per token occurrence whose name is registered; the list is reused
//! until the placeholder registry changes or [`Formatter::reset`] is called.
//!
//! Tokens naming an unregistered placeholder are left in the output as
//! written. `${prefix}` is always available: it renders as the logger prefix
//! followed by a space, or as nothing when the prefix is empty.

use super::cache;
use super::placeholder::{
    PlaceholderContext, PlaceholderNames, Placeholders, SharedPlaceholder,
};
use super::placeholders::default_placeholders;
use parking_lot::{RwLock, RwLockWriteGuard};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Template used by loggers that were not given one.
pub const DEFAULT_FORMAT: &str = r"${time} ${level:[%s]\::right:true} ${prefix}%s";

/// Where the logger inserts the message body in a rendered template.
pub const MESSAGE_TOKEN: &str = "%s";

/// Token replaced by the logger prefix.
pub const PREFIX_TOKEN: &str = "${prefix}";

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_]+)(?::([^}]*))?\}").expect("placeholder token pattern is valid")
});

/// Renders the leading part of a log record for a given level and prefix.
///
/// Implemented by [`Format`]; loggers accept any implementation.
pub trait Formatter: Send + Sync {
    /// Replace the whole placeholder registry.
    fn set_placeholders(&self, placeholders: Placeholders);

    /// Add or replace one placeholder, keeping the others.
    fn set_placeholder(&self, name: &str, placeholder: SharedPlaceholder);

    /// Copy of the current registry.
    fn placeholders(&self) -> Placeholders;

    /// Render the template for one record.
    fn render(&self, context: &PlaceholderContext, prefix: &str) -> String;

    /// Drop compiled state so the next render compiles again.
    fn reset(&self);
}

struct Replacement {
    token: String,
    placeholder: SharedPlaceholder,
    argument: String,
}

enum Segment {
    Literal(String),
    Replacement(Replacement),
    Prefix,
}

struct FormatState {
    placeholders: Placeholders,
    compiled: Option<Vec<Segment>>,
}

/// The default [`Formatter`]: a template compiled against a placeholder
/// registry.
///
/// Rendering joins the compiled segments in template order. Each token
/// occurrence is filled at its own position, and text returned by a
/// placeholder is copied as is: a placeholder that returns `${level}` puts
/// that literal text in the output instead of a second substitution.
///
/// ```
/// use rust_template_logger::core::{placeholder_fn, Format, Formatter, LogLevel, PlaceholderContext};
///
/// let format = Format::new("${raw} ${level}");
/// format.set_placeholder(
///     "raw",
///     placeholder_fn(|_: &PlaceholderContext, _: &str| "${level}".to_string()),
/// );
///
/// let context = PlaceholderContext::new(LogLevel::Error);
/// assert_eq!(format.render(&context, ""), "${level} ERROR");
/// ```
///
/// # Examples
///
/// ```
/// use rust_template_logger::core::{Format, Formatter, LogLevel, PlaceholderContext};
///
/// let format = Format::new("[${level}] ${prefix}%s");
/// let context = PlaceholderContext::new(LogLevel::Warning);
/// assert_eq!(format.render(&context, "db"), "[WARNING] db %s");
/// assert_eq!(format.render(&context, ""), "[WARNING] %s");
/// ```
pub struct Format {
    template: String,
    state: RwLock<FormatState>,
}

impl Format {
    /// Create a format with the built-in placeholders (`level`, `line`,
    /// `file`, `time`).
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_placeholders(template, default_placeholders())
    }

    pub fn with_placeholders(template: impl Into<String>, placeholders: Placeholders) -> Self {
        Self {
            template: template.into(),
            state: RwLock::new(FormatState {
                placeholders,
                compiled: None,
            }),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn is_compiled(&self) -> bool {
        self.state.read().compiled.is_some()
    }

    /// Matched text of every compiled replacement, in template order.
    ///
    /// Empty until the first render after construction or a reset.
    pub fn compiled_tokens(&self) -> Vec<String> {
        let state = self.state.read();
        state
            .compiled
            .iter()
            .flatten()
            .filter_map(|segment| match segment {
                Segment::Replacement(replacement) => Some(replacement.token.clone()),
                _ => None,
            })
            .collect()
    }

    fn invalidate(state: &mut FormatState) {
        state.compiled = None;
        cache::invalidate();
    }

    fn compile(template: &str, placeholders: &Placeholders) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut literal_start = 0;

        for captures in TOKEN.captures_iter(template) {
            let Some(token) = captures.get(0) else {
                continue;
            };
            let name = &captures[1];

            let segment = match placeholders.get(name) {
                Some(placeholder) => Segment::Replacement(Replacement {
                    token: token.as_str().to_string(),
                    placeholder: Arc::clone(placeholder),
                    argument: captures
                        .get(2)
                        .map_or_else(String::new, |m| m.as_str().to_string()),
                }),
                None if token.as_str() == PREFIX_TOKEN => Segment::Prefix,
                // unknown names stay in the surrounding literal
                None => continue,
            };

            if token.start() > literal_start {
                segments.push(Segment::Literal(
                    template[literal_start..token.start()].to_string(),
                ));
            }
            segments.push(segment);
            literal_start = token.end();
        }

        if literal_start < template.len() {
            segments.push(Segment::Literal(template[literal_start..].to_string()));
        }

        segments
    }

    fn assemble(segments: &[Segment], context: &PlaceholderContext, prefix: &str) -> String {
        let mut rendered = String::new();

        for segment in segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Replacement(replacement) => rendered.push_str(
                    &replacement
                        .placeholder
                        .render(context, &replacement.argument),
                ),
                Segment::Prefix => {
                    if !prefix.is_empty() {
                        rendered.push_str(prefix);
                        rendered.push(' ');
                    }
                }
            }
        }

        rendered
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

impl Formatter for Format {
    fn set_placeholders(&self, placeholders: Placeholders) {
        let mut state = self.state.write();
        state.placeholders = placeholders;
        Self::invalidate(&mut state);
    }

    fn set_placeholder(&self, name: &str, placeholder: SharedPlaceholder) {
        let mut state = self.state.write();
        state.placeholders.insert(name.to_string(), placeholder);
        Self::invalidate(&mut state);
    }

    fn placeholders(&self) -> Placeholders {
        self.state.read().placeholders.clone()
    }

    fn render(&self, context: &PlaceholderContext, prefix: &str) -> String {
        {
            let state = self.state.read();
            if let Some(segments) = &state.compiled {
                return Self::assemble(segments, context, prefix);
            }
        }

        let mut state = self.state.write();
        if state.compiled.is_none() {
            let segments = Self::compile(&self.template, &state.placeholders);
            state.compiled = Some(segments);
        }

        let state = RwLockWriteGuard::downgrade(state);
        Self::assemble(state.compiled.as_deref().unwrap_or(&[]), context, prefix)
    }

    fn reset(&self) {
        self.state.write().compiled = None;
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Format")
            .field("template", &self.template)
            .field("placeholders", &PlaceholderNames(&state.placeholders))
            .field("compiled", &state.compiled.is_some())
            .finish()
    }
}

//! Presentation builder: turns resolved sensors into the card's visual tree.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{CardConfig, CardOptions};
use crate::i18n::{INVALID_DATE, Language, Translations, format_date};
use crate::model::{EntityId, EntityState, StateSnapshot};

/// Icon used when a sensor carries none.
pub const DEFAULT_ICON: &str = "mdi:recycle";
/// Colour used when a sensor carries none.
pub const DEFAULT_COLOR: &str = "#4CAF50";
/// Shown instead of rows when no sensor exists. Intentionally not translated.
pub const NO_SENSORS_TEXT: &str = "No waste collection sensors found";
/// Hex alpha appended to the row colour for the background tint.
const TINT_ALPHA: &str = "20";

/// One upcoming collection, derived fresh on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionRow {
    /// Collection-type name, taken from the sensor state.
    pub label: String,
    /// Parsed collection date; `None` when upstream sent something unparseable.
    pub date: Option<NaiveDate>,
    /// Date formatted for the host's locale.
    pub date_text: String,
    /// Weekday name as published upstream.
    pub weekday: String,
    /// Icon name.
    pub icon: String,
    /// Row colour.
    pub color: String,
    /// Urgency badge text.
    pub days_until_text: String,
}

impl CollectionRow {
    fn from_state(state: &EntityState, locale: &str, translations: &Translations) -> Self {
        let date = state.date();
        let date_text = date.map_or_else(|| INVALID_DATE.to_owned(), |day| format_date(locale, day));
        Self {
            label: state.state.clone(),
            date,
            date_text,
            weekday: state.weekday().unwrap_or_default().to_owned(),
            icon: state.icon().unwrap_or(DEFAULT_ICON).to_owned(),
            color: state.color().unwrap_or(DEFAULT_COLOR).to_owned(),
            days_until_text: translations.days_until_text(state.days_until()),
        }
    }

    /// Secondary line: `weekday, date`, or just the date when the weekday is missing.
    #[must_use]
    pub fn subtitle(&self) -> String {
        if self.weekday.is_empty() {
            self.date_text.clone()
        } else {
            format!("{}, {}", self.weekday, self.date_text)
        }
    }
}

/// Colours applied to a rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowStyle {
    /// Partially transparent variant of the row colour.
    pub background: String,
    /// Icon foreground colour.
    pub icon_color: String,
    /// Solid background of the urgency badge.
    pub badge_background: String,
}

impl RowStyle {
    fn for_color(color: &str) -> Self {
        Self {
            background: format!("{color}{TINT_ALPHA}"),
            icon_color: color.to_owned(),
            badge_background: color.to_owned(),
        }
    }
}

/// Content node inside the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// A collection row and its styling.
    Collection {
        /// Row data.
        row: CollectionRow,
        /// Row colours.
        style: RowStyle,
    },
    /// Fixed message shown when no sensor was found.
    Placeholder {
        /// Message text.
        text: String,
    },
    /// A sensor that vanished between resolution and lookup.
    Empty,
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualTree {
    /// Nothing to draw yet: snapshot or configuration missing.
    Empty,
    /// A card with a header and its content nodes.
    Card {
        /// Header text.
        header: String,
        /// Content nodes in display order.
        nodes: Vec<Node>,
    },
}

impl VisualTree {
    /// Header text, if a card was produced.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        match self {
            VisualTree::Empty => None,
            VisualTree::Card { header, .. } => Some(header),
        }
    }

    /// Content nodes; empty for [`VisualTree::Empty`].
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        match self {
            VisualTree::Empty => &[],
            VisualTree::Card { nodes, .. } => nodes,
        }
    }

    /// Collection rows only, skipping placeholders and empty fragments.
    pub fn rows(&self) -> impl Iterator<Item = &CollectionRow> {
        self.nodes().iter().filter_map(|node| match node {
            Node::Collection { row, .. } => Some(row),
            Node::Placeholder { .. } | Node::Empty => None,
        })
    }
}

/// Build the visual tree for the given inputs.
///
/// `language` is the host's language code. Texts come from its translation table, or
/// English when it has none; dates always follow the code itself.
///
/// Pure: identical inputs always yield an identical tree. Missing snapshot or
/// configuration is the "not ready" state and yields [`VisualTree::Empty`].
#[must_use]
pub fn render(
    snapshot: Option<&StateSnapshot>,
    sensors: &[EntityId],
    config: Option<&CardConfig>,
    language: Option<&str>,
) -> VisualTree {
    let (Some(snapshot), Some(config)) = (snapshot, config) else {
        tracing::trace!("render skipped, card not ready");
        return VisualTree::Empty;
    };

    let locale = language.filter(|code| !code.is_empty()).unwrap_or("en");
    let language = Language::resolve(Some(locale));
    let translations = language.translations();
    let options = CardOptions::resolve(config, translations);

    let nodes = if sensors.is_empty() {
        vec![Node::Placeholder {
            text: NO_SENSORS_TEXT.to_owned(),
        }]
    } else {
        sensors
            .iter()
            .take(options.rows_to_show)
            .map(|id| match snapshot.get(id) {
                Some(state) => {
                    let row = CollectionRow::from_state(state, locale, translations);
                    let style = RowStyle::for_color(&row.color);
                    Node::Collection { row, style }
                }
                None => {
                    tracing::debug!(entity_id = %id, "sensor disappeared before lookup");
                    Node::Empty
                }
            })
            .collect()
    };

    tracing::trace!(
        locale,
        rows = nodes.len(),
        "rendered collection card"
    );

    VisualTree::Card {
        header: options.header,
        nodes,
    }
}

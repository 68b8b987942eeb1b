//! Attraction UI components
//!
//! Message texts (Telegram HTML) and transport-agnostic inline button layouts.
//! Every piece of backend or user text goes through `html_escape` before it is
//! placed into a message.

use crate::browser::CallbackAction;
use crate::config::LIST_TEXT_MAX_CHARS;
use crate::models::{Attraction, AttractionDetail};
use crate::pagination::{PageView, SearchOrigin};
use crate::utils::{is_blank, truncate_display};
use html_escape::{encode_double_quoted_attribute, encode_text};

// ─────────────────────────────────────────────────────────────────────────────
// Button layout
// ─────────────────────────────────────────────────────────────────────────────

/// A single inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    /// Text shown on the button
    pub label: String,
    /// Action performed when pressed
    pub action: CallbackAction,
}

impl InlineButton {
    fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Rows of inline buttons attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    /// Button rows, top to bottom
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    /// True when there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trait definition
// ─────────────────────────────────────────────────────────────────────────────

/// Static texts of the attraction bot
pub trait AttractionView {
    /// Greeting sent on /start
    fn welcome_message() -> &'static str;

    /// Usage hint sent on /help
    fn help_message() -> &'static str;

    /// Label of the reply keyboard button that shares the location
    fn share_location_label() -> &'static str;

    /// Prompt when the user sent nothing usable as a city name
    fn empty_city_prompt() -> &'static str;

    /// City search failed on the backend side
    fn search_failed() -> &'static str;

    /// Location search failed on the backend side
    fn location_search_failed() -> &'static str;

    /// City search returned nothing
    fn nothing_found_in_city(city: &str) -> String;

    /// Location search returned nothing
    fn nothing_found_nearby() -> &'static str;

    /// A button was pressed but no search is stored for the chat
    fn results_expired() -> &'static str;

    /// Selected item does not exist in the stored results
    fn attraction_not_found() -> &'static str;

    /// Detail request failed on the backend side
    fn detail_failed() -> &'static str;

    /// Button payload could not be understood
    fn invalid_selection() -> &'static str;
}

// ─────────────────────────────────────────────────────────────────────────────
// Default implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Default English-language implementation of `AttractionView`
pub struct DefaultAttractionView;

impl AttractionView for DefaultAttractionView {
    fn welcome_message() -> &'static str {
        "👋 <b>Hi! I will help you find interesting places.</b>\n\n\
         🏙️ Send me a city name (for example: \"Moscow\", \"Saint Petersburg\")\n\
         🗺️ Or share your location to search nearby"
    }

    fn help_message() -> &'static str {
        "Send a city name to see its attractions, or share your location to find \
         attractions around you.\n\n\
         Use the buttons under the results to switch pages and open details."
    }

    fn share_location_label() -> &'static str {
        "📍 Share location"
    }

    fn empty_city_prompt() -> &'static str {
        "✍️ Send a city name or share your location."
    }

    fn search_failed() -> &'static str {
        "❌ Failed to search attractions. Please try again later."
    }

    fn location_search_failed() -> &'static str {
        "❌ Failed to search attractions near your location."
    }

    fn nothing_found_in_city(city: &str) -> String {
        format!(
            "🏙️ No attractions found in \"{}\" 😢\nTry another city or check the spelling.",
            encode_text(city)
        )
    }

    fn nothing_found_nearby() -> &'static str {
        "📍 No attractions found near you.\nTry sending a city name instead."
    }

    fn results_expired() -> &'static str {
        "⌛ These results are no longer available. Send a city name or your location to search again."
    }

    fn attraction_not_found() -> &'static str {
        "🔍 Attraction not found."
    }

    fn detail_failed() -> &'static str {
        "❌ Failed to load attraction details."
    }

    fn invalid_selection() -> &'static str {
        "⚠️ Invalid selection."
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Result pages
// ─────────────────────────────────────────────────────────────────────────────

fn display_name(id: i64, name: &str) -> String {
    if is_blank(name) {
        format!("Attraction #{id}")
    } else {
        encode_text(name.trim()).into_owned()
    }
}

fn list_line(text: &str) -> Option<String> {
    if is_blank(text) {
        return None;
    }
    Some(encode_text(&truncate_display(text.trim(), LIST_TEXT_MAX_CHARS)).into_owned())
}

fn render_item(out: &mut String, ordinal: usize, item: &Attraction) {
    out.push_str(&format!("{ordinal}. {}", display_name(item.id, &item.name)));
    if let Some(rating) = item.rating() {
        out.push_str(&format!(" (⭐ {rating:.1})"));
    }
    out.push('\n');

    if let Some(address) = list_line(&item.address) {
        out.push_str(&format!("   📍 {address}\n"));
    }
    if let Some(description) = list_line(&item.description) {
        out.push_str(&format!("   📝 {description}\n"));
    }
    out.push('\n');
}

/// Text of one result page: a header followed by the page's items.
#[must_use]
pub fn render_page(view: &PageView<'_>) -> String {
    let page = view.page + 1;
    let total = view.total_pages;
    let mut out = match view.origin {
        SearchOrigin::City(city) => format!(
            "🏙️ Attractions in {} (page {page}/{total}):\n\n",
            encode_text(city)
        ),
        SearchOrigin::Location { .. } => {
            format!("📍 Attractions near you (page {page}/{total}):\n\n")
        }
    };

    for (position, item) in view.items.iter().enumerate() {
        render_item(&mut out, view.offset + position + 1, item);
    }

    out.truncate(out.trim_end().len());
    out
}

/// Buttons under a result page: navigation row, then one row per item.
#[must_use]
pub fn page_keyboard(view: &PageView<'_>) -> InlineKeyboard {
    let mut rows = Vec::with_capacity(view.items.len() + 1);

    let mut navigation = Vec::new();
    if view.has_previous() {
        navigation.push(InlineButton::new(
            "⬅️ Back",
            CallbackAction::Page(page_number(view.page) - 1),
        ));
    }
    if view.has_next() {
        navigation.push(InlineButton::new(
            "Next ➡️",
            CallbackAction::Page(page_number(view.page) + 1),
        ));
    }
    if !navigation.is_empty() {
        rows.push(navigation);
    }

    for slot in 0..view.items.len() {
        rows.push(vec![InlineButton::new(
            format!("🏛️ {}", view.offset + slot + 1),
            CallbackAction::Select {
                page: view.page,
                slot,
            },
        )]);
    }

    InlineKeyboard { rows }
}

fn page_number(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(i64::MAX)
}

// ─────────────────────────────────────────────────────────────────────────────
// Detail view
// ─────────────────────────────────────────────────────────────────────────────

/// Longer photo URLs are not linked.
const MAX_PHOTO_URL_LEN: usize = 2048;

fn field_lines(fields: &[(&str, &str, &str)]) -> String {
    fields
        .iter()
        .filter(|(_, _, value)| !is_blank(value))
        .map(|(icon, label, value)| format!("{icon} <b>{label}:</b> {}", encode_text(value.trim())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_web_url(url: &str) -> bool {
    url.len() <= MAX_PHOTO_URL_LEN && (url.starts_with("https://") || url.starts_with("http://"))
}

fn photo_links(detail: &AttractionDetail) -> Vec<&str> {
    let mut urls: Vec<&str> = Vec::with_capacity(detail.photos.len() + 1);
    let candidates = std::iter::once(detail.main_photo_url.as_str())
        .chain(detail.photos.iter().map(String::as_str))
        .map(str::trim);
    for url in candidates {
        if is_web_url(url) && !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

/// Full text of one attraction. Empty fields are left out.
#[must_use]
pub fn render_detail(detail: &AttractionDetail) -> String {
    let mut sections = vec![
        format!("<b>🏛️ {}</b>", display_name(detail.id, &detail.name)),
        field_lines(&[
            ("📍", "Address", detail.address.as_str()),
            ("🏙️", "City", detail.city.as_str()),
        ]),
        field_lines(&[("📖", "Description", detail.best_description())]),
        field_lines(&[
            ("🕒", "Working hours", detail.working_hours.as_str()),
            ("📞", "Phone", detail.phone.as_str()),
            ("🌐", "Website", detail.website.as_str()),
            ("💵", "Cost", detail.cost.as_str()),
        ]),
    ];

    if let Some(rating) = detail.rating() {
        sections.push(format!("⭐ <b>Rating:</b> {rating:.1}/5"));
    }

    let photos = photo_links(detail);
    if !photos.is_empty() {
        let links: Vec<String> = photos
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let label = if photos.len() == 1 {
                    "Photo".to_string()
                } else {
                    format!("Photo {}", i + 1)
                };
                format!(
                    "📸 <a href=\"{}\">{label}</a>",
                    encode_double_quoted_attribute(url)
                )
            })
            .collect();
        // One link per line
        sections.push(links.join("\n"));
    }

    sections.retain(|section| !section.is_empty());
    sections.join("\n\n")
}

/// Single "back to list" button returning to `page`.
#[must_use]
pub fn detail_keyboard(page: usize) -> InlineKeyboard {
    InlineKeyboard {
        rows: vec![vec![InlineButton::new(
            "↩️ Back to list",
            CallbackAction::Page(page_number(page)),
        )]],
    }
}

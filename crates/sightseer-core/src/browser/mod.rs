//! Attraction browsing
//!
//! Turns inbound events (city text, shared location, button presses) into
//! replies. Transport-agnostic: the caller only has to deliver the `Reply` text
//! with its optional inline keyboard.

mod callback;

pub use callback::{CallbackAction, CallbackParseError};

use crate::api::AttractionApi;
use crate::models::Attraction;
use crate::pagination::{PaginationState, SearchOrigin};
use crate::session::{ConversationId, SessionStore};
use crate::view::{
    detail_keyboard, page_keyboard, render_detail, render_page, AttractionView,
    DefaultAttractionView, InlineKeyboard,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Message to send back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTML-formatted text
    pub text: String,
    /// Inline buttons under the message, if any
    pub keyboard: Option<InlineKeyboard>,
}

impl Reply {
    /// Plain reply without buttons.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    /// Reply with inline buttons; an empty layout is dropped.
    #[must_use]
    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: (!keyboard.is_empty()).then_some(keyboard),
        }
    }

    fn page(state: &PaginationState) -> Self {
        let view = state.current();
        Self::with_keyboard(render_page(&view), page_keyboard(&view))
    }
}

/// Handles searches and navigation for all conversations.
///
/// Backend calls are made without holding a session lock; each state change
/// happens under the conversation's lock.
#[derive(Clone)]
pub struct AttractionBrowser {
    api: Arc<dyn AttractionApi>,
    sessions: Arc<dyn SessionStore>,
    search_radius: f64,
}

impl AttractionBrowser {
    /// Create a browser over the given backend and session store.
    #[must_use]
    pub fn new(
        api: Arc<dyn AttractionApi>,
        sessions: Arc<dyn SessionStore>,
        search_radius: f64,
    ) -> Self {
        Self {
            api,
            sessions,
            search_radius,
        }
    }

    /// Search attractions in `city` and show the first page.
    pub async fn search_city(&self, conversation: ConversationId, city: &str) -> Reply {
        let city = city.trim();
        if city.is_empty() {
            return Reply::plain(DefaultAttractionView::empty_city_prompt());
        }

        info!(%conversation, city, "City search");
        match self.api.search_by_city(city).await {
            Ok(attractions) => {
                self.store_results(conversation, SearchOrigin::City(city.to_string()), attractions)
                    .await
                    .unwrap_or_else(|| {
                        Reply::plain(DefaultAttractionView::nothing_found_in_city(city))
                    })
            }
            Err(e) => {
                warn!(%conversation, city, "City search failed: {e}");
                Reply::plain(DefaultAttractionView::search_failed())
            }
        }
    }

    /// Search attractions around a shared location and show the first page.
    pub async fn search_location(
        &self,
        conversation: ConversationId,
        latitude: f64,
        longitude: f64,
    ) -> Reply {
        info!(%conversation, latitude, longitude, "Location search");
        match self
            .api
            .search_by_location(latitude, longitude, self.search_radius)
            .await
        {
            Ok(attractions) => self
                .store_results(
                    conversation,
                    SearchOrigin::Location {
                        latitude,
                        longitude,
                    },
                    attractions,
                )
                .await
                .unwrap_or_else(|| Reply::plain(DefaultAttractionView::nothing_found_nearby())),
            Err(e) => {
                warn!(%conversation, "Location search failed: {e}");
                Reply::plain(DefaultAttractionView::location_search_failed())
            }
        }
    }

    /// Replace the conversation's results and render page 0.
    ///
    /// Returns `None` without touching the store when there are no results.
    async fn store_results(
        &self,
        conversation: ConversationId,
        origin: SearchOrigin,
        attractions: Vec<Attraction>,
    ) -> Option<Reply> {
        let count = attractions.len();
        let state = PaginationState::new(origin, attractions)?;
        let reply = Reply::page(&state);

        *self.sessions.lock(conversation).await = Some(state);
        info!(%conversation, count, "Search results stored");
        Some(reply)
    }

    /// Dispatch a button press by its payload.
    pub async fn handle_callback(&self, conversation: ConversationId, data: &str) -> Reply {
        match data.parse::<CallbackAction>() {
            Ok(CallbackAction::Page(page)) => self.open_page(conversation, page).await,
            Ok(CallbackAction::Select { page, slot }) => {
                self.select_attraction(conversation, page, slot).await
            }
            Err(e) => {
                warn!(%conversation, "Ignoring callback: {e}");
                Reply::plain(DefaultAttractionView::invalid_selection())
            }
        }
    }

    /// Show page `requested` of the stored results, clamped into range.
    pub async fn open_page(&self, conversation: ConversationId, requested: i64) -> Reply {
        let mut guard = self.sessions.lock(conversation).await;
        let Some(state) = &mut *guard else {
            info!(%conversation, "Page requested without stored results");
            return Reply::plain(DefaultAttractionView::results_expired());
        };

        state.go_to(requested);
        Reply::page(state)
    }

    /// Show the detail view of `slot` on `page`. The stored page is not changed.
    pub async fn select_attraction(
        &self,
        conversation: ConversationId,
        page: usize,
        slot: usize,
    ) -> Reply {
        let attraction_id = {
            let guard = self.sessions.lock(conversation).await;
            let Some(state) = &*guard else {
                info!(%conversation, "Selection without stored results");
                return Reply::plain(DefaultAttractionView::results_expired());
            };
            match state.item(page, slot) {
                Some((_, attraction)) => attraction.id,
                None => return Reply::plain(DefaultAttractionView::attraction_not_found()),
            }
        };

        info!(%conversation, attraction_id, "Opening attraction");
        match self.api.attraction_detail(attraction_id).await {
            Ok(detail) => Reply::with_keyboard(render_detail(&detail), detail_keyboard(page)),
            Err(e) => {
                warn!(%conversation, attraction_id, "Detail request failed: {e}");
                Reply::plain(DefaultAttractionView::detail_failed())
            }
        }
    }
}

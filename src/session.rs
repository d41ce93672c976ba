//! Session state rendered by a front end: the wardrobe, the active view, a
//! busy flag, a single error slot and the latest results.
//!
//! Actions take `&self` so a front end can share the session and keep
//! rendering while a request is outstanding. Only one action runs at a time;
//! a second one is refused with [`Error::Busy`].

use crate::assistant::Assistant;
use crate::rating::{OutfitContext, StyleRating};
use crate::wardrobe::{local_image_url, Wardrobe, WardrobeItem};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Wardrobe,
    Recommender,
    Rater,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Wardrobe => write!(f, "wardrobe"),
            View::Recommender => write!(f, "recommender"),
            View::Rater => write!(f, "rater"),
        }
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wardrobe" => Ok(View::Wardrobe),
            "recommender" => Ok(View::Recommender),
            "rater" => Ok(View::Rater),
            other => Err(Error::InvalidInput(format!("unknown view '{}'", other))),
        }
    }
}

/// Everything a front end needs to render one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub wardrobe: Wardrobe,
    pub view: View,
    pub error: Option<String>,
    pub recommendation: Option<String>,
    pub rating: Option<StyleRating>,
}

pub struct Session {
    assistant: Assistant,
    state: Mutex<SessionState>,
    busy: AtomicBool,
}

/// Clears the busy flag when an action finishes or its future is dropped.
struct BusyGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant,
            state: Mutex::new(SessionState::default()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    pub fn view(&self) -> View {
        self.state().view
    }

    pub fn set_view(&self, view: View) {
        let mut state = self.state();
        if state.view != view {
            info!("Switching view: {} -> {}", state.view, view);
            state.view = view;
        }
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn dismiss_error(&self) {
        self.state().error = None;
    }

    pub fn items(&self) -> Vec<WardrobeItem> {
        self.state().wardrobe.items().to_vec()
    }

    pub fn recommendation(&self) -> Option<String> {
        self.state().recommendation.clone()
    }

    pub fn rating(&self) -> Option<StyleRating> {
        self.state().rating.clone()
    }

    /// Classifies a photo and adds it to the front of the wardrobe.
    pub async fn add_photo(&self, path: &Path) -> Result<WardrobeItem> {
        let _guard = self.begin()?;

        let result = self.assistant.classify_file(path).await;
        let name = self.settle(result)?;

        let item = self
            .state()
            .wardrobe
            .add(name, local_image_url(path))
            .clone();
        info!("Added wardrobe item '{}' ({})", item.name, item.id);
        Ok(item)
    }

    /// Adds an item the user labelled by hand; no model call is made.
    pub fn add_labelled_item(&self, name: &str, image_url: &str) -> Result<WardrobeItem> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("item name must not be empty".to_string()));
        }
        let item = self
            .state()
            .wardrobe
            .add(name.to_string(), image_url.to_string())
            .clone();
        info!("Added wardrobe item '{}' ({})", item.name, item.id);
        Ok(item)
    }

    /// Asks for an outfit built from the current wardrobe.
    pub async fn recommend(&self) -> Result<String> {
        let _guard = self.begin()?;

        let names = {
            let mut state = self.state();
            state.recommendation = None;
            state.wardrobe.names()
        };

        let result = self.assistant.recommend_outfit(&names).await;
        let recommendation = self.settle(result)?;
        self.state().recommendation = Some(recommendation.clone());
        Ok(recommendation)
    }

    /// Rates an outfit description and keeps the result for display.
    pub async fn rate(&self, description: &str, context: &OutfitContext) -> Result<StyleRating> {
        let _guard = self.begin()?;

        self.state().rating = None;

        let result = self.assistant.rate_outfit(description, context).await;
        let rating = self.settle(result)?;
        self.state().rating = Some(rating.clone());
        Ok(rating)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // Every write under this lock is a single assignment; poisoning is harmless.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self) -> Result<BusyGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Ignoring action while another request is in progress");
            return Err(Error::Busy);
        }

        self.state().error = None;
        Ok(BusyGuard { busy: &self.busy })
    }

    /// Stores a failure in the error slot before handing the result back.
    fn settle<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!("Action failed: {}", e);
            self.state().error = Some(e.to_string());
        }
        result
    }
}

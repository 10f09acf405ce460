//! Image load helper.
//!
//! Resolves the URL to request for an image (asking resize-capable hosts for
//! a smaller WebP variant) and tracks the placeholder -> loaded / error
//! phases of one displayed image.
//!
//! Loads run in the background and can finish in any order. Every request
//! gets a generation number; a completion is applied only if its generation
//! is still the slot's current one, so the most recently *requested* image
//! always wins regardless of which response arrives last.

use url::Url;

use crate::ports::{ImageFetchError, ImageFetcher};

/// Quality hint used when the caller does not pass one.
pub const DEFAULT_IMAGE_QUALITY: u8 = 75;

/// Encoding requested from resize-capable hosts.
pub const OPTIMIZED_FORMAT: &str = "webp";

/// What to display and at which size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Remote image reference.
    pub src: String,
    /// Alternative text; carried through for the renderer, never affects loading.
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Quality hint, 1..=100.
    pub quality: u8,
}

impl ImageRequest {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            width: None,
            height: None,
            quality: DEFAULT_IMAGE_QUALITY,
        }
    }

    #[must_use]
    pub const fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub const fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the quality hint, clamped to 1..=100.
    #[must_use]
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    /// Quality hint as sent to hosts; out-of-range field values are clamped.
    pub fn effective_quality(&self) -> u8 {
        self.quality.clamp(1, 100)
    }

    /// Whether `other` would load the same asset (alt text aside).
    pub fn same_target(&self, other: &Self) -> bool {
        self.src == other.src
            && self.width == other.width
            && self.height == other.height
            && self.quality == other.quality
    }
}

/// Hosts that understand resize/re-encode query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHosts {
    suffixes: Vec<String>,
}

impl Default for ImageHosts {
    fn default() -> Self {
        Self::new(["supabase.co"])
    }
}

impl ImageHosts {
    /// Hosts are matched by domain suffix: `supabase.co` matches
    /// `abc.supabase.co`.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// No host is resize-capable; every `src` is used as-is.
    pub const fn none() -> Self {
        Self {
            suffixes: Vec::new(),
        }
    }

    /// Whether `src` points at a resize-capable host.
    pub fn is_resizable(&self, src: &str) -> bool {
        Url::parse(src).is_ok_and(|url| self.matches(&url))
    }

    fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        self.suffixes
            .iter()
            .any(|s| host == s || host.strip_suffix(s.as_str()).is_some_and(|p| p.ends_with('.')))
    }

    /// URL to actually request for `request`.
    ///
    /// For resize-capable hosts, width and height (when set), quality and
    /// format are appended as query parameters. Anything else, including
    /// unparseable references, is returned unchanged.
    pub fn resolve(&self, request: &ImageRequest) -> String {
        let Ok(mut url) = Url::parse(&request.src) else {
            return request.src.clone();
        };
        if !self.matches(&url) {
            return request.src.clone();
        }
        {
            let mut query = url.query_pairs_mut();
            if let Some(width) = request.width.filter(|w| *w > 0) {
                query.append_pair("width", &width.to_string());
            }
            if let Some(height) = request.height.filter(|h| *h > 0) {
                query.append_pair("height", &height.to_string());
            }
            query.append_pair("quality", &request.effective_quality().to_string());
            query.append_pair("format", OPTIMIZED_FORMAT);
        }
        url.into()
    }
}

/// Display phase of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePhase {
    /// Placeholder shown, target hidden.
    Loading,
    /// Target visible at `url`, placeholder removed.
    Loaded { url: String },
    /// Error affordance shown, target hidden. Terminal for this request.
    Error { message: String },
}

/// Handle for one in-flight load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadToken {
    generation: u64,
    url: String,
}

impl LoadToken {
    /// Resolved URL to fetch.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of a background load, to be fed back into the slot.
#[derive(Debug, Clone)]
pub struct ImageCompletion {
    pub token: LoadToken,
    pub outcome: Result<(), ImageFetchError>,
}

/// Load state for one displayed image.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    hosts: ImageHosts,
    request: Option<ImageRequest>,
    generation: u64,
    phase: ImagePhase,
}

impl ImageSlot {
    pub const fn new(hosts: ImageHosts) -> Self {
        Self {
            hosts,
            request: None,
            generation: 0,
            phase: ImagePhase::Loading,
        }
    }

    /// Point the slot at `request`.
    ///
    /// If the target (src, width, height, quality) changed, the slot goes
    /// back to `Loading` and a token for the new load is returned; any
    /// older in-flight load becomes stale. If only the alt text changed,
    /// nothing restarts and `None` is returned.
    pub fn request(&mut self, request: ImageRequest) -> Option<LoadToken> {
        if let Some(current) = self.request.as_mut() {
            if current.same_target(&request) {
                current.alt = request.alt;
                return None;
            }
        }

        self.generation += 1;
        self.phase = ImagePhase::Loading;
        let url = self.hosts.resolve(&request);
        self.request = Some(request);
        Some(LoadToken {
            generation: self.generation,
            url,
        })
    }

    /// Apply a finished load.
    ///
    /// Returns `false` (and changes nothing) when the completion belongs to
    /// a superseded request or the slot already left `Loading`.
    pub fn complete(&mut self, completion: ImageCompletion) -> bool {
        if completion.token.generation != self.generation || self.phase != ImagePhase::Loading {
            tracing::debug!(
                generation = completion.token.generation,
                current = self.generation,
                "Discarding stale image completion"
            );
            return false;
        }

        self.phase = match completion.outcome {
            Ok(()) => ImagePhase::Loaded {
                url: completion.token.url,
            },
            Err(e) => ImagePhase::Error {
                message: e.to_string(),
            },
        };
        true
    }

    /// Forget the current request; in-flight loads become stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.request = None;
        self.phase = ImagePhase::Loading;
    }

    pub const fn phase(&self) -> &ImagePhase {
        &self.phase
    }

    pub fn alt(&self) -> Option<&str> {
        self.request.as_ref().map(|r| r.alt.as_str())
    }

    pub fn placeholder_visible(&self) -> bool {
        self.phase == ImagePhase::Loading
    }

    pub const fn target_visible(&self) -> bool {
        matches!(self.phase, ImagePhase::Loaded { .. })
    }

    pub const fn error_visible(&self) -> bool {
        matches!(self.phase, ImagePhase::Error { .. })
    }
}

/// Run one load to completion.
///
/// Intended to be spawned; the returned completion is handed back to
/// [`ImageSlot::complete`] on the owning task.
pub async fn preload(fetcher: &dyn ImageFetcher, token: LoadToken) -> ImageCompletion {
    let outcome = fetcher.fetch(token.url()).await;
    if let Err(ref e) = outcome {
        tracing::warn!(url = %token.url(), error = %e, "Failed to load image");
    }
    ImageCompletion { token, outcome }
}

use std::sync::Mutex;

use url::Url;

/// Page-level navigation side effects. Both calls are fire-and-forget.
pub trait Navigator: Send + Sync {
    /// Send the user agent to `url`, leaving the current page.
    fn redirect(&self, url: &Url);

    /// Rewrite the current location without navigating.
    fn replace_location(&self, url: &Url);
}

impl std::fmt::Debug for dyn Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator").finish()
    }
}

/// Opens the system browser.
#[derive(Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, url: &Url) {
        if webbrowser::open(url.as_str()).is_err() {
            tracing::warn!("Could not open browser automatically");
            eprintln!("Open this URL to log in to Spotify:\n{url}");
        }
    }

    fn replace_location(&self, url: &Url) {
        // A terminal has no address bar; the callback URL is simply dropped.
        tracing::debug!(path = url.path(), "callback location normalized");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Redirect(Url),
    Replace(Url),
}

/// Records navigations instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Navigation> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last_redirect(&self) -> Option<Url> {
        self.events().into_iter().rev().find_map(|n| match n {
            Navigation::Redirect(url) => Some(url),
            Navigation::Replace(_) => None,
        })
    }

    pub fn last_replace(&self) -> Option<Url> {
        self.events().into_iter().rev().find_map(|n| match n {
            Navigation::Replace(url) => Some(url),
            Navigation::Redirect(_) => None,
        })
    }

    fn push(&self, nav: Navigation) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(nav);
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, url: &Url) {
        self.push(Navigation::Redirect(url.clone()));
    }

    fn replace_location(&self, url: &Url) {
        self.push(Navigation::Replace(url.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_navigator_keeps_order() {
        let nav = RecordingNavigator::new();
        let a = Url::parse("https://accounts.example.com/authorize").unwrap();
        let b = Url::parse("http://127.0.0.1:5174/callback").unwrap();
        nav.redirect(&a);
        nav.replace_location(&b);
        assert_eq!(
            nav.events(),
            vec![Navigation::Redirect(a.clone()), Navigation::Replace(b.clone())]
        );
        assert_eq!(nav.last_redirect(), Some(a));
        assert_eq!(nav.last_replace(), Some(b));
    }

    #[test]
    fn recording_navigator_starts_empty() {
        let nav = RecordingNavigator::new();
        assert!(nav.events().is_empty());
        assert!(nav.last_redirect().is_none());
    }
}

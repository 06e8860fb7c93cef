//! Small browser interactions: storage access, confirmation prompts, and
//! delayed navigation.

/// Delay between a successful login/registration and the redirect.
pub const REDIRECT_DELAY_MS: u32 = 1000;

/// The window's `localStorage`, if the browser exposes one.
#[cfg(feature = "csr")]
pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Ask the user to confirm a destructive action. Without a browser nothing is confirmed.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}

/// Navigate to `path` after [`REDIRECT_DELAY_MS`].
pub fn redirect_after_delay<F>(navigate: F, path: &'static str)
where
    F: Fn(&str, leptos_router::NavigateOptions) + 'static,
{
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
            navigate(path, leptos_router::NavigateOptions::default());
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (navigate, path);
    }
}

/// Full page navigation to `path`.
pub fn go_to(path: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = path;
    }
}

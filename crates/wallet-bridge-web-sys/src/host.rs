use wallet_bridge::{Result, WalletError, WalletHost, WalletKind};
use wasm_bindgen::JsValue;
use web_sys::{window, Window};

use crate::phantom::PhantomProvider;
use crate::utils::{get_flag, get_property};

/// The page window as seen by the adapter.
///
/// Providers are looked up on every call rather than cached: extensions may
/// inject after the page script has started.
#[derive(Clone, Debug, Default)]
pub struct BrowserHost;

impl BrowserHost {
    pub fn new() -> Self {
        Self
    }

    fn window(&self) -> Result<Window> {
        window().ok_or_else(|| WalletError::Environment("No window object".to_string()))
    }

    fn injected(&self, kind: WalletKind) -> Option<JsValue> {
        let window = self.window().ok()?;
        get_property(&window, kind.injection_key())
    }
}

impl WalletHost for BrowserHost {
    type Provider = PhantomProvider;

    fn detect(&self, kind: WalletKind) -> bool {
        self.injected(kind)
            .map(|object| get_flag(&object, kind.identity_flag()))
            .unwrap_or(false)
    }

    fn solana_provider(&self) -> Option<PhantomProvider> {
        self.injected(WalletKind::Phantom)
            .filter(|object| object.is_object())
            .map(PhantomProvider::new)
    }

    fn open_in_new_context(&self, url: &str) -> Result<()> {
        self.window()?
            .open_with_url_and_target(url, "_blank")
            .map_err(|e| WalletError::Environment(format!("Failed to open {url}: {e:?}")))?;
        Ok(())
    }
}

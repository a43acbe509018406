//! JS-facing entry points used by the game's web export.
//!
//! Every async method returns a `Promise` that resolves with a plain record
//! (`{success, ...}` or `{connected, ...}`) and never rejects for wallet
//! failures; callers only ever inspect the record.

use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use log::{info, warn};
use serde::Serialize;
use wallet_bridge::{
    ActionRecord, AdapterConfig, StatusRecord, WalletAdapter, WalletError, WalletKind,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::window;

use crate::host::BrowserHost;
use crate::logging::init_logging;

fn to_js<T: Serialize>(record: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(record)?)
}

fn parse_config(config: JsValue) -> Result<AdapterConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(AdapterConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| {
        JsValue::from_str(&WalletError::Configuration(e.to_string()).to_string())
    })
}

/// Owns the page's wallet adapter.
#[wasm_bindgen]
#[derive(Clone)]
pub struct WalletIntegration {
    adapter: Rc<WalletAdapter<BrowserHost>>,
}

impl WalletIntegration {
    pub fn from_config(config: AdapterConfig) -> Self {
        Self {
            adapter: Rc::new(WalletAdapter::new(BrowserHost::new(), config)),
        }
    }

    pub fn adapter(&self) -> &WalletAdapter<BrowserHost> {
        &self.adapter
    }
}

#[wasm_bindgen]
impl WalletIntegration {
    /// `config` may be omitted; see `AdapterConfig` for the accepted keys.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WalletIntegration, JsValue> {
        Ok(Self::from_config(parse_config(config)?))
    }

    #[wasm_bindgen(js_name = isPhantomAvailable)]
    pub fn is_phantom_available(&self) -> bool {
        self.adapter.is_provider_available(WalletKind::Phantom)
    }

    #[wasm_bindgen(js_name = isMetaMaskAvailable)]
    pub fn is_metamask_available(&self) -> bool {
        self.adapter.is_provider_available(WalletKind::MetaMask)
    }

    #[wasm_bindgen(js_name = connectPhantom)]
    pub fn connect_phantom(&self) -> Promise {
        let adapter = Rc::clone(&self.adapter);
        future_to_promise(async move { to_js(&ActionRecord::from(adapter.connect().await)) })
    }

    pub fn disconnect(&self) -> Promise {
        let adapter = Rc::clone(&self.adapter);
        future_to_promise(async move { to_js(&ActionRecord::from(adapter.disconnect().await)) })
    }

    #[wasm_bindgen(js_name = checkConnection)]
    pub fn check_connection(&self) -> Result<JsValue, JsValue> {
        to_js(&StatusRecord::from(self.adapter.check_connection()))
    }

    #[wasm_bindgen(js_name = getBalance)]
    pub fn get_balance(&self) -> Promise {
        let adapter = Rc::clone(&self.adapter);
        future_to_promise(async move { to_js(&ActionRecord::from(adapter.get_balance().await)) })
    }

    #[wasm_bindgen(js_name = signMessage)]
    pub fn sign_message(&self, message: String) -> Promise {
        let adapter = Rc::clone(&self.adapter);
        future_to_promise(async move {
            to_js(&ActionRecord::from(adapter.sign_message(&message).await))
        })
    }

    /// Returns whether provider events are now being mirrored into the session.
    #[wasm_bindgen(js_name = setupEventListeners)]
    pub fn setup_event_listeners(&self) -> bool {
        match self.adapter.setup_event_listeners() {
            Ok(subscribed) => subscribed,
            Err(e) => {
                warn!("failed to subscribe to wallet events: {e}");
                false
            }
        }
    }

    /// Current session as `{connected, address?, wallet?}`.
    pub fn session(&self) -> Result<JsValue, JsValue> {
        to_js(&StatusRecord::from(self.adapter.session().status()))
    }

    /// Installs `window.connectPhantomWallet`, `window.disconnectWallet`,
    /// `window.checkWalletConnection`, `window.getWalletBalance` and
    /// `window.signWalletMessage`, all bound to this instance.
    #[wasm_bindgen(js_name = exposeGlobals)]
    pub fn expose_globals(&self) -> Result<(), JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("No window object"))?;

        let this = self.clone();
        let connect = Closure::<dyn Fn() -> Promise>::new(move || this.connect_phantom());
        let this = self.clone();
        let disconnect = Closure::<dyn Fn() -> Promise>::new(move || this.disconnect());
        let this = self.clone();
        let check = Closure::<dyn Fn() -> JsValue>::new(move || {
            this.check_connection().unwrap_or_else(|e| e)
        });
        let this = self.clone();
        let balance = Closure::<dyn Fn() -> Promise>::new(move || this.get_balance());
        let this = self.clone();
        let sign = Closure::<dyn Fn(JsValue) -> Promise>::new(move |message: JsValue| {
            this.sign_message(message.as_string().unwrap_or_default())
        });

        install_global(&window, "connectPhantomWallet", connect.as_ref().unchecked_ref())?;
        install_global(&window, "disconnectWallet", disconnect.as_ref().unchecked_ref())?;
        install_global(&window, "checkWalletConnection", check.as_ref().unchecked_ref())?;
        install_global(&window, "getWalletBalance", balance.as_ref().unchecked_ref())?;
        install_global(&window, "signWalletMessage", sign.as_ref().unchecked_ref())?;

        // Globals stay callable for the lifetime of the page.
        connect.forget();
        disconnect.forget();
        check.forget();
        balance.forget();
        sign.forget();
        Ok(())
    }
}

fn install_global(window: &web_sys::Window, name: &str, function: &Function) -> Result<(), JsValue> {
    Reflect::set(window, &JsValue::from_str(name), function)?;
    Ok(())
}

/// Page composition root.
///
/// Installs console logging and the panic hook, builds the integration,
/// subscribes to wallet events once the DOM is ready and, unless disabled in
/// `config`, exposes the global entry points.
#[wasm_bindgen]
pub fn bootstrap(config: JsValue) -> Result<WalletIntegration, JsValue> {
    console_error_panic_hook::set_once();
    let config = parse_config(config)?;
    init_logging(config.log_level);

    let expose = config.expose_globals;
    let integration = WalletIntegration::from_config(config);

    let document = window().and_then(|w| w.document());
    match document {
        Some(document) if document.ready_state() == "loading" => {
            let this = integration.clone();
            let on_ready = Closure::<dyn FnMut()>::new(move || {
                this.setup_event_listeners();
            });
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.as_ref().unchecked_ref(),
            )?;
            on_ready.forget();
        }
        _ => {
            integration.setup_event_listeners();
        }
    }

    if expose {
        integration.expose_globals()?;
    }
    info!("wallet bridge ready");
    Ok(integration)
}

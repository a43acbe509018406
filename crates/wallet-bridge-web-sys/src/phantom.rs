//! `window.solana` binding.
//!
//! Wraps the object Phantom injects into the page and exposes it through
//! [`SolanaProvider`]. Every call goes through `Reflect` so a provider that
//! lacks a method, or replaces itself mid-session, surfaces as a
//! [`WalletError::Provider`] rather than a panic.

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Uint8Array};
use log::debug;
use wallet_bridge::{
    ConnectResponse, EventHandler, ProviderEvent, Result, SignedMessage, SolanaProvider,
    WalletError,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::utils::{
    get_flag, get_property, js_error_message, public_key_to_string, uint8_array_to_vec,
    vec_to_uint8_array,
};

/// Handle on an injected Solana provider object.
#[derive(Clone, Debug)]
pub struct PhantomProvider {
    object: JsValue,
}

impl PhantomProvider {
    pub fn new(object: JsValue) -> Self {
        Self { object }
    }

    fn method(&self, name: &str) -> Result<Function> {
        get_property(&self.object, name)
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or_else(|| WalletError::Provider(format!("Wallet method {name} is not available")))
    }

    /// Calls `provider[name](...args)`, awaiting the result if it is a promise.
    async fn call_method(&self, name: &str, args: &[JsValue]) -> Result<JsValue> {
        let function = self.method(name)?;
        let result = function
            .apply(&self.object, &Array::from_iter(args.iter()))
            .map_err(|e| WalletError::Provider(js_error_message(&e)))?;

        if result.has_type::<Promise>() {
            let promise = result.unchecked_into::<Promise>();
            JsFuture::from(promise)
                .await
                .map_err(|e| WalletError::Provider(js_error_message(&e)))
        } else {
            Ok(result)
        }
    }

    fn event_closure(
        handler: EventHandler,
        map: fn(JsValue) -> ProviderEvent,
    ) -> Closure<dyn FnMut(JsValue)> {
        Closure::wrap(Box::new(move |payload: JsValue| {
            handler(map(payload));
        }) as Box<dyn FnMut(JsValue)>)
    }
}

#[async_trait(?Send)]
impl SolanaProvider for PhantomProvider {
    fn is_phantom(&self) -> bool {
        get_flag(&self.object, "isPhantom")
    }

    fn is_connected(&self) -> bool {
        get_flag(&self.object, "isConnected")
    }

    fn public_key(&self) -> Option<String> {
        get_property(&self.object, "publicKey").and_then(|key| public_key_to_string(&key))
    }

    async fn connect(&self) -> Result<ConnectResponse> {
        let response = self.call_method("connect", &[]).await?;
        let public_key = get_property(&response, "publicKey")
            .and_then(|key| public_key_to_string(&key))
            .or_else(|| self.public_key())
            .ok_or_else(|| WalletError::provider("Wallet did not return a public key"))?;
        Ok(ConnectResponse { public_key })
    }

    async fn disconnect(&self) -> Result<()> {
        self.call_method("disconnect", &[]).await?;
        Ok(())
    }

    async fn sign_message(&self, message: &[u8]) -> Result<SignedMessage> {
        let encoded: JsValue = vec_to_uint8_array(message).into();
        let response = self.call_method("signMessage", &[encoded]).await?;

        let signature = get_property(&response, "signature")
            .and_then(|value| value.dyn_into::<Uint8Array>().ok())
            .map(|array| uint8_array_to_vec(&array))
            .ok_or_else(|| WalletError::provider("Wallet returned no signature"))?;
        let public_key = get_property(&response, "publicKey")
            .and_then(|key| public_key_to_string(&key))
            .or_else(|| self.public_key())
            .ok_or_else(|| WalletError::provider("Wallet returned no public key"))?;

        Ok(SignedMessage {
            signature,
            public_key,
        })
    }

    fn subscribe(&self, handler: EventHandler) -> Result<()> {
        let on = self.method("on")?;
        let provider = self.clone();

        let connect_provider = provider.clone();
        let connect = Closure::wrap(Box::new({
            let handler = handler.clone();
            move |_payload: JsValue| handler(ProviderEvent::Connect(connect_provider.public_key()))
        }) as Box<dyn FnMut(JsValue)>);
        let disconnect = Self::event_closure(handler.clone(), |_| ProviderEvent::Disconnect);
        let account_changed = Self::event_closure(handler, |key| {
            ProviderEvent::AccountChanged(public_key_to_string(&key))
        });

        for (event, closure) in [
            ("connect", connect),
            ("disconnect", disconnect),
            ("accountChanged", account_changed),
        ] {
            on.call2(&provider.object, &JsValue::from_str(event), closure.as_ref())
                .map_err(|e| WalletError::Provider(js_error_message(&e)))?;
            debug!("subscribed to provider event {event}");
            // Listeners live for the lifetime of the page.
            closure.forget();
        }
        Ok(())
    }
}

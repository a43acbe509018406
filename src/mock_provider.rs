//! In-memory host and provider for tests.
//!
//! [`MockHost`] stands in for the page window and [`MockProvider`] for
//! `window.solana`. Both are cheap handles over shared state, so a test can keep
//! a clone to script replies, emit events and inspect what the adapter did.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::traits::{EventHandler, ProviderEvent, SolanaProvider, WalletHost};
use crate::types::{ConnectResponse, SignedMessage, WalletKind};
use crate::{Result, WalletError};

#[derive(Default)]
struct MockProviderState {
    is_phantom: bool,
    is_connected: bool,
    public_key: Option<String>,
    connect_reply: Option<core::result::Result<String, String>>,
    disconnect_error: Option<String>,
    sign_reply: Option<core::result::Result<SignedMessage, String>>,
    handlers: Vec<EventHandler>,
    connect_calls: usize,
    disconnect_calls: usize,
    signed_messages: Vec<Vec<u8>>,
}

/// Scriptable Solana provider.
#[derive(Clone)]
pub struct MockProvider {
    state: Rc<RefCell<MockProviderState>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::phantom()
    }
}

impl MockProvider {
    /// A provider that identifies as Phantom and is not yet connected.
    pub fn phantom() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockProviderState {
                is_phantom: true,
                ..MockProviderState::default()
            })),
        }
    }

    /// A Solana-style provider from some other extension.
    pub fn foreign() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockProviderState::default())),
        }
    }

    /// Approve the next connect with `public_key`; the provider then reports
    /// itself connected.
    pub fn approve_connect(&self, public_key: &str) {
        self.state.borrow_mut().connect_reply = Some(Ok(public_key.to_string()));
    }

    pub fn reject_connect(&self, message: &str) {
        self.state.borrow_mut().connect_reply = Some(Err(message.to_string()));
    }

    pub fn fail_disconnect(&self, message: &str) {
        self.state.borrow_mut().disconnect_error = Some(message.to_string());
    }

    pub fn reply_to_sign(&self, signature: Vec<u8>, public_key: &str) {
        self.state.borrow_mut().sign_reply = Some(Ok(SignedMessage {
            signature,
            public_key: public_key.to_string(),
        }));
    }

    pub fn reject_sign(&self, message: &str) {
        self.state.borrow_mut().sign_reply = Some(Err(message.to_string()));
    }

    /// Sets the extension-side connection state, as after a page reload with a
    /// previously approved site.
    pub fn set_connected(&self, public_key: Option<&str>) {
        let mut state = self.state.borrow_mut();
        state.is_connected = true;
        state.public_key = public_key.map(str::to_string);
    }

    /// Delivers `event` to every subscribed handler.
    pub fn emit(&self, event: ProviderEvent) {
        let handlers = self.state.borrow().handlers.clone();
        for handler in handlers {
            handler(event.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }

    pub fn connect_calls(&self) -> usize {
        self.state.borrow().connect_calls
    }

    pub fn disconnect_calls(&self) -> usize {
        self.state.borrow().disconnect_calls
    }

    pub fn signed_messages(&self) -> Vec<Vec<u8>> {
        self.state.borrow().signed_messages.clone()
    }
}

#[async_trait(?Send)]
impl SolanaProvider for MockProvider {
    fn is_phantom(&self) -> bool {
        self.state.borrow().is_phantom
    }

    fn is_connected(&self) -> bool {
        self.state.borrow().is_connected
    }

    fn public_key(&self) -> Option<String> {
        self.state.borrow().public_key.clone()
    }

    async fn connect(&self) -> Result<ConnectResponse> {
        let mut state = self.state.borrow_mut();
        state.connect_calls += 1;
        match state.connect_reply.clone() {
            Some(Ok(public_key)) => {
                state.is_connected = true;
                state.public_key = Some(public_key.clone());
                Ok(ConnectResponse { public_key })
            }
            Some(Err(message)) => Err(WalletError::Provider(message)),
            None => Err(WalletError::provider("User rejected the request.")),
        }
    }

    async fn disconnect(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.disconnect_calls += 1;
        if let Some(message) = state.disconnect_error.clone() {
            return Err(WalletError::Provider(message));
        }
        state.is_connected = false;
        state.public_key = None;
        Ok(())
    }

    async fn sign_message(&self, message: &[u8]) -> Result<SignedMessage> {
        let mut state = self.state.borrow_mut();
        state.signed_messages.push(message.to_vec());
        match state.sign_reply.clone() {
            Some(Ok(signed)) => Ok(signed),
            Some(Err(message)) => Err(WalletError::Provider(message)),
            None => Err(WalletError::provider("User rejected the request.")),
        }
    }

    fn subscribe(&self, handler: EventHandler) -> Result<()> {
        self.state.borrow_mut().handlers.push(handler);
        Ok(())
    }
}

#[derive(Default)]
struct MockHostState {
    solana: Option<MockProvider>,
    metamask: bool,
    opened_urls: Vec<String>,
    block_navigation: bool,
}

/// Scriptable page environment.
#[derive(Clone, Default)]
pub struct MockHost {
    state: Rc<RefCell<MockHostState>>,
}

impl MockHost {
    /// A page with no wallet extension installed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_provider(provider: MockProvider) -> Self {
        let host = Self::default();
        host.state.borrow_mut().solana = Some(provider);
        host
    }

    pub fn install(&self, provider: MockProvider) {
        self.state.borrow_mut().solana = Some(provider);
    }

    pub fn uninstall(&self) {
        self.state.borrow_mut().solana = None;
    }

    pub fn set_metamask(&self, installed: bool) {
        self.state.borrow_mut().metamask = installed;
    }

    /// Make `open_in_new_context` fail, as with a popup blocker.
    pub fn block_navigation(&self) {
        self.state.borrow_mut().block_navigation = true;
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.state.borrow().opened_urls.clone()
    }
}

impl WalletHost for MockHost {
    type Provider = MockProvider;

    fn detect(&self, kind: WalletKind) -> bool {
        let state = self.state.borrow();
        match kind {
            WalletKind::Phantom => state.solana.as_ref().is_some_and(|p| p.is_phantom()),
            WalletKind::MetaMask => state.metamask,
        }
    }

    fn solana_provider(&self) -> Option<MockProvider> {
        self.state.borrow().solana.clone()
    }

    fn open_in_new_context(&self, url: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.opened_urls.push(url.to_string());
        if state.block_navigation {
            return Err(WalletError::Environment("popup blocked".to_string()));
        }
        Ok(())
    }
}

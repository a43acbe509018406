//! Browser bindings for `wallet-bridge`.
//!
//! [`phantom::PhantomProvider`] and [`host::BrowserHost`] implement the core
//! capability traits over the page window, [`logging`] sends `log` output to the
//! console, and [`integration`] is what the game's JavaScript glue calls:
//!
//! ```js
//! import init, { bootstrap } from "./wallet_bridge_web_sys.js";
//! await init();
//! const wallet = bootstrap({ logLevel: "debug" });
//! const result = await wallet.connectPhantom();
//! ```

pub mod host;
pub mod integration;
pub mod logging;
pub mod phantom;
pub mod utils;

pub use crate::host::BrowserHost;
pub use crate::integration::{bootstrap, WalletIntegration};
pub use crate::logging::{init_logging, WebLogger};
pub use crate::phantom::PhantomProvider;

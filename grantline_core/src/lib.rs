//!
//! Grantline Core
//!
//! Provides the shared pieces every Grantline connector builds on: the
//! resource/entitlement/grant node types, the per-resource-kind syncer
//! traits, connector configuration, and logging.
#![deny(missing_docs)]

pub use config::fetch_credentials;
pub use connectors::{AccountManager, Connector, ResourceSyncer};

pub mod config;
pub mod connectors;
pub mod logging;

#[macro_export]
/// Time the code inside the macro. Write the elapsed time to debug logs.
/// Derived from https://notes.iveselov.info/programming/time_it-a-case-study-in-rust-macros
macro_rules! log_runtime {
    ($context:expr, $($tt:tt)+) => {
        {
            $crate::logging::debug!("{}: starting", $context);
            let timer = std::time::Instant::now();
            let x =
            $(
                $tt
            )+;
            $crate::logging::debug!("{}: {:?}", $context, timer.elapsed());
            x
        }
    }
}

//! Background work for pages.
//!
//! Requests never block a frame: pages spawn them here and receive the result
//! over a `flume` channel on a later frame.

use std::future::Future;

/// Runs `future` on the Tokio runtime entered by the binary (or the test).
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

/// Runs `future` on the browser's event loop.
#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

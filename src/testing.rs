//! Shared helpers for tests that talk to a local HTTP server.

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Start a mock server with `mocks` mounted.
///
/// The clients under test are blocking, so they must be called from the
/// plain test thread, never from inside the returned runtime. Keep the
/// runtime alive for as long as the server is in use.
pub fn serve(mocks: Vec<Mock>) -> (Runtime, MockServer) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&server).await;
        }
        server
    });
    (rt, server)
}

// ABOUTME: API key authentication middleware for the protected uls routes.
// ABOUTME: Checks the X-API-KEY header against the key store on every request, with no caching.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use uls_store::KeyStore;

use crate::error::ApiError;

/// Header carrying the bearer key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A tower Layer that rejects requests without an issued API key.
#[derive(Clone)]
pub struct AuthLayer {
    keys: KeyStore,
}

impl AuthLayer {
    pub fn new(keys: KeyStore) -> Self {
        Self { keys }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            keys: self.keys.clone(),
        }
    }
}

/// The middleware service that checks the API key header.
///
/// The check runs inline in `call`: `KeyStore::is_valid` reads
/// `api_keys.json` with blocking `std::fs` I/O and may wait on the store's
/// `std::sync::Mutex`, both on the tokio worker thread. That is acceptable
/// for a small local key file; a slow or networked data directory would
/// need the lookup moved onto `spawn_blocking`.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    keys: KeyStore,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let authorized = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|key| self.keys.is_valid(key));

        if !authorized {
            tracing::debug!("rejected {} {}: invalid or missing API key", req.method(), req.uri().path());
            return Box::pin(async move { Ok(ApiError::Unauthorized.into_response()) });
        }

        // Swap in the clone so the instance that was polled ready serves this call.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await })
    }
}

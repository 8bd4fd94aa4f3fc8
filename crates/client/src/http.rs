//! `reqwest`-backed storefront client.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use storefront_auth::{BearerToken, LoginForm, RegistrationForm, Session, SessionContext};
use storefront_cart::{CartEntry, CartService, CheckoutRequest};
use storefront_catalog::{Catalog, Product};
use storefront_core::{DomainError, Money, ProductId, RemoteError};

use crate::address::{Address, NewAddress};
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Error body returned by the API on 4xx responses.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SuccessResponse {
    success: bool,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
    token: String,
    username: String,
    #[serde(default)]
    balance: Option<Money>,
}

#[derive(Debug, serde::Serialize)]
struct CartUpdate<'a> {
    #[serde(rename = "productId")]
    product_id: &'a ProductId,
    quantity: i64,
}

pub struct StorefrontClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: RwLock<SessionContext>,
}

impl StorefrontClient {
    pub fn new(config: ClientConfig, session: SessionContext) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| RemoteError::Network(err.to_string()))?;

        Ok(Self {
            http,
            config,
            session: RwLock::new(session),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> SessionContext {
        self.read_session().clone()
    }

    // ----- catalog -----

    /// `GET /products`, or `GET /products/search?value=` when `search` is set.
    ///
    /// A search without matches is answered with 404 by the API; that is an
    /// empty result, not an error.
    pub async fn fetch_products(&self, search: Option<&str>) -> Result<Vec<Product>, RemoteError> {
        let response = match search {
            Some(text) => {
                let response = self
                    .get_with_retry("/products/search", &[("value", text)], None)
                    .await?;
                if response.status() == StatusCode::NOT_FOUND {
                    tracing::debug!(search = %text, "no products matched");
                    return Ok(Vec::new());
                }
                response
            }
            None => self.get_with_retry("/products", &[], None).await?,
        };

        read_json(ensure_success(response).await?).await
    }

    pub async fn load_catalog(&self) -> Result<Catalog, ClientError> {
        let products = self.fetch_products(None).await?;
        Ok(Catalog::new(products)?)
    }

    // ----- auth -----

    pub async fn register(&self, form: &RegistrationForm) -> Result<(), ClientError> {
        let request = form.validate()?;

        let response = self
            .post_json("/auth/register", &request, None)
            .await
            .map_err(ClientError::from_rejection)?;
        let body: SuccessResponse = read_json(response).await?;
        if !body.success {
            return Err(ClientError::Rejected("registration failed".to_string()));
        }

        tracing::info!(name = %request.name, "registered");
        Ok(())
    }

    /// Log in and establish the session for subsequent calls.
    pub async fn login(&self, form: &LoginForm) -> Result<Session, ClientError> {
        let request = form.validate()?;

        let response = self
            .post_json("/auth/login", &request, None)
            .await
            .map_err(ClientError::from_rejection)?;
        let body: LoginResponse = read_json(response).await?;
        if !body.success {
            return Err(ClientError::Rejected("login failed".to_string()));
        }

        let token = BearerToken::new(body.token)
            .ok_or_else(|| RemoteError::Malformed("login response carried an empty token".to_string()))?;
        let session = Session::new(token, body.username, body.balance, Utc::now());
        self.write_session().login(session.clone());
        Ok(session)
    }

    pub fn logout(&self) -> Option<Session> {
        self.write_session().logout()
    }

    // ----- addresses -----

    pub async fn addresses(&self) -> Result<Vec<Address>, ClientError> {
        let token = self.bearer()?;
        let response = self.get_with_retry("/user/addresses", &[], Some(&token)).await?;
        Ok(read_json(ensure_success(response).await?).await?)
    }

    pub async fn add_address(&self, address: &str) -> Result<Vec<Address>, ClientError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(DomainError::validation("address cannot be empty").into());
        }

        let token = self.bearer()?;
        let response = self
            .post_json("/user/addresses", &NewAddress { address }, Some(&token))
            .await
            .map_err(ClientError::from_rejection)?;
        Ok(read_json(response).await?)
    }

    // ----- checkout -----

    /// `POST /cart/checkout` for a request that passed local validation.
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<(), ClientError> {
        let token = self.bearer()?;
        let response = self
            .post_json("/cart/checkout", request, Some(&token))
            .await
            .map_err(ClientError::from_rejection)?;
        let body: SuccessResponse = read_json(response).await?;
        if !body.success {
            return Err(ClientError::Rejected("checkout failed".to_string()));
        }

        tracing::info!(address_id = %request.address_id, total = %request.total, "order placed");
        Ok(())
    }

    // ----- plumbing -----

    fn read_session(&self) -> RwLockReadGuard<'_, SessionContext> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> RwLockWriteGuard<'_, SessionContext> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bearer(&self) -> Result<BearerToken, RemoteError> {
        self.read_session().bearer().cloned().ok_or_else(|| {
            tracing::debug!("no session; refusing authenticated call");
            RemoteError::Unauthenticated
        })
    }

    /// GET with exponential backoff on network errors and 5xx responses.
    ///
    /// Any other response is returned as is for the caller to interpret.
    async fn get_with_retry(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: Option<&BearerToken>,
    ) -> Result<Response, RemoteError> {
        let url = self.config.url(path);
        let mut delay = self.config.retry_delay;
        let mut attempt = 0;

        loop {
            let mut request = self.http.get(&url).query(query);
            if let Some(token) = token {
                request = request.bearer_auth(token.expose());
            }

            let err = match request.send().await {
                Ok(response) if !response.status().is_server_error() => return Ok(response),
                Ok(response) => error_from_response(response).await,
                Err(err) => transport_error(err),
            };

            if attempt >= self.config.max_retries || !err.is_transient() {
                return Err(err);
            }
            attempt += 1;
            tracing::warn!(
                url = %url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "request failed; retrying"
            );
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }

    /// POST without retry; fails with the API's error on a non-2xx response.
    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&BearerToken>,
    ) -> Result<Response, RemoteError> {
        let mut request = self.http.post(self.config.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose());
        }

        let response = request.send().await.map_err(transport_error)?;
        ensure_success(response).await
    }

    async fn post_cart(&self, product_id: &ProductId, quantity: i64) -> Result<Vec<CartEntry>, RemoteError> {
        let token = self.bearer()?;
        let response = self
            .post_json("/cart", &CartUpdate { product_id, quantity }, Some(&token))
            .await?;
        read_json(response).await
    }
}

#[async_trait]
impl CartService for StorefrontClient {
    async fn fetch_cart(&self) -> Result<Vec<CartEntry>, RemoteError> {
        let token = self.bearer()?;
        let response = self.get_with_retry("/cart", &[], Some(&token)).await?;
        read_json(ensure_success(response).await?).await
    }

    // The API upserts on POST /cart, so add and update share one request.
    async fn add_item(&self, product_id: &ProductId, quantity: u32) -> Result<Vec<CartEntry>, RemoteError> {
        self.post_cart(product_id, i64::from(quantity)).await
    }

    async fn update_item(&self, product_id: &ProductId, quantity: u32) -> Result<Vec<CartEntry>, RemoteError> {
        self.post_cart(product_id, i64::from(quantity)).await
    }

    async fn remove_item(&self, product_id: &ProductId) -> Result<Vec<CartEntry>, RemoteError> {
        self.post_cart(product_id, 0).await
    }
}

async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> RemoteError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return RemoteError::Unauthenticated;
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .map(|m| m.message)
        .unwrap_or(body);
    RemoteError::Api(status.as_u16(), message)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|err| {
        tracing::warn!(error = %err, "unexpected response body");
        RemoteError::Malformed(err.to_string())
    })
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    if err.is_decode() {
        RemoteError::Malformed(err.to_string())
    } else {
        RemoteError::Network(err.to_string())
    }
}

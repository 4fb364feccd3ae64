use std::sync::Arc;

use nearby_core::{
    ApiConfig, FetchError, FetchParams, RestaurantSource, SearchResponse, SearchSettings,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Restaurant search over the browser `fetch` API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn settings(&self) -> SearchSettings {
        self.config.search
    }

    fn build_request(&self, params: &FetchParams) -> Result<Request, FetchError> {
        let url = self.config.search_url(params)?;
        tracing::debug!(%url, "Requesting restaurants");

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| FetchError::InvalidRequest(js_error_text(&e)))?;

        let headers = request.headers();
        headers
            .set("Accept", "application/json")
            .map_err(|e| FetchError::InvalidRequest(js_error_text(&e)))?;
        if let Some(key) = &self.config.user_key {
            headers
                .set("user-key", key)
                .map_err(|e| FetchError::InvalidRequest(js_error_text(&e)))?;
        }

        Ok(request)
    }
}

impl RestaurantSource for ApiClient {
    #[allow(clippy::future_not_send)]
    async fn search(&self, params: &FetchParams) -> Result<SearchResponse, FetchError> {
        let request = self.build_request(params)?;

        let window =
            web_sys::window().ok_or_else(|| FetchError::Network("No window object".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| FetchError::Network(js_error_text(&e)))?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| FetchError::Decode("Response is not a Response object".to_string()))?;

        if !resp.ok() {
            return Err(FetchError::Status {
                status: resp.status(),
            });
        }

        let json_promise = resp
            .json()
            .map_err(|e| FetchError::Decode(js_error_text(&e)))?;
        let body = JsFuture::from(json_promise)
            .await
            .map_err(|e| FetchError::Decode(js_error_text(&e)))?;

        serde_wasm_bindgen::from_value::<SearchResponse>(body)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

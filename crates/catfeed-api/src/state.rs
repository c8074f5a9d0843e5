use catfeed_core::DEFAULT_CURRENCY;

/// Server-level defaults applied when the upload form omits a field.
#[derive(Debug, Clone)]
pub struct AppState {
    pub default_currency: String,
}

impl AppState {
    pub fn from_env() -> Self {
        let default_currency = std::env::var("CATFEED_DEFAULT_CURRENCY")
            .unwrap_or_else(|_| DEFAULT_CURRENCY.to_string());
        Self { default_currency }
    }
}

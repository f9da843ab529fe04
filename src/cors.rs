use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue, ORIGIN, VARY,
    },
    middleware::Next,
    web,
};

/// The origins allowed to read submission responses from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// `"*"` allows every origin; anything else is a comma-separated list.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value == "*" {
            return AllowedOrigins::Any;
        }
        AllowedOrigins::List(
            value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// The `Access-Control-Allow-Origin` value for a request, if any.
    pub fn allow_origin(&self, origin: Option<&HeaderValue>) -> Option<HeaderValue> {
        match self {
            AllowedOrigins::Any => Some(HeaderValue::from_static("*")),
            AllowedOrigins::List(origins) => {
                let origin = origin?;
                let requested = origin.to_str().ok()?;
                origins
                    .iter()
                    .any(|allowed| allowed == requested)
                    .then(|| origin.clone())
            }
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, AllowedOrigins::List(_))
    }
}

/// Stamps the cross-origin headers on every response, errors included.
///
/// A disallowed origin still gets its response, only without
/// `Access-Control-Allow-Origin`, so the browser hides the body.
pub async fn apply_cors_headers(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let allowed_origins = req
        .app_data::<web::Data<AllowedOrigins>>()
        .map(|origins| origins.get_ref().clone())
        .unwrap_or(AllowedOrigins::Any);
    let origin = req.headers().get(ORIGIN).cloned();

    let mut res = next.call(req).await?;
    let headers = res.headers_mut();

    if let Some(value) = allowed_origins.allow_origin(origin.as_ref()) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
    } else if origin.is_some() {
        tracing::warn!(origin = ?origin, "Request from an origin outside the allow-list");
    }
    if allowed_origins.is_restricted() {
        headers.insert(VARY, HeaderValue::from_static("Origin"));
    }
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST,OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    Ok(res)
}

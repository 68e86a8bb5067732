use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, AppState};

/// Attaches `Claims` to the request whenever a valid bearer token is sent.
/// Protected API routes without one get 401; `/api/v1/admin/*` gets 403
/// for non-admins. Everything else passes through anonymously.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path().to_string();
            let public = is_public_route(&path, req.method());

            let state = req.app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    tracing::error!("AppState missing in middleware");
                    AuthError::MissingJwtService
                })?;

            let claims = match extract_token(&req) {
                Some(token) => match state.auth_handler.validate_access_token(&token).await {
                    Ok(claims) => Some(claims),
                    Err(e) if public => {
                        tracing::debug!("Ignoring unusable token on public route: {}", e);
                        None
                    }
                    Err(e) => {
                        tracing::warn!("Rejected access token for {}: {}", path, e);
                        return Ok(custom_error_response(req, unauthorized(&e)));
                    }
                },
                None => None,
            };

            match claims {
                Some(claims) => {
                    if let Err(forbidden_response) = enforce_admin_access(&path, &claims) {
                        return Ok(custom_error_response(req, forbidden_response));
                    }
                    req.extensions_mut().insert(claims);
                }
                None if !public => {
                    tracing::warn!("Missing or malformed Authorization header for {}", path);
                    return Ok(custom_error_response(req, unauthorized(&AuthError::MissingCredentials)));
                }
                None => {}
            }

            service.call(req).await
        })
    }
}

/// Routes reachable without a token. Browser pages and served uploads are
/// public here; page handlers apply their own redirects.
pub fn is_public_route(path: &str, method: &Method) -> bool {
    if method == Method::OPTIONS {
        return true;
    }

    let Some(api_path) = path.strip_prefix("/api/v1") else {
        return true;
    };

    if *method == Method::GET {
        return api_path.is_empty()
            || api_path == "/"
            || api_path == "/chat"
            || api_path == "/blog/categories"
            || api_path.starts_with("/blog/posts")
            || api_path.starts_with("/projects");
    }

    *method == Method::POST
        && matches!(
            api_path,
            "/auth/sign-up" | "/auth/sign-in" | "/auth/refresh-token" | "/chat/messages"
        )
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn enforce_admin_access(path: &str, claims: &Claims) -> Result<(), HttpResponse> {
    if path.starts_with("/api/v1/admin") && !claims.admin {
        tracing::warn!(user = %claims.sub, "Admin access required for path: {}", path);
        return Err(
            HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Admin access required"
            }))
        );
    }
    Ok(())
}

fn unauthorized(err: &AuthError) -> HttpResponse {
    let message = match err {
        AuthError::MissingCredentials => "Missing or invalid credentials".to_string(),
        other => other.to_string(),
    };
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": message }))
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::guard::{self, GuardDecision};
use crate::server::AppState;
use crate::session::{RequestCookies, SessionStore};

/// Route guard middleware: redirects unauthenticated visitors away from the
/// protected area and signed-in users away from the login pages.
///
/// The derived [`AuthState`](crate::guard::AuthState) is inserted into the
/// request extensions for evaluated paths.
pub async fn route_guard_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let cookie = RequestCookies::from_headers(request.headers()).get(&state.session.token_title);
    let evaluation = guard::evaluate(&path, cookie.as_deref(), state.cipher.as_ref(), &state.guard);

    match evaluation.decision {
        GuardDecision::Allow => {
            if let Some(auth_state) = evaluation.state {
                request.extensions_mut().insert(auth_state);
            }
            next.run(request).await
        }
        GuardDecision::RedirectTo(location) => {
            tracing::debug!(
                "Guard redirecting {} {} ({:?}) to {}",
                request.method(),
                path,
                evaluation.state,
                location
            );
            redirect_for(request.method(), &location)
        }
    }
}

/// 307 keeps safe navigations as they are; anything else becomes a GET via 303
fn redirect_for(method: &Method, location: &str) -> Response {
    if method == Method::GET || method == Method::HEAD {
        Redirect::temporary(location).into_response()
    } else {
        Redirect::to(location).into_response()
    }
}

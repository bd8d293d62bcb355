use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use crate::errors::AppError;

/// Identifies the browser session a request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// Reads the session cookie, issuing a fresh id when it is missing or unreadable.
pub struct SessionMiddleware {
    cookie_name: Rc<str>,
    secure: bool,
}

impl SessionMiddleware {
    pub fn new(cookie_name: &str, secure: bool) -> Self {
        Self {
            cookie_name: Rc::from(cookie_name),
            secure,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            cookie_name: Rc::clone(&self.cookie_name),
            secure: self.secure,
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    cookie_name: Rc<str>,
    secure: bool,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let cookie_name = Rc::clone(&self.cookie_name);
        let secure = self.secure;

        Box::pin(async move {
            let existing = req
                .cookie(&cookie_name)
                .and_then(|c| Uuid::parse_str(c.value()).ok());
            let id = existing.unwrap_or_else(Uuid::new_v4);
            if existing.is_none() {
                log::debug!("Issuing new session {}", id);
            }

            req.extensions_mut().insert(SessionId(id));

            let mut res = service.call(req).await?;

            if existing.is_none() {
                let cookie = Cookie::build(cookie_name.to_string(), id.to_string())
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .secure(secure)
                    .finish();
                res.response_mut()
                    .add_cookie(&cookie)
                    .map_err(ErrorInternalServerError)?;
            }

            Ok(res.map_into_left_body())
        })
    }
}

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<SessionId>()
            .copied()
            .ok_or_else(|| AppError::InternalError("Session middleware not configured".to_string()));

        ready(id)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{get, test, App, HttpResponse};

    use super::*;

    #[get("/whoami")]
    async fn whoami(session: SessionId) -> HttpResponse {
        HttpResponse::Ok().body(session.0.to_string())
    }

    #[actix_web::test]
    async fn issues_cookie_for_new_browser() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new("quiz_sid", false))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::call_service(&app, req).await;

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "quiz_sid")
            .expect("session cookie should be set");
        let issued = cookie.value().to_string();
        let body = test::read_body(resp).await;
        assert_eq!(body, issued.as_bytes());
    }

    #[actix_web::test]
    async fn reuses_id_from_existing_cookie() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new("quiz_sid", false))
                .service(whoami),
        )
        .await;
        let id = Uuid::new_v4();

        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new("quiz_sid", id.to_string()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.response().cookies().next().is_none());
        let body = test::read_body(resp).await;
        assert_eq!(body, id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn extractor_fails_without_middleware() {
        let app = test::init_service(App::new().service(whoami)).await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_server_error());
    }
}

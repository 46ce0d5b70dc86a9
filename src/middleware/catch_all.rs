use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::utils::{AppError, INTERNAL_ERROR_MESSAGE};

/// Last line of defence: any 500 that did not come from `AppError` (and so
/// may carry framework or driver detail) is logged and replaced with the
/// generic JSON error body.
pub struct CatchAll;

impl<S, B> Transform<S, ServiceRequest> for CatchAll
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CatchAllMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CatchAllMiddleware { service }))
    }
}

pub struct CatchAllMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CatchAllMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            if res.status() != StatusCode::INTERNAL_SERVER_ERROR {
                return Ok(res.map_into_left_body());
            }

            let from_app_error = res
                .response()
                .error()
                .map_or(false, |e| e.as_error::<AppError>().is_some());
            if from_app_error {
                return Ok(res.map_into_left_body());
            }

            match res.response().error() {
                Some(e) => log::error!("❌ Unhandled error on {} {}: {}", res.request().method(), res.request().path(), e),
                None => log::error!("❌ Unhandled 500 on {} {}", res.request().method(), res.request().path()),
            }

            let (req, _) = res.into_parts();
            let generic = HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": INTERNAL_ERROR_MESSAGE
            }));
            Ok(ServiceResponse::new(req, generic).map_into_right_body())
        })
    }
}

//! Application interface and state.

pub mod error;

use std::any::Any;

pub use error::AppError;

use account_board_model::ApiError;

use axum_valid::{Garde, GardeRejection, HasValidate};

use axum::{
    Json, RequestExt as _,
    extract::{FromRef, FromRequest, Request},
    response::{IntoResponse, Response},
};

use derive_more::Deref;

use garde::Validate;

use http::StatusCode;

use crate::{app::error::AppErrorKind, store::RecordStore};

/// Shared app state.
///
/// Cheaply cloneable.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The record store.
    pub store: RecordStore,
}

// Request bodies validate without context.
impl FromRef<AppState> for () {
    fn from_ref(_: &AppState) -> Self {}
}

/// App Garde extractor.
///
/// Rejects the request with a `400` if the inner extractor's value does not
/// validate.
#[derive(Deref)]
pub struct AppGarde<T>(pub T);

impl<S, T> FromRequest<S> for AppGarde<T>
where
    S: Send + Sync,
    T: FromRequest<S> + HasValidate + 'static,
    AppError: From<<T as FromRequest<S>>::Rejection>,
    <T as HasValidate>::Validate: Validate,
    <<T as HasValidate>::Validate as Validate>::Context: Send + Sync + FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let valid = request.extract_with_state::<Garde<T>, S, _>(state).await;

        match valid {
            Ok(Garde(valid)) => Ok(AppGarde(valid)),
            Err(GardeRejection::Valid(garde)) => Err(AppErrorKind::Garde(garde).into()),
            Err(GardeRejection::Inner(err)) => Err(err.into()),
        }
    }
}

/// App JSON extractor and responder.
#[derive(Deref, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> HasValidate for AppJson<T> {
    type Validate = T;

    fn get_validate(&self) -> &Self::Validate {
        &self.0
    }
}

impl<T> IntoResponse for AppJson<T>
where
    Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// Turns a panicking handler into a `500`.
///
/// The panic message is logged, not sent to the client.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };

    tracing::error!(%detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        AppJson(ApiError {
            message: "An internal server error occurred.".into(),
        }),
    )
        .into_response()
}

// src/extract.rs

//! Drop-in replacements for axum's `Json` and `Path` extractors whose
//! rejections go through [`AppError`], so malformed input gets the same
//! JSON error body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, rejection::{JsonRejection, PathRejection}};

use crate::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

//! Query parameter parsing helpers.

use std::{fmt::Display, str::FromStr};

use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait StatusFilterExt {
    /// Parse an optional `status` filter, answering `400` for unknown values.
    fn into_status_filter<S>(self) -> Result<Option<S>, StatusError>
    where
        S: FromStr,
        S::Err: Display;
}

impl StatusFilterExt for QueryParam<String, false> {
    fn into_status_filter<S>(self) -> Result<Option<S>, StatusError>
    where
        S: FromStr,
        S::Err: Display,
    {
        self.into_inner()
            .filter(|value| !value.is_empty())
            .map(|value| value.parse::<S>())
            .transpose()
            .or_400("could not parse \"status\" query parameter")
    }
}

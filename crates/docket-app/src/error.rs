// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

use crate::{RecordKey, ScreenKind};

/// A form draft that cannot be accepted; the draft itself is left intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: String },
    #[error("{field} is invalid: {reason}")]
    Invalid { field: String, reason: String },
}

impl ValidationError {
    /// Label of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::Invalid { field, .. } => field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Remove,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Remove => "remove",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("record {0} no longer exists")]
    NotFound(RecordKey),
    #[error("{} does not support {}", .screen.label(), .operation.as_str())]
    Unsupported {
        screen: ScreenKind,
        operation: Operation,
    },
    #[error("a submission is already in flight -- wait for it to finish")]
    SubmitPending,
    #[error("no record is being edited")]
    NotEditing,
    #[error("no record is selected")]
    NothingSelected,
}

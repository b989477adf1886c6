// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::ids::RecordKey;

/// One field value inside a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(Date),
    Timestamp(OffsetDateTime),
    Null,
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(_) | Self::Date(_) | Self::Timestamp(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The instant a date-like value denotes; plain dates are midnight UTC.
    pub fn instant(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Date(date) => Some(date.midnight().assume_utc()),
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// String form used for free-text search and plain rendering.
    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => format_number(*value),
            Self::Date(value) => value.to_string(),
            Self::Timestamp(value) => value
                .format(&Rfc3339)
                .unwrap_or_else(|_| value.to_string()),
            Self::Null => String::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(value: OffsetDateTime) -> Self {
        Self::Timestamp(value)
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

pub type FieldMap = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    key: RecordKey,
    fields: FieldMap,
}

impl Record {
    pub fn new(key: impl Into<RecordKey>) -> Self {
        Self {
            key: key.into(),
            fields: FieldMap::new(),
        }
    }

    pub fn from_fields(key: impl Into<RecordKey>, fields: FieldMap) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_owned(), value.into());
        self
    }

    pub fn key(&self) -> &RecordKey {
        &self.key
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(field.to_owned(), value.into());
    }

    /// Shallow merge: named fields are replaced, everything else is kept.
    pub fn merge(&mut self, partial: &FieldMap) {
        for (field, value) in partial {
            self.fields.insert(field.clone(), value.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

pub const ALL_STATUSES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_STATUSES) {
            Self::All
        } else {
            Self::Only(trimmed.to_owned())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_STATUSES,
            Self::Only(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenKind {
    Cases,
    Billing,
    Appeals,
    Documents,
    Calendar,
    CourtRooms,
    RegistrarCases,
    RegistrarAppeals,
}

impl ScreenKind {
    pub const ALL: [Self; 8] = [
        Self::Cases,
        Self::Billing,
        Self::Appeals,
        Self::Documents,
        Self::Calendar,
        Self::CourtRooms,
        Self::RegistrarCases,
        Self::RegistrarAppeals,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Billing => "billing",
            Self::Appeals => "appeals",
            Self::Documents => "documents",
            Self::Calendar => "calendar",
            Self::CourtRooms => "rooms",
            Self::RegistrarCases => "registrar-cases",
            Self::RegistrarAppeals => "registrar-appeals",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cases" => Some(Self::Cases),
            "billing" => Some(Self::Billing),
            "appeals" => Some(Self::Appeals),
            "documents" => Some(Self::Documents),
            "calendar" => Some(Self::Calendar),
            "rooms" => Some(Self::CourtRooms),
            "registrar-cases" => Some(Self::RegistrarCases),
            "registrar-appeals" => Some(Self::RegistrarAppeals),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cases => "My Cases",
            Self::Billing => "Billing",
            Self::Appeals => "Appeals",
            Self::Documents => "Documents",
            Self::Calendar => "Calendar",
            Self::CourtRooms => "Court Rooms",
            Self::RegistrarCases => "Cases",
            Self::RegistrarAppeals => "Appeals Management",
        }
    }
}

/// Badge coloring attached to a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeTone {
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Info,
}

impl BadgeTone {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

/// How a session treats an unreachable backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModeStrategy {
    #[default]
    Online,
    /// Development convenience: seed data only, failed creates accepted locally.
    Demo,
}

impl ModeStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Demo => "demo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "online" => Some(Self::Online),
            "demo" => Some(Self::Demo),
            _ => None,
        }
    }
}

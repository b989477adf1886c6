// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;
use time::Date;
use time::macros::format_description;

use crate::{FieldMap, ValidationError, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    Time,
    Select(Vec<String>),
}

/// Declarative description of one form field, shared by rendering and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub placeholder: String,
    /// Name the backend uses for this field when it differs from `name`.
    pub wire_name: Option<String>,
}

impl FieldSchema {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
            kind,
            required: false,
            default: None,
            min: None,
            placeholder: String::new(),
            wire_name: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn text_area(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn time(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Time)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select(options.iter().map(|option| (*option).to_owned()).collect()),
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_owned();
        self
    }

    pub fn wire(mut self, wire_name: &str) -> Self {
        self.wire_name = Some(wire_name.to_owned());
        self
    }

    pub fn wire_name(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }

    fn check(&self, value: Option<&Value>) -> Result<(), ValidationError> {
        let Some(value) = value.filter(|value| !value.is_blank()) else {
            if self.required {
                return Err(ValidationError::Missing {
                    field: self.label.clone(),
                });
            }
            return Ok(());
        };

        if let (Some(min), Some(number)) = (self.min, value.as_number())
            && number < min
        {
            return Err(self.invalid(format!("must be at least {min}")));
        }

        if let (FieldKind::Select(options), Some(text)) = (&self.kind, value.as_text())
            && !options.iter().any(|option| option == text)
        {
            return Err(self.invalid(format!("{text:?} is not one of {}", options.join(", "))));
        }

        Ok(())
    }

    fn parse_raw(&self, raw: &str) -> Result<Value, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }

        match self.kind {
            FieldKind::Number => trimmed
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Value::Number)
                .ok_or_else(|| self.invalid("expected a number".to_owned())),
            FieldKind::Date => parse_form_date(trimmed)
                .map(Value::Date)
                .ok_or_else(|| self.invalid("expected a date like 2025-05-10".to_owned())),
            FieldKind::Text | FieldKind::TextArea | FieldKind::Time | FieldKind::Select(_) => {
                Ok(Value::text(raw))
            }
        }
    }

    fn invalid(&self, reason: String) -> ValidationError {
        ValidationError::Invalid {
            field: self.label.clone(),
            reason,
        }
    }
}

/// Parses the two date spellings the dashboard uses: HTML date inputs and
/// the `MM/DD/YYYY` display format.
pub fn parse_form_date(input: &str) -> Option<Date> {
    let trimmed = input.trim();
    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(trimmed, format_description!("[month]/[day]/[year]")))
        .ok()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_by_wire_name(&self, wire_name: &str) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|field| field.wire_name() == wire_name)
    }

    /// Field defaults a fresh create form starts from.
    pub fn blank_draft(&self) -> FieldMap {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .default
                    .clone()
                    .map(|value| (field.name.clone(), value))
            })
            .collect()
    }

    /// Checks fields in declaration order and reports the first failure.
    pub fn validate(&self, draft: &FieldMap) -> Result<(), ValidationError> {
        for field in &self.fields {
            field.check(draft.get(&field.name))?;
        }
        Ok(())
    }

    /// Converts raw form strings into typed values. Inputs for fields the
    /// schema does not know are kept as text.
    pub fn parse_input(&self, raw: &BTreeMap<String, String>) -> Result<FieldMap, ValidationError> {
        let mut parsed = FieldMap::new();
        for (name, input) in raw {
            let value = match self.field(name) {
                Some(field) => field.parse_raw(input)?,
                None if input.trim().is_empty() => Value::Null,
                None => Value::text(input.as_str()),
            };
            parsed.insert(name.clone(), value);
        }
        Ok(parsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRole {
    Client,
    CaseParticipant,
    CourtRegistrar,
    Lawyer,
    Judge,
}

impl ProfileRole {
    pub const ALL: [Self; 5] = [
        Self::Client,
        Self::CaseParticipant,
        Self::CourtRegistrar,
        Self::Lawyer,
        Self::Judge,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::CaseParticipant => "Case Participant",
            Self::CourtRegistrar => "CourtRegistrar",
            Self::Lawyer => "Lawyer",
            Self::Judge => "Judge",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Client" => Some(Self::Client),
            "Case Participant" => Some(Self::CaseParticipant),
            "CourtRegistrar" => Some(Self::CourtRegistrar),
            "Lawyer" => Some(Self::Lawyer),
            "Judge" => Some(Self::Judge),
            _ => None,
        }
    }

    /// Extra fields each role fills in when completing a profile.
    pub fn profile_schema(self) -> FormSchema {
        let address = || {
            FieldSchema::text("address", "Address")
                .placeholder("123 Main St, City")
                .required()
        };
        let fields = match self {
            Self::Client | Self::CaseParticipant => vec![address()],
            Self::CourtRegistrar => vec![
                FieldSchema::text("position", "Position")
                    .placeholder("Registrar Position")
                    .required(),
            ],
            Self::Lawyer => vec![
                FieldSchema::text("barLicense", "Bar License No")
                    .placeholder("123456")
                    .required(),
                FieldSchema::number("experience", "Experience (years)")
                    .placeholder("5")
                    .min(0.0)
                    .required(),
                FieldSchema::text("specialization", "Specialization")
                    .placeholder("e.g. Civil Law")
                    .required(),
            ],
            Self::Judge => vec![
                FieldSchema::text("position", "Position")
                    .placeholder("Judge Position")
                    .required(),
                FieldSchema::text("specialization", "Specialization")
                    .placeholder("e.g. Criminal Law")
                    .required(),
                FieldSchema::number("experience", "Experience (years)")
                    .placeholder("10")
                    .min(0.0)
                    .required(),
            ],
        };
        FormSchema::new(fields)
    }
}

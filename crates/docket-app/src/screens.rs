// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    BadgeTone, FieldSchema, FormSchema, ScreenKind, SortDirection, ViewConfig, ViewState,
};

/// Where `create` puts a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Prepend,
    Append,
}

/// Which mutations a screen exposes. Screens differ on purpose: billing
/// entries cannot be edited or removed once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operations {
    pub create: bool,
    pub update: bool,
    pub remove: bool,
}

impl Operations {
    pub const READ_ONLY: Self = Self {
        create: false,
        update: false,
        remove: false,
    };
    pub const CREATE_ONLY: Self = Self {
        create: true,
        update: false,
        remove: false,
    };
    pub const FULL: Self = Self {
        create: true,
        update: true,
        remove: true,
    };
}

/// Backend collection a screen loads from and posts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub path: &'static str,
    /// Envelope key holding the list on GET.
    pub list_key: &'static str,
    /// Envelope key holding the echoed record on POST/PUT.
    pub item_key: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BadgeRule {
    Exact(&'static [(&'static str, BadgeTone)]),
    Contains(&'static [(&'static str, BadgeTone)]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSpec {
    pub kind: ScreenKind,
    pub view: ViewConfig,
    pub form: FormSchema,
    pub default_view: ViewState,
    pub insert: InsertPosition,
    pub operations: Operations,
    pub resource: Option<Resource>,
    pub columns: Vec<&'static str>,
    pub empty_message: &'static str,
    badges: BadgeRule,
    fallback_tone: BadgeTone,
}

impl ScreenSpec {
    pub fn badge_tone(&self, status: &str) -> BadgeTone {
        match self.badges {
            BadgeRule::Exact(rules) => rules
                .iter()
                .find(|(value, _)| *value == status)
                .map_or(self.fallback_tone, |(_, tone)| *tone),
            BadgeRule::Contains(rules) => {
                let lowered = status.to_lowercase();
                rules
                    .iter()
                    .find(|(needle, _)| lowered.contains(needle))
                    .map_or(self.fallback_tone, |(_, tone)| *tone)
            }
        }
    }
}

const CASE_BADGES: &[(&str, BadgeTone)] = &[
    ("open", BadgeTone::Primary),
    ("pending", BadgeTone::Warning),
    ("trial", BadgeTone::Danger),
    ("closed", BadgeTone::Secondary),
];

const BILLING_BADGES: &[(&str, BadgeTone)] = &[
    ("Due", BadgeTone::Danger),
    ("Pending", BadgeTone::Warning),
    ("Paid", BadgeTone::Success),
];

const APPEAL_BADGES: &[(&str, BadgeTone)] = &[
    ("Open", BadgeTone::Primary),
    ("Pending", BadgeTone::Warning),
    ("Closed", BadgeTone::Secondary),
];

const ROOM_BADGES: &[(&str, BadgeTone)] = &[
    ("Available", BadgeTone::Success),
    ("Occupied", BadgeTone::Danger),
    ("Maintenance", BadgeTone::Warning),
    ("Reserved", BadgeTone::Info),
];

const REGISTRAR_CASE_BADGES: &[(&str, BadgeTone)] = &[
    ("Open", BadgeTone::Success),
    ("Pending", BadgeTone::Warning),
    ("Closed", BadgeTone::Secondary),
];

const REGISTRAR_APPEAL_BADGES: &[(&str, BadgeTone)] = &[
    ("Under Review", BadgeTone::Warning),
    ("Hearing Scheduled", BadgeTone::Info),
    ("Decided", BadgeTone::Success),
];

const DOCUMENT_BADGES: &[(&str, BadgeTone)] = &[
    ("folder", BadgeTone::Warning),
    ("file", BadgeTone::Primary),
];

const EVENT_BADGES: &[(&str, BadgeTone)] = &[
    ("Court Date", BadgeTone::Danger),
    ("Deadline", BadgeTone::Warning),
    ("Meeting", BadgeTone::Primary),
    ("Task", BadgeTone::Info),
];

impl ScreenKind {
    pub fn spec(self) -> ScreenSpec {
        match self {
            Self::Cases => ScreenSpec {
                kind: self,
                view: ViewConfig::new(&["caseName", "client", "opposingCounsel", "caseType"])
                    .status_field("status"),
                form: FormSchema::new(vec![
                    FieldSchema::text("caseName", "Case Name").required(),
                    FieldSchema::text("client", "Client").required(),
                    FieldSchema::text("opposingCounsel", "Opposing Counsel"),
                    FieldSchema::text("caseType", "Case Type"),
                    FieldSchema::text("status", "Status").required(),
                    FieldSchema::date("lastActivity", "Last Activity"),
                    FieldSchema::text("court", "Court"),
                    FieldSchema::select(
                        "priority",
                        "Priority",
                        &["Critical", "High", "Medium", "Low"],
                    ),
                ]),
                default_view: ViewState::sorted_by("lastActivity", SortDirection::Desc),
                insert: InsertPosition::Append,
                operations: Operations::READ_ONLY,
                resource: None,
                columns: vec!["caseName", "client", "status", "lastActivity", "priority"],
                empty_message: "No cases found matching your criteria.",
                badges: BadgeRule::Contains(CASE_BADGES),
                fallback_tone: BadgeTone::Info,
            },
            Self::Billing => ScreenSpec {
                kind: self,
                view: ViewConfig::new(&["caseName", "description"]).status_field("status"),
                form: FormSchema::new(vec![
                    FieldSchema::date("date", "Date").required().wire("paymentdate"),
                    FieldSchema::text("caseName", "Case Name")
                        .required()
                        .wire("casename"),
                    FieldSchema::text("description", "Description")
                        .required()
                        .wire("purpose"),
                    FieldSchema::number("amount", "Amount")
                        .min(0.0)
                        .required()
                        .wire("balance"),
                    FieldSchema::select("status", "Status", &["Due", "Pending", "Paid"])
                        .default_value("Due")
                        .required(),
                    FieldSchema::text("method", "Method").wire("mode"),
                ]),
                default_view: ViewState::default(),
                insert: InsertPosition::Append,
                operations: Operations::CREATE_ONLY,
                resource: Some(Resource {
                    path: "payments",
                    list_key: "payments",
                    item_key: "payment",
                }),
                columns: vec!["date", "caseName", "description", "amount", "status", "method"],
                empty_message: "No payments found.",
                badges: BadgeRule::Exact(BILLING_BADGES),
                fallback_tone: BadgeTone::Secondary,
            },
            Self::Appeals => ScreenSpec {
                kind: self,
                view: ViewConfig::new(&["caseName", "type"]).status_field("status"),
                form: FormSchema::new(vec![
                    FieldSchema::date("date", "Date").required(),
                    FieldSchema::text("caseName", "Case Name").required(),
                    FieldSchema::select("type", "Type", &["Civil", "Criminal", "Probate", "Other"])
                        .default_value("Civil")
                        .required(),
                    FieldSchema::select("status", "Status", &["Open", "Pending", "Closed"])
                        .default_value("Open")
                        .required(),
                    FieldSchema::text("court", "Court").required(),
                    FieldSchema::text("result", "Result"),
                ]),
                default_view: ViewState::default(),
                insert: InsertPosition::Prepend,
                operations: Operations::CREATE_ONLY,
                resource: None,
                columns: vec!["date", "caseName", "type", "status", "court", "result"],
                empty_message: "No appeals found.",
                badges: BadgeRule::Exact(APPEAL_BADGES),
                fallback_tone: BadgeTone::Secondary,
            },
            Self::Documents => ScreenSpec {
                kind: self,
                view: ViewConfig::new(&["name"]).status_field("type"),
                form: FormSchema::new(vec![
                    FieldSchema::text("name", "Name").required(),
                    FieldSchema::select("type", "Type", &["file", "folder"])
                        .default_value("file")
                        .required(),
                    FieldSchema::date("uploadDate", "Uploaded"),
                    FieldSchema::number("size", "Size").min(0.0),
                ]),
                default_view: ViewState::sorted_by("uploadDate", SortDirection::Desc),
                insert: InsertPosition::Prepend,
                operations: Operations::CREATE_ONLY,
                resource: None,
                columns: vec!["name", "type", "uploadDate", "size"],
                empty_message: "No documents found.",
                badges: BadgeRule::Exact(DOCUMENT_BADGES),
                fallback_tone: BadgeTone::Secondary,
            },
            Self::Calendar => ScreenSpec {
                kind: self,
                view: ViewConfig::new(&["title", "type", "location"]).status_field("type"),
                form: FormSchema::new(vec![
                    FieldSchema::text("title", "Title").required(),
                    FieldSchema::date("date", "Date").required(),
                    FieldSchema::time("time", "Time").required(),
                    FieldSchema::select(
                        "type",
                        "Type",
                        &["Court Date", "Deadline", "Meeting", "Task"],
                    )
                    .default_value("Court Date"),
                    FieldSchema::text("location", "Location"),
                    FieldSchema::text_area("description", "Description"),
                ]),
                default_view: ViewState::sorted_by("date", SortDirection::Asc),
                insert: InsertPosition::Append,
                operations: Operations::CREATE_ONLY,
                resource: None,
                columns: vec!["date", "time", "title", "type", "location"],
                empty_message: "No events scheduled.",
                badges: BadgeRule::Exact(EVENT_BADGES),
                fallback_tone: BadgeTone::Secondary,
            },
            Self::CourtRooms => ScreenSpec {
                kind: self,
                view: ViewConfig::new(&["name"]).status_field("status"),
                form: FormSchema::new(vec![
                    FieldSchema::text("number", "Room Number").required(),
                    FieldSchema::text("name", "Name").required(),
                    FieldSchema::number("capacity", "Capacity")
                        .min(0.0)
                        .required(),
                    FieldSchema::text("type", "Type").required(),
                    FieldSchema::select(
                        "status",
                        "Status",
                        &["Available", "Occupied", "Maintenance", "Reserved"],
                    )
                    .required(),
                ]),
                default_view: ViewState::default(),
                insert: InsertPosition::Append,
                operations: Operations::FULL,
                resource: None,
                columns: vec!["number", "name", "capacity", "type", "status"],
                empty_message: "No court rooms found.",
                badges: BadgeRule::Exact(ROOM_BADGES),
                fallback_tone: BadgeTone::Secondary,
            },
            Self::RegistrarCases => ScreenSpec {
                kind: self,
                view: ViewConfig::new(&["number", "title", "parties"]).status_field("status"),
                form: FormSchema::new(vec![
                    FieldSchema::text("number", "Case Number").required(),
                    FieldSchema::text("title", "Title").required(),
                    FieldSchema::text("parties", "Parties").required(),
                    FieldSchema::text("type", "Type").required(),
                    FieldSchema::select("status", "Status", &["Open", "Pending", "Closed"])
                        .required(),
                ]),
                default_view: ViewState::default(),
                insert: InsertPosition::Append,
                operations: Operations::FULL,
                resource: None,
                columns: vec!["number", "title", "parties", "type", "status"],
                empty_message: "No cases found.",
                badges: BadgeRule::Exact(REGISTRAR_CASE_BADGES),
                fallback_tone: BadgeTone::Secondary,
            },
            Self::RegistrarAppeals => ScreenSpec {
                kind: self,
                view: ViewConfig::new(&[
                    "appealNumber",
                    "originalCaseId",
                    "appellant",
                    "respondent",
                ])
                .status_field("status"),
                form: FormSchema::new(vec![
                    FieldSchema::text("appealNumber", "Appeal Number").required(),
                    FieldSchema::text("originalCaseId", "Original Case ID").required(),
                    FieldSchema::text("appellant", "Appellant").required(),
                    FieldSchema::text("respondent", "Respondent").required(),
                    FieldSchema::date("dateFiled", "Date Filed").required(),
                    FieldSchema::select(
                        "status",
                        "Status",
                        &["Under Review", "Hearing Scheduled", "Decided"],
                    )
                    .required(),
                ]),
                default_view: ViewState::default(),
                insert: InsertPosition::Append,
                operations: Operations::FULL,
                resource: None,
                columns: vec![
                    "appealNumber",
                    "originalCaseId",
                    "appellant",
                    "respondent",
                    "dateFiled",
                    "status",
                ],
                empty_message: "No appeals found.",
                badges: BadgeRule::Exact(REGISTRAR_APPEAL_BADGES),
                fallback_tone: BadgeTone::Secondary,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InsertPosition, Operations};
    use crate::{BadgeTone, ScreenKind};

    #[test]
    fn case_badges_match_by_substring() {
        let spec = ScreenKind::Cases.spec();
        assert_eq!(spec.badge_tone("Pending Discovery"), BadgeTone::Warning);
        assert_eq!(spec.badge_tone("In Trial"), BadgeTone::Danger);
        assert_eq!(spec.badge_tone("Closed - Archived"), BadgeTone::Secondary);
        assert_eq!(spec.badge_tone("Settled"), BadgeTone::Info);
    }

    #[test]
    fn billing_badges_match_exactly() {
        let spec = ScreenKind::Billing.spec();
        assert_eq!(spec.badge_tone("Paid"), BadgeTone::Success);
        assert_eq!(spec.badge_tone("paid"), BadgeTone::Secondary);
    }

    #[test]
    fn insert_positions_follow_each_screen() {
        assert_eq!(ScreenKind::Appeals.spec().insert, InsertPosition::Prepend);
        assert_eq!(ScreenKind::Billing.spec().insert, InsertPosition::Append);
        assert_eq!(ScreenKind::Documents.spec().insert, InsertPosition::Prepend);
    }

    #[test]
    fn billing_is_create_only() {
        assert_eq!(ScreenKind::Billing.spec().operations, Operations::CREATE_ONLY);
        assert_eq!(ScreenKind::CourtRooms.spec().operations, Operations::FULL);
    }

    #[test]
    fn every_column_and_search_field_is_in_the_form() {
        for screen in ScreenKind::ALL {
            let spec = screen.spec();
            for field in spec.columns.iter().copied().chain(
                spec.view
                    .searchable_fields
                    .iter()
                    .map(String::as_str),
            ) {
                assert!(
                    spec.form.field(field).is_some(),
                    "{} is missing form field {field}",
                    screen.as_str()
                );
            }
        }
    }

    #[test]
    fn billing_fields_carry_backend_names() {
        let spec = ScreenKind::Billing.spec();
        assert_eq!(
            spec.form.field("description").map(|field| field.wire_name()),
            Some("purpose")
        );
        assert_eq!(
            spec.form.field_by_wire_name("balance").map(|field| field.name.as_str()),
            Some("amount")
        );
    }
}
